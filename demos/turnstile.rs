//! Turnstile Rule Book
//!
//! This example demonstrates state-guarded rules.
//!
//! Key concepts:
//! - `on_state` guards tested before the action pattern
//! - Whole-state replacement with `update`
//! - Unmatched actions leaving the state untouched
//!
//! Run with: cargo run --example turnstile

use rulebook::call;
use rulebook::dispatch::Handler;
use serde_json::json;

fn main() {
    println!("=== Turnstile Rule Book ===\n");

    let turnstile = Handler::build(|b| {
        b.on_state("LOCKED", "addToken", |m, _| {
            m.update(|_, _| json!("OPEN"));
        })
        .on_state("OPEN", "turnTurnstile", |m, _| {
            m.update(|_, _| json!("LOCKED"));
        })
        .init_state("LOCKED")
    })
    .unwrap();

    println!("Initial state: {}\n", turnstile.initial_state().unwrap());

    let actions = [
        call!["addToken"],
        call!["addToken"],
        call!["turnTurnstile"],
        call!["turnTurnstile"],
    ];

    let mut state = None;
    for action in &actions {
        let next = turnstile.run(state.take(), action).unwrap();
        println!("  {:<28} -> {}", serde_json::to_string(action).unwrap(), next);
        state = Some(next);
    }

    println!("\nA second token while OPEN and a second turn while LOCKED");
    println!("match no rule, so the state is returned unchanged.");

    println!("\n=== Example Complete ===");
}
