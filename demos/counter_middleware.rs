//! Counter With Middleware
//!
//! This example wires a middleware in front of a reducer.
//!
//! Key concepts:
//! - Namespaced reducer rules
//! - Middleware rewriting shorthand calls with `next`
//! - Re-dispatching follow-up actions through a `Store`
//!
//! Run with: cargo run --example counter_middleware

use rulebook::dispatch::{call_encoding_middleware, Handler, Middleware, Store};
use rulebook::{Action, Pattern};
use serde_json::{json, Value};
use std::cell::RefCell;

struct CounterStore {
    reducer: Handler,
    state: RefCell<Value>,
}

impl CounterStore {
    fn apply(&self, action: Action) {
        let next = self.reducer.run(Some(self.state.borrow().clone()), &action).unwrap();
        println!("  reduce {:<40} -> {}", serde_json::to_string(&action).unwrap(), next);
        *self.state.borrow_mut() = next;
    }
}

impl Store for CounterStore {
    fn state(&self) -> Value {
        self.state.borrow().clone()
    }

    fn dispatch(&self, action: Action) {
        self.apply(action);
    }
}

fn count(state: &Value) -> i64 {
    state["count"].as_i64().unwrap_or(0)
}

fn main() {
    println!("=== Counter With Middleware ===\n");

    let reducer = Handler::build(|b| {
        Ok(b.namespace("counter")
            .on(("add", Pattern::number()), |m, args| {
                let n = args[0].as_i64().unwrap_or(0);
                m.set_with("count", move |s| json!(count(s) + n));
            })
            .on("reset", |m, _| {
                m.set("count", 0);
            }))
    })
    .unwrap();

    let shorthand = Middleware::build(|b| {
        Ok(b
            .on("inc", |f, _| {
                f.next(vec![json!("counter"), json!("add"), json!(1)]);
            })
            .on("clear", |f, _| {
                f.pass().dispatch(vec![json!("counter"), json!("reset")]);
            }))
    })
    .unwrap();

    let store = CounterStore {
        reducer,
        state: RefCell::new(json!({ "count": 0 })),
    };

    for raw in [json!(["inc"]), json!(["inc"]), json!(["counter", "add", 5]), json!(["clear"])] {
        println!("incoming {raw}");
        call_encoding_middleware(raw, |action| {
            shorthand.run(&store, |action| store.apply(action), action)
        });
    }

    println!("\nFinal state: {}", store.state());
    println!("\n=== Example Complete ===");
}
