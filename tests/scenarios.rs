//! End-to-end dispatch scenarios.

use rulebook::dispatch::Handler;
use rulebook::{call, Action, BuildError, Pattern};
use serde_json::{json, Value};

fn int(state: &Value, key: &str) -> i64 {
    state[key].as_i64().unwrap_or(0)
}

fn run_all(handler: &Handler, state: Value, actions: &[Action]) -> Value {
    actions.iter().fold(state, |state, action| {
        handler.run(Some(state), action).unwrap()
    })
}

#[test]
fn counter_increments_and_decrements() {
    let counter = Handler::build(|b| {
        Ok(b
            .on("increment", |m, _| {
                m.set_with("count", |s| json!(int(s, "count") + 1));
            })
            .on("decrement", |m, _| {
                m.set_with("count", |s| json!(int(s, "count") - 1));
            }))
    })
    .unwrap();

    let state = counter
        .run(Some(json!({ "count": 0 })), &Action::event(json!({ "type": "@init" })))
        .unwrap();
    assert_eq!(state, json!({ "count": 0 }));

    let state = run_all(
        &counter,
        state,
        &[call!["increment"], call!["decrement"], call!["decrement"]],
    );
    assert_eq!(state, json!({ "count": -1 }));
}

#[test]
fn typed_arguments_guard_rules() {
    let counter = Handler::build(|b| {
        Ok(b.on(("add", Pattern::number()), |m, args| {
            let n = args[0].as_i64().unwrap_or(0);
            m.set_with("count", move |s| json!(int(s, "count") + n));
        }))
    })
    .unwrap();

    let state = counter.run(Some(json!({ "count": 1 })), &call!["add", 3]).unwrap();
    assert_eq!(state, json!({ "count": 4 }));

    let state = counter.run(Some(state), &call!["add", "4"]).unwrap();
    assert_eq!(state, json!({ "count": 4 }));
}

#[test]
fn setters_assign_fields_verbatim() {
    let handler = Handler::build(|b| Ok(b.setter(["foo", "bar"]))).unwrap();

    let state = handler.run(Some(json!({ "foo": 0, "bar": 0 })), &call!["foo", 12]).unwrap();
    assert_eq!(state, json!({ "foo": 12, "bar": 0 }));

    let state = handler.run(Some(state), &call!["baz", 20]).unwrap();
    assert_eq!(state, json!({ "foo": 12, "bar": 0 }));

    let state = handler.run(Some(state), &call!["bar", json!({ "nested": [1] })]).unwrap();
    assert_eq!(state, json!({ "foo": 12, "bar": { "nested": [1] } }));
}

#[test]
fn turnstile_respects_state_guards() {
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

    let state = turnstile.run(None, &call!["addToken"]).unwrap();
    assert_eq!(state, json!("OPEN"));

    let state = turnstile.run(Some(state), &call!["addToken"]).unwrap();
    assert_eq!(state, json!("OPEN"));

    let state = turnstile.run(Some(state), &call!["turnTurnstile"]).unwrap();
    assert_eq!(state, json!("LOCKED"));

    let state = turnstile.run(Some(state), &call!["turnTurnstile"]).unwrap();
    assert_eq!(state, json!("LOCKED"));
}

#[test]
fn namespaced_rules_need_the_prefix() {
    let counter = Handler::build(|b| {
        Ok(b.namespace("counter").on("increment", |m, _| {
            m.set_with("count", |s| json!(int(s, "count") + 1));
        }))
    })
    .unwrap();

    let state = counter
        .run(Some(json!({ "count": 0 })), &call!["counter", "increment"])
        .unwrap();
    assert_eq!(state, json!({ "count": 1 }));

    let state = counter.run(Some(state), &call!["increment"]).unwrap();
    assert_eq!(state, json!({ "count": 1 }));
}

#[test]
fn bare_rule_ignores_namespaced_call() {
    let handler = Handler::build(|b| {
        Ok(b.on("x", |m, _| {
            m.set("hit", true);
        }))
    })
    .unwrap();

    let state = handler.run(Some(json!({})), &call!["ns", "x"]).unwrap();
    assert_eq!(state, json!({}));
}

#[test]
fn hooks_run_around_every_matched_rule() {
    let handler = Handler::build(|b| {
        Ok(b
            .before_each(|m| {
                m.set_with("count", |s| json!(int(s, "count") + 1));
            })
            .setter(["foo", "bar"])
            .after_each(|m| {
                m.set_with("last", |s| json!(int(s, "count") * 100 + int(s, "foo")));
            }))
    })
    .unwrap();

    let state = handler
        .run(Some(json!({ "foo": 0, "bar": 0, "count": 0 })), &call!["foo", 12])
        .unwrap();
    assert_eq!(state, json!({ "foo": 12, "bar": 0, "count": 1, "last": 112 }));

    let state = handler.run(Some(state.clone()), &call!["baz", 20]).unwrap();
    assert_eq!(state, json!({ "foo": 12, "bar": 0, "count": 1, "last": 112 }));
}

#[test]
fn first_matching_rule_alone_decides() {
    let handler = Handler::build(|b| {
        Ok(b
            .on(("pick", Pattern::any()), |m, _| {
                m.set("winner", "first");
            })
            .on(("pick", Pattern::number()), |m, _| {
                m.set("winner", "second");
            }))
    })
    .unwrap();

    let state = handler.run(Some(json!({})), &call!["pick", 1]).unwrap();
    assert_eq!(state, json!({ "winner": "first" }));
}

#[test]
fn merge_acts_like_set_state() {
    let handler = Handler::build(|b| {
        Ok(b
            .on(("addToAll", Pattern::number()), |m, args| {
                let n = args[0].as_i64().unwrap_or(0);
                m.merge(move |s| json!({ "foo": int(s, "foo") + n, "bar": int(s, "bar") + n }));
            })
            .on(("increment", Pattern::string()), |m, args| {
                let key = args[0].as_str().unwrap_or_default().to_string();
                let field = key.clone();
                m.set_with(key, move |s| json!(int(s, &field) + 1));
            }))
    })
    .unwrap();

    let state = handler
        .run(Some(json!({ "foo": 0, "bar": 0 })), &call!["increment", "foo"])
        .unwrap();
    assert_eq!(state, json!({ "foo": 1, "bar": 0 }));

    let state = handler.run(Some(state), &call!["addToAll", 1]).unwrap();
    assert_eq!(state, json!({ "foo": 2, "bar": 1 }));
}

#[test]
fn conventional_events_reach_shape_rules() {
    let handler = Handler::build(|b| {
        Ok(b.on(json!({ "type": "todo/add", "title": null }), |m, args| {
            let title = args[0]["title"].clone();
            m.update(move |mut state, _| {
                if let Some(todos) = state.as_array_mut() {
                    todos.push(title);
                }
                state
            });
        }))
    })
    .unwrap();

    let event = Action::event(json!({ "type": "todo/add", "title": "ship" }));
    let state = handler.run(Some(json!([])), &event).unwrap();

    assert_eq!(state, json!(["ship"]));
}

#[test]
fn duplicate_registrations_fail_the_build() {
    let fallback = Handler::build(|b| b.otherwise(|_, _| {})?.otherwise(|_, _| {}));
    assert!(matches!(fallback, Err(BuildError::DuplicateFallback)));

    let initial = Handler::build(|b| b.init_state(json!(0))?.init_state(json!(1)));
    assert!(matches!(initial, Err(BuildError::DuplicateInitialState)));
}

#[test]
fn wire_encoded_calls_dispatch_like_calls() {
    let handler = Handler::build(|b| Ok(b.setter(["foo"]))).unwrap();
    let wire = serde_json::to_string(&call!["foo", 5]).unwrap();
    let action: Action = serde_json::from_str(&wire).unwrap();

    let state = handler.run(Some(json!({})), &action).unwrap();

    assert_eq!(state, json!({ "foo": 5 }));
}

#[test]
fn omitted_optional_argument_reaches_handler_as_null() {
    let handler = Handler::build(|b| {
        Ok(b.on(("ping", Pattern::optional(Pattern::number())), |m, args| {
            m.set("arity", args.len()).set("delay", args[0].clone());
        }))
    })
    .unwrap();

    let with = handler.run(Some(json!({})), &call!["ping", 5]).unwrap();
    assert_eq!(with, json!({ "arity": 1, "delay": 5 }));

    let without = handler.run(Some(json!({})), &call!["ping"]).unwrap();
    assert_eq!(without, json!({ "arity": 1, "delay": null }));
}
