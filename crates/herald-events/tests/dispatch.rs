//! Dispatch ordering, payload delivery and snapshot semantics.

use std::sync::{Arc, Mutex};

use herald_events::{Emitter, Listener};
use herald_test::{CallLog, setup_test_logging};
use serde_json::{Value, json};

#[test]
fn test_greet_scenario() {
    setup_test_logging("herald_events=trace");
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();
    let cb = log.recording_listener("cb");

    emitter.on("greet", cb.clone());
    emitter.emit("greet", "hi");
    assert_eq!(log.entries(), vec!["cb:\"hi\""]);

    emitter.remove_listener("greet", &cb);
    emitter.emit("greet", "hi");
    assert_eq!(log.len(), 1);
}

#[test]
fn test_arguments_delivered_in_order() {
    let emitter: Emitter<(String, i64, bool)> = Emitter::new();
    let log = CallLog::new();
    emitter.on("args", log.recording_listener("l"));

    emitter.emit("args", &("first".to_string(), 2, true));

    assert_eq!(log.entries(), vec!["l:(\"first\", 2, true)"]);
}

#[test]
fn test_variadic_value_payload() {
    let emitter: Emitter = Emitter::new();
    let received = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&received);
    emitter.on(
        "update",
        Listener::new(move |_, args: &[Value]| {
            sink.lock().unwrap().push(args.to_vec());
        }),
    );

    emitter.emit("update", &[]);
    emitter.emit("update", &[json!("a"), json!({"b": 1})]);

    assert_eq!(
        *received.lock().unwrap(),
        vec![vec![], vec![json!("a"), json!({"b": 1})]]
    );
}

#[test]
fn test_registration_order() {
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();
    emitter.on("e", log.listener("l1"));
    emitter.on("e", log.listener("l2"));
    emitter.on("e", log.listener("l3"));

    assert_eq!(emitter.emit("e", ""), 3);
    assert_eq!(log.entries(), vec!["l1", "l2", "l3"]);
}

#[test]
fn test_duplicate_registration_invoked_twice() {
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();
    let listener = log.listener("dup");

    emitter.on("e", listener.clone());
    emitter.on("e", listener.clone());
    emitter.emit("e", "");
    assert_eq!(log.count("dup"), 2);

    emitter.remove_listener("e", &listener);
    emitter.emit("e", "");
    assert_eq!(log.count("dup"), 3);
}

#[test]
fn test_identical_closures_removed_independently() {
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();
    let first = log.listener("same");
    let second = log.listener("same");

    emitter.on("e", first.clone());
    emitter.on("e", second.clone());
    emitter.remove_listener("e", &second);

    assert_eq!(emitter.listeners("e"), vec![first]);
}

#[test]
fn test_listener_added_during_emit_runs_next_time() {
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();
    let late = log.listener("late");

    let recorder = log.clone();
    emitter.on(
        "e",
        Listener::new(move |emitter, _| {
            recorder.record("adder");
            emitter.add_listener("e", late.clone());
        }),
    );

    assert_eq!(emitter.emit("e", ""), 1);
    assert_eq!(log.entries(), vec!["adder"]);

    log.clear();
    assert_eq!(emitter.emit("e", ""), 2);
    assert_eq!(log.entries(), vec!["adder", "late"]);
}

#[test]
fn test_listener_removed_during_emit_still_runs() {
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();
    let victim = log.listener("victim");

    let recorder = log.clone();
    let target = victim.clone();
    emitter.on(
        "e",
        Listener::new(move |emitter, _| {
            recorder.record("remover");
            emitter.remove_listener("e", &target);
        }),
    );
    emitter.on("e", victim);

    emitter.emit("e", "");
    assert_eq!(log.entries(), vec!["remover", "victim"]);

    log.clear();
    emitter.emit("e", "");
    assert_eq!(log.entries(), vec!["remover"]);
}

#[test]
fn test_clear_during_emit_does_not_skip_snapshot() {
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();

    let recorder = log.clone();
    emitter.on(
        "e",
        Listener::new(move |emitter, _| {
            recorder.record("clearer");
            emitter.remove_all_listeners("e");
        }),
    );
    emitter.on("e", log.listener("after"));

    assert_eq!(emitter.emit("e", ""), 2);
    assert_eq!(log.entries(), vec!["clearer", "after"]);
    assert_eq!(emitter.emit("e", ""), 0);
}

#[test]
fn test_reentrant_emit_of_same_event() {
    let emitter: Emitter<u32> = Emitter::new();
    let log = CallLog::new();

    let recorder = log.clone();
    emitter.on(
        "countdown",
        Listener::new(move |emitter, remaining: &u32| {
            recorder.record(format!("tick:{remaining}"));
            if let Some(next) = remaining.checked_sub(1) {
                emitter.emit("countdown", &next);
            }
        }),
    );

    emitter.emit("countdown", &2);
    assert_eq!(log.entries(), vec!["tick:2", "tick:1", "tick:0"]);
}

#[test]
fn test_reentrant_emit_of_other_event() {
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();

    emitter.on("inner", log.recording_listener("inner"));
    let recorder = log.clone();
    emitter.on(
        "outer",
        Listener::new(move |emitter, args: &str| {
            recorder.record("outer:before");
            emitter.emit("inner", args);
            recorder.record("outer:after");
        }),
    );

    emitter.emit("outer", "x");
    assert_eq!(
        log.entries(),
        vec!["outer:before", "inner:\"x\"", "outer:after"]
    );
}

#[test]
fn test_listener_drop_may_reenter_emitter() {
    struct EmitOnDrop {
        emitter: Arc<Emitter<str>>,
    }

    impl Drop for EmitOnDrop {
        fn drop(&mut self) {
            // Would deadlock if the removed listener were dropped under the lock
            self.emitter.emit("dropped", "");
        }
    }

    let emitter: Arc<Emitter<str>> = Arc::new(Emitter::new());
    let log = CallLog::new();
    emitter.on("dropped", log.listener("dropped"));

    let guard = EmitOnDrop {
        emitter: Arc::clone(&emitter),
    };
    emitter.on(
        "e",
        Listener::new(move |_, _| {
            let _ = &guard;
        }),
    );

    // The emitter now holds the only handle, so clearing drops the guard
    emitter.remove_all_listeners("e");

    assert_eq!(log.entries(), vec!["dropped"]);
}
