//! A panicking listener aborts the rest of its dispatch and nothing else.

use std::panic::{AssertUnwindSafe, catch_unwind};

use herald_events::{Emitter, Listener};
use herald_test::CallLog;

fn panicking() -> Listener<str> {
    Listener::new(|_, _| panic!("listener failed"))
}

#[test]
#[should_panic(expected = "listener failed")]
fn test_listener_panic_propagates() {
    let emitter: Emitter<str> = Emitter::new();
    emitter.on("e", panicking());
    emitter.emit("e", "");
}

#[test]
fn test_listener_panic_skips_remaining_listeners() {
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();
    emitter.on("e", log.listener("before"));
    emitter.on("e", panicking());
    emitter.on("e", log.listener("after"));

    let result = catch_unwind(AssertUnwindSafe(|| emitter.emit("e", "")));

    assert!(result.is_err());
    assert_eq!(log.entries(), vec!["before"]);
}

#[test]
fn test_emitter_usable_after_listener_panic() {
    let emitter: Emitter<str> = Emitter::new();
    let log = CallLog::new();
    let failing = panicking();
    emitter.on("e", failing.clone());
    emitter.on("e", log.listener("after"));

    let result = catch_unwind(AssertUnwindSafe(|| emitter.emit("e", "")));
    assert!(result.is_err());

    assert_eq!(emitter.listener_count("e"), 2);
    assert!(emitter.remove_listener("e", &failing));
    assert_eq!(emitter.emit("e", ""), 1);
    assert_eq!(log.entries(), vec!["after"]);
}

#[test]
fn test_once_removed_even_if_listener_panics() {
    let emitter: Emitter<str> = Emitter::new();
    emitter.once("e", panicking());

    let result = catch_unwind(AssertUnwindSafe(|| emitter.emit("e", "")));
    assert!(result.is_err());

    assert_eq!(emitter.listener_count("e"), 0);
    assert_eq!(emitter.emit("e", ""), 0);
}
