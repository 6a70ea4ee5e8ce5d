//! Max-listeners warning output.

use herald_events::{Emitter, EmitterConfig};
use herald_test::{CallLog, LogCapture};

const LEAK_WARNING: &str = "Possible listener leak";

#[test]
fn test_warning_logged_once_per_overflow() {
    let capture = LogCapture::new();
    let log = CallLog::new();

    tracing::subscriber::with_default(capture.subscriber("warn"), || {
        let emitter: Emitter<str> =
            Emitter::with_config(EmitterConfig::new().with_max_listeners(1));
        let first = log.listener("first");
        let second = log.listener("second");

        emitter.on("e", first.clone());
        assert_eq!(capture.count(LEAK_WARNING), 0);

        emitter.on("e", second.clone());
        emitter.on("e", log.listener("third"));
        assert_eq!(capture.count(LEAK_WARNING), 1);

        // Dropping back to the threshold re-arms the warning
        emitter.remove_listener("e", &first);
        emitter.remove_listener("e", &second);
        emitter.on("e", first);
        assert_eq!(capture.count(LEAK_WARNING), 2);
    });

    assert!(capture.contents().contains("max_listeners=1"));
}

#[test]
fn test_warning_rearmed_after_clear() {
    let capture = LogCapture::new();
    let log = CallLog::new();

    tracing::subscriber::with_default(capture.subscriber("warn"), || {
        let emitter: Emitter<str> =
            Emitter::with_config(EmitterConfig::new().with_max_listeners(1));
        emitter.on("e", log.listener("a"));
        emitter.on("e", log.listener("b"));

        emitter.remove_all_listeners("e");
        emitter.on("e", log.listener("a"));
        emitter.on("e", log.listener("b"));
    });

    assert_eq!(capture.count(LEAK_WARNING), 2);
}

#[test]
fn test_warning_disabled_by_zero_threshold() {
    let capture = LogCapture::new();
    let log = CallLog::new();

    tracing::subscriber::with_default(capture.subscriber("warn"), || {
        let emitter: Emitter<str> =
            Emitter::with_config(EmitterConfig::new().with_max_listeners(0));
        for _ in 0..50 {
            emitter.on("e", log.listener("l"));
        }
    });

    assert_eq!(capture.count(LEAK_WARNING), 0);
}
