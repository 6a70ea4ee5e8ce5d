//! Recording listeners.

use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use herald_events::Listener;

/// Shared, ordered record of listener invocations.
///
/// Clones share the same record, so a log can be captured by any number of
/// listeners and inspected afterwards. Tests that exercise panicking
/// listeners stay usable: a poisoned lock is recovered.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// All entries, in invocation order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of entries equal to `entry`.
    #[must_use]
    pub fn count(&self, entry: &str) -> usize {
        self.lock().iter().filter(|e| e.as_str() == entry).count()
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// A listener that records `tag` each time it is invoked.
    #[must_use]
    pub fn listener<A: ?Sized + 'static>(&self, tag: &str) -> Listener<A> {
        let log = self.clone();
        let tag = tag.to_owned();
        Listener::new(move |_, _| log.record(tag.clone()))
    }

    /// A listener that records `tag:{args:?}` each time it is invoked.
    #[must_use]
    pub fn recording_listener<A: ?Sized + Debug + 'static>(&self, tag: &str) -> Listener<A> {
        let log = self.clone();
        let tag = tag.to_owned();
        Listener::new(move |_, args: &A| log.record(format!("{tag}:{args:?}")))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
