//! The event emitter: listener storage, removal and snapshot dispatch.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::EmitterConfig;
use crate::listener::{Listener, ListenerFn};

struct State<A: ?Sized> {
    /// Event name to listeners, in registration order.
    listeners: BTreeMap<String, Vec<Listener<A>>>,
    /// Events that already triggered the max-listeners warning.
    leak_warned: BTreeSet<String>,
}

/// Synchronous, reentrant event emitter.
///
/// Listeners are registered per event name and invoked in registration order
/// by [`emit`](Self::emit). Dispatch iterates over a snapshot of the listener
/// sequence taken before the first listener runs, so listeners may freely
/// register, remove or emit on the same emitter:
///
/// - a listener added during an emit is not invoked by that emit,
/// - a listener removed during an emit is still invoked by that emit if it
///   was part of the snapshot.
///
/// No lock is held while listeners run. A panicking listener unwinds out of
/// `emit` and the remaining listeners of that dispatch are skipped; the
/// emitter itself stays consistent and usable.
///
/// `A` is the payload handed to each listener. The default, `[Value]`, is an
/// untyped variadic argument list.
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use herald_events::{Emitter, Listener};
///
/// let emitter: Emitter<str> = Emitter::new();
/// let greeted = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&greeted);
/// let on_greet: Listener<str> = Listener::new(move |_, message: &str| {
///     assert_eq!(message, "hi");
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// emitter.on("greet", on_greet.clone());
/// emitter.emit("greet", "hi");
/// emitter.remove_listener("greet", &on_greet);
/// emitter.emit("greet", "hi");
///
/// assert_eq!(greeted.load(Ordering::SeqCst), 1);
/// ```
pub struct Emitter<A: ?Sized = [Value]> {
    state: RwLock<State<A>>,
    config: EmitterConfig,
}

impl<A: ?Sized> Emitter<A> {
    /// Create an emitter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Create an emitter with the given configuration.
    #[must_use]
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            state: RwLock::new(State {
                listeners: BTreeMap::new(),
                leak_warned: BTreeSet::new(),
            }),
            config,
        }
    }

    /// The configuration this emitter was built with.
    #[must_use]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Append `listener` to the listeners of `event`.
    ///
    /// The same handle may be registered several times and is then invoked
    /// once per registration.
    pub fn add_listener(&self, event: &str, listener: Listener<A>) {
        let (count, first_overflow) = {
            let mut state = self.write_state();
            let listeners = state.listeners.entry(event.to_owned()).or_default();
            listeners.push(listener);
            let count = listeners.len();
            let first_overflow = self.config.exceeds_max_listeners(count)
                && state.leak_warned.insert(event.to_owned());
            (count, first_overflow)
        };

        debug!(event = %event, listener_count = count, "Listener registered");

        if first_overflow {
            warn!(
                event = %event,
                listener_count = count,
                max_listeners = self.config.max_listeners,
                "Possible listener leak: listener count exceeds max_listeners"
            );
        }
    }

    /// Alias for [`add_listener`](Self::add_listener).
    pub fn on(&self, event: &str, listener: Listener<A>) {
        self.add_listener(event, listener);
    }

    /// Remove the first registration of `listener` for `event`.
    ///
    /// Listeners are matched by identity (see [`Listener::ptr_eq`]). Returns
    /// `true` if a registration was removed; unknown events and listeners are
    /// ignored.
    pub fn remove_listener(&self, event: &str, listener: &Listener<A>) -> bool {
        let mut state = self.write_state();
        let Some(listeners) = state.listeners.get_mut(event) else {
            return false;
        };
        let Some(position) = listeners
            .iter()
            .position(|registered| Listener::ptr_eq(registered, listener))
        else {
            return false;
        };

        let removed = listeners.remove(position);
        let remaining = listeners.len();
        if !self.config.exceeds_max_listeners(remaining) {
            state.leak_warned.remove(event);
        }
        drop(state);
        // Dropped after the lock is released: the callback's captures may
        // call back into this emitter from their destructors.
        drop(removed);

        debug!(event = %event, listener_count = remaining, "Listener removed");
        true
    }

    /// Remove every listener of `event`.
    ///
    /// The event stays known with an empty listener sequence. An event that
    /// was never registered is left untouched.
    pub fn remove_all_listeners(&self, event: &str) {
        let mut state = self.write_state();
        let Some(listeners) = state.listeners.get_mut(event) else {
            return;
        };
        let cleared = std::mem::take(listeners);
        state.leak_warned.remove(event);
        drop(state);

        debug!(event = %event, removed = cleared.len(), "All listeners removed");
        drop(cleared);
    }

    /// Invoke every listener currently registered for `event` with `args`.
    ///
    /// Returns the number of listeners in the dispatch snapshot. A spent
    /// [`once`](Self::once) wrapper still counts even though it returns
    /// without calling the listener it wraps.
    ///
    /// # Panics
    ///
    /// A panic raised by a listener propagates to the caller and the
    /// listeners after it in this dispatch are not invoked.
    pub fn emit(&self, event: &str, args: &A) -> usize {
        let snapshot = {
            let state = self.read_state();
            match state.listeners.get(event) {
                Some(listeners) => listeners.clone(),
                None => Vec::new(),
            }
        };

        if snapshot.is_empty() {
            trace!(event = %event, "No listeners for event");
            return 0;
        }

        trace!(event = %event, listener_count = snapshot.len(), "Emitting event");

        for (index, listener) in snapshot.iter().enumerate() {
            trace!(event = %event, index, "Invoking listener");
            listener.call(self, args);
        }

        snapshot.len()
    }

    /// A copy of the listeners registered for `event`, in registration order.
    ///
    /// Mutating the returned vector does not affect the emitter.
    #[must_use]
    pub fn listeners(&self, event: &str) -> Vec<Listener<A>> {
        self.read_state()
            .listeners
            .get(event)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of listeners registered for `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.read_state().listeners.get(event).map_or(0, Vec::len)
    }

    /// Every event name known to the emitter, sorted.
    ///
    /// Includes events whose listeners were all removed or cleared.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.read_state().listeners.keys().cloned().collect()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State<A>> {
        self.state.read().unwrap_or_else(|e| {
            warn!("Emitter read lock poisoned, recovering");
            e.into_inner()
        })
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State<A>> {
        self.state.write().unwrap_or_else(|e| {
            warn!("Emitter lock poisoned, recovering");
            e.into_inner()
        })
    }
}

impl<A: ?Sized + 'static> Emitter<A> {
    /// Register `listener` for a single delivery of `event`.
    ///
    /// The returned wrapper is what gets registered: it removes itself before
    /// invoking `listener`, so later emits no longer see it. Passing the
    /// wrapper to [`remove_listener`](Self::remove_listener) cancels it before
    /// it fires. `listener` runs at most once even if a reentrant or
    /// concurrent emit already captured the wrapper in its snapshot.
    pub fn once(&self, event: &str, listener: Listener<A>) -> Listener<A> {
        let event_name = event.to_owned();
        let fired = AtomicBool::new(false);
        let handle: Arc<OnceLock<Weak<ListenerFn<A>>>> = Arc::new(OnceLock::new());

        let own_handle = Arc::clone(&handle);
        let wrapper: Listener<A> = Listener::new(move |emitter, args| {
            if fired.swap(true, Ordering::AcqRel) {
                return;
            }
            if let Some(this) = own_handle.get().and_then(Weak::upgrade) {
                emitter.remove_listener(&event_name, &Listener::from_arc(this));
            }
            listener.call(emitter, args);
        });
        // A weak self-reference keeps the wrapper free of a reference cycle.
        let _ = handle.set(Arc::downgrade(wrapper.as_arc()));

        self.add_listener(event, wrapper.clone());
        wrapper
    }
}

impl<A: ?Sized> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> std::fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let event_count = self.read_state().listeners.len();
        f.debug_struct("Emitter")
            .field("event_count", &event_count)
            .field("config", &self.config)
            .finish()
    }
}
