//! Listener handles.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::emitter::Emitter;

/// Closure type stored behind a [`Listener`].
///
/// Listeners receive the emitter that is dispatching (so they can register,
/// remove or emit reentrantly) and a shared reference to the payload.
pub type ListenerFn<A> = dyn Fn(&Emitter<A>, &A) + Send + Sync;

/// A cloneable handle to a registered callback.
///
/// Identity is the identity of the shared allocation: every clone of a handle
/// compares equal to the others, while two handles built from separate
/// closures never compare equal, even when the closures have identical bodies.
/// [`Emitter::remove_listener`] matches on this identity.
pub struct Listener<A: ?Sized = [Value]> {
    callback: Arc<ListenerFn<A>>,
}

impl<A: ?Sized> Listener<A> {
    /// Wrap a callback in a new handle with a fresh identity.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Emitter<A>, &A) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Returns `true` if both handles refer to the same registration target.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.callback, &other.callback)
    }

    pub(crate) fn call(&self, emitter: &Emitter<A>, args: &A) {
        (self.callback)(emitter, args);
    }

    pub(crate) fn from_arc(callback: Arc<ListenerFn<A>>) -> Self {
        Self { callback }
    }

    pub(crate) fn as_arc(&self) -> &Arc<ListenerFn<A>> {
        &self.callback
    }
}

impl<A: ?Sized> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<A: ?Sized> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<A: ?Sized> Eq for Listener<A> {}

impl<A: ?Sized> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("addr", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}
