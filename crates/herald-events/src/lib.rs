//! Herald Events - In-process, synchronous event emitter.
//!
//! This crate provides:
//! - [`Emitter`], a registry mapping event names to ordered listener sequences
//! - [`Listener`], a cloneable callback handle compared by identity
//! - [`EmitterConfig`], tunables loadable from TOML
//!
//! # Dispatch model
//!
//! [`Emitter::emit`] copies the listener sequence of the event before invoking
//! anything, then calls every copied listener in registration order. Listeners
//! receive the emitter itself and may register, remove or emit while a
//! dispatch is in progress without affecting it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use herald_events::{Emitter, Listener};
//!
//! let emitter: Emitter<(String, u32)> = Emitter::new();
//! let log = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&log);
//! emitter.on(
//!     "scored",
//!     Listener::new(move |_, (player, points): &(String, u32)| {
//!         sink.lock().unwrap().push(format!("{player}:{points}"));
//!     }),
//! );
//!
//! emitter.emit("scored", &("ada".to_string(), 3));
//! assert_eq!(*log.lock().unwrap(), vec!["ada:3".to_string()]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod config;
mod emitter;
mod error;
mod listener;

pub use config::{DEFAULT_MAX_LISTENERS, EmitterConfig};
pub use emitter::Emitter;
pub use error::{ConfigError, ConfigResult};
pub use listener::{Listener, ListenerFn};
