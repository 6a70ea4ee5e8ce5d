//! Prelude module - commonly used types for convenient import.
//!
//! Use `use herald_events::prelude::*;` to import all essential types.

// Emitter
pub use crate::{Emitter, Listener, ListenerFn};

// Configuration
pub use crate::{ConfigError, ConfigResult, DEFAULT_MAX_LISTENERS, EmitterConfig};
