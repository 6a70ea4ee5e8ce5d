//! Herald Test - Shared test utilities for Herald crates.
//!
//! This crate provides recording listeners and logging helpers that can be
//! used across Herald crates as a dev-dependency.
//!
//! # Usage
//!
//! ```rust
//! use herald_events::Emitter;
//! use herald_test::CallLog;
//!
//! let emitter: Emitter<str> = Emitter::new();
//! let log = CallLog::new();
//!
//! emitter.on("greet", log.recording_listener("first"));
//! emitter.on("greet", log.listener("second"));
//! emitter.emit("greet", "hi");
//!
//! assert_eq!(log.entries(), vec!["first:\"hi\"", "second"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod harness;
pub mod recorder;

pub use harness::*;
pub use recorder::*;
