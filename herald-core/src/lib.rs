//! # herald-core
//!
//! Core types for the Herald named-event dispatcher.
//!
//! This crate has minimal dependencies and holds everything a dispatcher
//! implementation and its callers agree on, without the dispatcher itself.
//!
//! # Building Blocks
//!
//! ## Payloads ([`Payload`])
//!
//! Any `Send + Sync + 'static` value can travel with an event. Handlers
//! receive it by shared reference, so payloads never need to be `Clone`.
//!
//! ## Handles ([`Handler`], [`UniversalHandler`])
//!
//! A handle wraps a callback behind an `Arc`. Clones of a handle share its
//! identity; two handles built from identical closures do not. Registration
//! and removal match handles by identity only, the same way a reference
//! compares in a garbage-collected language.
//!
//! ## Outcomes ([`HandlerOutcome`])
//!
//! Callbacks may return `()` or a `Result`. An `Err` is handed back to the
//! emitter untouched.
//!
//! ## Names ([`EventName`], [`Scope`])
//!
//! Event names can be scoped behind a namespace prefix. A name carries an
//! optional override of the dispatcher's default prefixing behaviour.
//!
//! # Error Types
//!
//! - [`BoxError`] - Boxed error produced by a failing handler
//! - [`HandlerError`] - Transparent carrier of a handler failure

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod name;
mod outcome;
mod payload;

// Re-exports
pub use error::{BoxError, HandlerError};
pub use handler::{Handler, HandlerId, UniversalHandler};
pub use name::{EventName, PREFIX_SEPARATOR, Scope, resolve_name};
pub use outcome::HandlerOutcome;
pub use payload::Payload;
