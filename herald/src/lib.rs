//! # herald - Named-Event Dispatcher
//!
//! `herald` is a minimal, synchronous publish/subscribe dispatcher. Callers
//! register handlers under event names and later emit a name with a payload
//! to notify every matching handler.
//!
//! ## Quick Start
//!
//! ```rust
//! use herald::prelude::*;
//!
//! let dispatcher = Dispatcher::with_prefix("orders", true);
//!
//! let shipped = Handler::new(|id: &u64| println!("order {id} shipped"));
//! let audit = UniversalHandler::new(|name: &str, id: &u64| println!("{name}: {id}"));
//!
//! dispatcher
//!     .register("shipped", &shipped)
//!     .register_universal(&audit)
//!     .emit("shipped", &1001)?;
//! # Ok::<(), herald::HandlerError>(())
//! ```
//!
//! ## Names and Prefixes
//!
//! A dispatcher built with a namespace prefix always emits under
//! `"{prefix}:{name}"`. Registration applies the prefix when the dispatcher
//! has `auto_prefix` set, or when the name asks for it explicitly with
//! [`EventName::prefixed`]. Universal handlers always see the raw name.
//!
//! ## Single-Shot Handlers
//!
//! [`Dispatcher::register_once`] retires a handler right after its first
//! invocation, before the next handler of the same emission runs.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Errors
    BoxError,
    // Names
    EventName,
    // Handles
    Handler,
    HandlerError,
    HandlerId,
    HandlerOutcome,
    PREFIX_SEPARATOR,
    // Payload
    Payload,
    Scope,
    UniversalHandler,
    resolve_name,
};

pub use herald_std::{Dispatcher, DispatcherConfig};

/// Standard universal handlers.
pub mod hooks {
    pub use herald_std::hooks::LoggingHandler;
}

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{Counter, Recorder, UniversalRecorder};
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Dispatcher, DispatcherConfig, EventName, Handler, HandlerError, Scope, UniversalHandler,
    };
}
