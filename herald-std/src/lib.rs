//! # herald-std
//!
//! Standard implementation of the Herald named-event dispatcher.
//!
//! This crate provides:
//! - **Dispatch**: [`Dispatcher`] and its [`DispatcherConfig`]
//! - **Standard handlers**: [`hooks::LoggingHandler`]
//! - **Testing**: recording and counting handlers in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use herald_core;
pub use herald_core::{
    BoxError, EventName, Handler, HandlerError, HandlerId, HandlerOutcome, Payload, Scope,
    UniversalHandler,
};

// Modules
pub mod config;
pub mod dispatcher;
pub mod hooks;
pub mod testing;

pub use config::DispatcherConfig;
pub use dispatcher::Dispatcher;
