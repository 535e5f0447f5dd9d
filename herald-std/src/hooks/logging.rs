//! Logging handler for event observation.

use herald_core::{Payload, UniversalHandler};
use std::fmt::Debug;

/// Logs every emitted event for observability.
///
/// Register the handle it builds as a universal handler. Each emission is
/// logged at `debug` level with its raw name and `Debug` payload when the
/// `tracing` feature is enabled, and ignored otherwise.
///
/// # Example
///
/// ```rust
/// use herald_std::{Dispatcher, hooks::LoggingHandler};
///
/// let dispatcher = Dispatcher::<u32>::new();
/// let logging = LoggingHandler::named("audit").handler();
/// dispatcher.register_universal(&logging);
/// dispatcher.emit("login", &7).unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHandler {
    name: &'static str,
}

impl LoggingHandler {
    /// Create a new `LoggingHandler` with a default name.
    pub fn new() -> Self {
        Self { name: "event" }
    }

    /// Create a new `LoggingHandler` with a custom name.
    ///
    /// The name is used in log messages to identify the dispatcher.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build a universal handler handle that logs through this configuration.
    pub fn handler<P: Payload + Debug>(self) -> UniversalHandler<P> {
        UniversalHandler::new(move |event: &str, payload: &P| {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(name = %self.name, event, ?payload, "Event emitted");
            }
            #[cfg(not(feature = "tracing"))]
            {
                let _ = (self.name, event, payload);
            }
        })
    }
}

impl Default for LoggingHandler {
    fn default() -> Self {
        Self::new()
    }
}
