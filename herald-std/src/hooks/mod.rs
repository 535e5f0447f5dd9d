//! Standard universal handlers.

pub mod logging;

pub use logging::LoggingHandler;
