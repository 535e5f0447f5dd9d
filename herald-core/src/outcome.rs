//! Handler return value conversion.

use crate::error::BoxError;

/// Trait for converting a callback's return value into a dispatch outcome.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<T, E>` → delegates to `T`, or hands the error to the emitter
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a handler",
    label = "handlers must return `()` or `Result<(), E>`",
    note = "The error type of a fallible handler must convert into `BoxError`."
)]
pub trait HandlerOutcome {
    /// Convert the return value into success or a boxed failure.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl HandlerOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> HandlerOutcome for Result<T, E>
where
    T: HandlerOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}
