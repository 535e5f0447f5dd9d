//! Error types for Herald.
//!
//! Dispatch itself cannot fail. The only error that ever leaves an emission
//! is the one a handler produced:
//!
//! - [`BoxError`] - What a handler returns when it fails
//! - [`HandlerError`] - The same error as seen by the emitter

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure raised by a handler during emission.
///
/// The wrapper is transparent: `Display` and `source()` are those of the
/// handler's own error, and [`HandlerError::into_inner`] returns it as-is.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct HandlerError(BoxError);

impl HandlerError {
    /// Borrow the error the handler returned.
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.0
    }

    /// Recover the error the handler returned.
    pub fn into_inner(self) -> BoxError {
        self.0
    }

    /// Attempt to downcast the handler's error to a concrete type.
    pub fn downcast_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl From<BoxError> for HandlerError {
    fn from(err: BoxError) -> Self {
        HandlerError(err)
    }
}
