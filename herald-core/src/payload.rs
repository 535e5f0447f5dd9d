//! Payload trait for event data.

/// A marker trait for values carried by an emitted event.
///
/// Payloads must be `Send + Sync + 'static` so a dispatcher can be shared
/// between threads. Every such type is a payload.
///
/// # Example
///
/// ```rust
/// use herald_core::Payload;
///
/// struct Reading { celsius: f32 }
///
/// fn accepts<P: Payload>(_: &P) {}
/// accepts(&Reading { celsius: 21.5 });
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Payload",
    label = "must be `Send + Sync + 'static`",
    note = "Event payloads in Herald must be thread-safe and static."
)]
pub trait Payload: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Payload for T {}
