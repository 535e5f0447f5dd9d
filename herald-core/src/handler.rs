//! # Handler Handles
//!
//! A handle owns a callback behind an `Arc` and is the unit of registration.
//!
//! # Identity
//!
//! Handles compare by identity, never by behaviour. Cloning a handle yields
//! the same identity, so the clone can later be used to unregister it. Two
//! handles created from the same closure body are distinct.
//!
//! Identity is the address of the shared allocation. A dispatcher holds a
//! clone of every registered handle, so the address of a registered handle
//! cannot be reused while it stays registered.
//!
//! # Usage Patterns
//!
//! 1. **Infallible closure**: `Handler::new(|n: &u32| println!("{n}"))`
//! 2. **Fallible closure**: `Handler::new(|n: &u32| check(*n))` where `check`
//!    returns `Result<(), E>`
//! 3. **Every event**: `UniversalHandler::new(|name: &str, n: &u32| ...)`

use crate::{error::BoxError, outcome::HandlerOutcome, payload::Payload};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Stable identity of a handle.
///
/// Obtained from [`Handler::id`] or [`UniversalHandler::id`]. Equal ids mean
/// the two handles are clones of one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

impl HandlerId {
    fn of<T: ?Sized>(shared: &Arc<T>) -> Self {
        HandlerId(Arc::as_ptr(shared).cast::<()>() as usize)
    }
}

type NamedFn<P> = dyn Fn(&P) -> Result<(), BoxError> + Send + Sync;
type UniversalFn<P> = dyn Fn(&str, &P) -> Result<(), BoxError> + Send + Sync;

/// A handler registered under an event name.
///
/// Receives only the payload of each matching emission.
pub struct Handler<P: Payload> {
    callback: Arc<NamedFn<P>>,
}

impl<P: Payload> Handler<P> {
    /// Wrap a callback into a new handle with a fresh identity.
    pub fn new<F, R>(callback: F) -> Self
    where
        F: Fn(&P) -> R + Send + Sync + 'static,
        R: HandlerOutcome,
    {
        Self {
            callback: Arc::new(move |payload: &P| callback(payload).into_outcome()),
        }
    }

    /// Invoke the callback.
    pub fn call(&self, payload: &P) -> Result<(), BoxError> {
        (self.callback)(payload)
    }

    /// The identity shared by this handle and its clones.
    pub fn id(&self) -> HandlerId {
        HandlerId::of(&self.callback)
    }
}

/// A handler invoked for every emitted event.
///
/// Receives the unresolved event name alongside the payload.
pub struct UniversalHandler<P: Payload> {
    callback: Arc<UniversalFn<P>>,
}

impl<P: Payload> UniversalHandler<P> {
    /// Wrap a callback into a new handle with a fresh identity.
    pub fn new<F, R>(callback: F) -> Self
    where
        F: Fn(&str, &P) -> R + Send + Sync + 'static,
        R: HandlerOutcome,
    {
        Self {
            callback: Arc::new(move |name: &str, payload: &P| {
                callback(name, payload).into_outcome()
            }),
        }
    }

    /// Invoke the callback.
    pub fn call(&self, name: &str, payload: &P) -> Result<(), BoxError> {
        (self.callback)(name, payload)
    }

    /// The identity shared by this handle and its clones.
    pub fn id(&self) -> HandlerId {
        HandlerId::of(&self.callback)
    }
}

macro_rules! impl_identity {
    ($handle:ident) => {
        impl<P: Payload> Clone for $handle<P> {
            fn clone(&self) -> Self {
                Self {
                    callback: Arc::clone(&self.callback),
                }
            }
        }

        impl<P: Payload> PartialEq for $handle<P> {
            fn eq(&self, other: &Self) -> bool {
                self.id() == other.id()
            }
        }

        impl<P: Payload> Eq for $handle<P> {}

        impl<P: Payload> Hash for $handle<P> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id().hash(state);
            }
        }

        impl<P: Payload> fmt::Debug for $handle<P> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($handle))
                    .field("id", &self.id())
                    .finish()
            }
        }
    };
}

impl_identity!(Handler);
impl_identity!(UniversalHandler);
