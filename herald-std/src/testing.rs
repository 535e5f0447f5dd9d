//! Testing utilities for Herald.
//!
//! This module provides handles whose effects can be inspected afterwards.
//!
//! # Features
//!
//! - [`Recorder`]: A named handler that records every payload it receives
//! - [`UniversalRecorder`]: A universal handler that records names and payloads
//! - [`Counter`]: A named handler that only counts invocations

use herald_core::{Handler, Payload, UniversalHandler};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recorder
// ============================================================================

/// A handler that records all payloads it receives.
///
/// Clones share both the recording and the handle identity.
///
/// # Example
///
/// ```rust
/// use herald_std::{Dispatcher, testing::Recorder};
///
/// let recorder = Recorder::<String>::new();
/// let dispatcher = Dispatcher::new();
/// dispatcher.register("greet", recorder.handler());
/// dispatcher.emit("greet", &"hello".to_string()).unwrap();
///
/// assert_eq!(recorder.events(), vec!["hello".to_string()]);
/// ```
pub struct Recorder<P: Payload + Clone> {
    events: Arc<Mutex<Vec<P>>>,
    handler: Handler<P>,
}

impl<P: Payload + Clone> Recorder<P> {
    /// Create a new recorder with an empty log.
    pub fn new() -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let handler = Handler::new(move |payload: &P| sink.lock().push(payload.clone()));
        Self { events, handler }
    }

    /// The handle to register.
    pub fn handler(&self) -> &Handler<P> {
        &self.handler
    }

    /// Get a clone of the recorded payloads.
    pub fn events(&self) -> Vec<P> {
        self.events.lock().clone()
    }

    /// Get the number of recorded payloads.
    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    /// Clear all recorded payloads.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<P: Payload + Clone> Default for Recorder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload + Clone> Clone for Recorder<P> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            handler: self.handler.clone(),
        }
    }
}

// ============================================================================
// Universal Recorder
// ============================================================================

/// A universal handler that records each raw event name with its payload.
pub struct UniversalRecorder<P: Payload + Clone> {
    events: Arc<Mutex<Vec<(String, P)>>>,
    handler: UniversalHandler<P>,
}

impl<P: Payload + Clone> UniversalRecorder<P> {
    /// Create a new recorder with an empty log.
    pub fn new() -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let handler = UniversalHandler::new(move |name: &str, payload: &P| {
            sink.lock().push((name.to_string(), payload.clone()))
        });
        Self { events, handler }
    }

    /// The handle to register.
    pub fn handler(&self) -> &UniversalHandler<P> {
        &self.handler
    }

    /// Get a clone of the recorded `(name, payload)` pairs.
    pub fn events(&self) -> Vec<(String, P)> {
        self.events.lock().clone()
    }

    /// Get only the recorded event names.
    pub fn names(&self) -> Vec<String> {
        self.events.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    /// Get the number of recorded emissions.
    pub fn count(&self) -> usize {
        self.events.lock().len()
    }
}

impl<P: Payload + Clone> Default for UniversalRecorder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload + Clone> Clone for UniversalRecorder<P> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            handler: self.handler.clone(),
        }
    }
}

// ============================================================================
// Counter
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust
/// use herald_std::{Dispatcher, testing::Counter};
///
/// let counter = Counter::<()>::new();
/// let dispatcher = Dispatcher::new();
/// dispatcher.register_once("boot", counter.handler());
/// dispatcher.emit("boot", &()).unwrap().emit("boot", &()).unwrap();
///
/// assert_eq!(counter.count(), 1);
/// ```
pub struct Counter<P: Payload> {
    count: Arc<AtomicUsize>,
    handler: Handler<P>,
}

impl<P: Payload> Counter<P> {
    /// Create a new counter starting at zero.
    pub fn new() -> Self {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = count.clone();
        let handler = Handler::new(move |_: &P| {
            hits.fetch_add(1, Ordering::SeqCst);
        });
        Self { count, handler }
    }

    /// The handle to register.
    pub fn handler(&self) -> &Handler<P> {
        &self.handler
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<P: Payload> Default for Counter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> Clone for Counter<P> {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            handler: self.handler.clone(),
        }
    }
}
