#![allow(dead_code)]

use herald::{Handler, UniversalHandler};
use parking_lot::Mutex;
use std::{fmt, sync::Arc};

// ============================================================================
// Test Payloads
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: u64,
    pub total: u32,
}

impl Order {
    pub fn new(id: u64) -> Self {
        Self { id, total: 0 }
    }
}

// ============================================================================
// Test Errors
// ============================================================================

#[derive(Debug, PartialEq)]
pub struct Rejected(pub u64);

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order {} rejected", self.0)
    }
}

impl std::error::Error for Rejected {}

// ============================================================================
// Order Recording
// ============================================================================

/// Shared log of which handlers ran, in order.
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A handler that appends `tag` to `log` when invoked.
pub fn tagged<P: Send + Sync + 'static>(log: &CallLog, tag: &'static str) -> Handler<P> {
    let log = log.clone();
    Handler::new(move |_: &P| log.lock().push(tag))
}

/// A universal handler that appends `tag` to `log` when invoked.
pub fn tagged_universal<P: Send + Sync + 'static>(
    log: &CallLog,
    tag: &'static str,
) -> UniversalHandler<P> {
    let log = log.clone();
    UniversalHandler::new(move |_: &str, _: &P| log.lock().push(tag))
}

pub fn calls(log: &CallLog) -> Vec<&'static str> {
    log.lock().clone()
}
