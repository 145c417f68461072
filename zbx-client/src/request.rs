//! Request id generation
//!
//! Requests are numbered from 1 upwards. Every clone of a client shares one
//! counter, so ids stay unique across tasks without taking a lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use zbx_core::Id;

/// Shared monotonic id counter
#[derive(Clone, Debug)]
pub struct RequestIdGenerator {
    counter: Arc<AtomicU64>,
}

impl RequestIdGenerator {
    /// Start a new sequence at 1
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Take the next id
    pub fn next_id(&self) -> Id {
        Id::from(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RequestIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
