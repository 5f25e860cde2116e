//! Lock-free counters shared between request handlers and stream tasks

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Named atomic cell; clones observe the same value.
#[derive(Clone)]
struct Slot {
    name: &'static str,
    value: Arc<AtomicU64>,
}

impl Slot {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            value: Arc::new(AtomicU64::new(0)),
        }
    }

    fn load(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Only ever goes up
#[derive(Clone)]
pub struct Counter(Slot);

impl Counter {
    pub fn new(name: &'static str) -> Self {
        Self(Slot::new(name))
    }

    pub fn inc(&self) {
        self.0.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load()
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }
}

/// Level that rises and falls, such as open sessions
#[derive(Clone)]
pub struct Gauge(Slot);

impl Gauge {
    pub fn new(name: &'static str) -> Self {
        Self(Slot::new(name))
    }

    pub fn inc(&self) {
        self.0.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Saturates at zero.
    pub fn dec(&self) {
        let _ = self
            .0
            .value
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| v.checked_sub(1));
    }

    pub fn get(&self) -> u64 {
        self.0.load()
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }
}
