//! Asset identifier allocation.
//!
//! Identifiers name the generated files. They are handed out once per
//! rendered formula and never reused within a run, even across documents.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out asset identifiers.
pub trait AssetIds {
    fn next_id(&mut self) -> u64;
}

/// Counter for single-threaded runs, starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl AssetIds for SequentialIds {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Counter that can be cloned into several workers; all clones draw from
/// the same sequence.
#[derive(Debug, Clone)]
pub struct SharedIds {
    next: Arc<AtomicU64>,
}

impl Default for SharedIds {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedIds {
    pub fn new() -> Self {
        Self {
            next: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl AssetIds for SharedIds {
    fn next_id(&mut self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
