//! Write counters for the in-memory stores.

use std::sync::atomic::{AtomicU64, Ordering};

/// Store statistics.
///
/// All counters are atomic and can be read while writes are in progress.
/// One call counts once, however many rows it touches.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Insert calls.
    inserts: AtomicU64,
    /// Single-row update calls.
    updates: AtomicU64,
    /// Scope replace calls.
    replaces: AtomicU64,
    /// Delete calls (single row or scope).
    deletes: AtomicU64,
    /// Live queries opened.
    live_queries: AtomicU64,
}

impl StoreStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_replace(&self) {
        self.replaces.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_live_query(&self) {
        self.live_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of insert calls.
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Returns the number of update calls.
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Returns the number of replace calls.
    pub fn replaces(&self) -> u64 {
        self.replaces.load(Ordering::Relaxed)
    }

    /// Returns the number of delete calls.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the number of live queries opened.
    pub fn live_queries(&self) -> u64 {
        self.live_queries.load(Ordering::Relaxed)
    }

    /// Returns the total number of write calls.
    pub fn writes(&self) -> u64 {
        self.inserts() + self.updates() + self.replaces() + self.deletes()
    }
}
