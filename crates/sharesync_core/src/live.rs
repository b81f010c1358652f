//! Live queries: a latest-value subscription over cached rows.
//!
//! A [`LivePublisher`] is owned by the store; every write that changes the
//! result of a query republishes it. A [`LiveQuery`] is handed to readers.
//! Delivery keeps only the latest value: a slow reader observes the most
//! recent snapshot, never a stale queue of intermediate ones.

use tokio::sync::watch;

/// Creates a connected publisher/query pair.
///
/// `initial` is `None` when the first value is not available yet.
pub fn live_channel<T>(initial: Option<T>) -> (LivePublisher<T>, LiveQuery<T>) {
    let (tx, rx) = watch::channel(initial);
    (LivePublisher { tx }, LiveQuery { rx })
}

/// Write side of a live query.
#[derive(Debug)]
pub struct LivePublisher<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T: PartialEq> LivePublisher<T> {
    /// Publishes `value` if it differs from the current one.
    ///
    /// `None` publishes "no row". Returns true if readers were notified.
    pub fn publish(&self, value: Option<T>) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Returns true once every reader has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Read side of a live query.
#[derive(Debug, Clone)]
pub struct LiveQuery<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T: Clone> LiveQuery<T> {
    /// Returns the current value without marking it seen.
    pub fn snapshot(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Returns the current value and marks it seen.
    pub fn snapshot_and_mark_seen(&mut self) -> Option<T> {
        self.rx.borrow_and_update().clone()
    }

    /// Waits for the next unseen value.
    ///
    /// Returns `None` once the publisher is gone and no unseen value remains.
    pub async fn changed(&mut self) -> Option<Option<T>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
