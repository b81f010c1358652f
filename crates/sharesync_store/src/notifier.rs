//! Change notification for live queries.
//!
//! Every live query registers a closure that recomputes its result from the
//! store's state. After a write, the store hands its state to
//! [`ChangeNotifier::notify`] while still holding the write lock, so results
//! are published in write order.

use parking_lot::Mutex;
use sharesync_core::{live_channel, LiveQuery};

type Refresh<S> = Box<dyn Fn(&S) -> bool + Send + Sync>;

/// Distributes state changes to registered live queries.
pub(crate) struct ChangeNotifier<S> {
    subscribers: Mutex<Vec<Refresh<S>>>,
}

impl<S> ChangeNotifier<S> {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Registers `query` and returns a live view of its result over `state`.
    pub(crate) fn subscribe<T, Q>(&self, state: &S, query: Q) -> LiveQuery<T>
    where
        T: PartialEq + Send + Sync + 'static,
        Q: Fn(&S) -> Option<T> + Send + Sync + 'static,
    {
        let (publisher, live) = live_channel(query(state));
        self.subscribers.lock().push(Box::new(move |state| {
            if publisher.is_closed() {
                return false;
            }
            publisher.publish(query(state));
            true
        }));
        live
    }

    /// Recomputes every query, dropping those whose readers are gone.
    pub(crate) fn notify(&self, state: &S) {
        self.subscribers.lock().retain(|refresh| refresh(state));
    }

    /// Returns the number of registered queries.
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notify_republishes_changed_results() {
        let notifier = ChangeNotifier::new();
        let mut state = vec![1, 2, 3];
        let mut evens = notifier.subscribe(&state, |s: &Vec<i32>| {
            Some(s.iter().copied().filter(|v| v % 2 == 0).collect::<Vec<_>>())
        });
        assert_eq!(evens.snapshot_and_mark_seen(), Some(vec![2]));

        state.push(4);
        notifier.notify(&state);
        assert_eq!(evens.changed().await, Some(Some(vec![2, 4])));
    }

    #[test]
    fn dropped_queries_are_pruned() {
        let notifier = ChangeNotifier::new();
        let state = 0u8;
        let live = notifier.subscribe(&state, |s: &u8| Some(*s));
        assert_eq!(notifier.subscriber_count(), 1);

        drop(live);
        notifier.notify(&state);
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
