//! Observable state cell.
//!
//! The camera and the viewport size each live in a [`StateCell`]. The owner
//! is the only writer; UI binding layers subscribe and re-render on change.
//! Nothing here knows about a particular rendering or reactivity system.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::fmt;

/// Handle returned by [`StateCell::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// An owned value that notifies subscribers when it changes.
pub struct StateCell<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.value)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T: Default + PartialEq> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> StateCell<T> {
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: PartialEq> StateCell<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { value, subscribers: Vec::new(), next_id: 0 }
    }

    /// Current value, read directly with no batching delay.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value. Subscribers run only if it actually changed.
    ///
    /// Returns whether a change was published.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.notify();
        true
    }

    /// Mutate in place, then publish if the result differs from before.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> bool
    where
        T: Clone,
    {
        let mut next = self.value.clone();
        f(&mut next);
        self.set(next)
    }

    /// Register a callback invoked with the new value after every change.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback(&self.value);
        }
    }
}
