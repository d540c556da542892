//! Local reactive caches mirroring remote entity lists and selections.
//!
//! Stores are plain structs; `Shared<S>` adds the subscribe/notify surface.
//! Mutation happens strictly after remote confirmation (the access layer's
//! responsibility), so a store never holds state the backend has rejected.

mod finance_store;
mod project_store;
mod task_store;
mod user_store;

pub use finance_store::FinanceStore;
pub use project_store::ProjectStore;
pub use task_store::TaskStore;
pub use user_store::UserStore;

use std::sync::Arc;

use parking_lot::RwLock;

type Subscriber<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Shared handle around a store with an explicit observer interface.
/// Every mutation through `update` notifies subscribers after the closure
/// has run, with the store's new state.
pub struct Shared<S> {
    inner: Arc<RwLock<S>>,
    subscribers: Arc<RwLock<Vec<Subscriber<S>>>>,
}

impl<S> Clone for Shared<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<S: Default> Default for Shared<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Shared<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn subscribe(&self, subscriber: impl Fn(&S) + Send + Sync + 'static) {
        self.subscribers.write().push(Box::new(subscriber));
    }

    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let result = f(&mut self.inner.write());
        let guard = self.inner.read();
        for subscriber in self.subscribers.read().iter() {
            subscriber(&guard);
        }
        result
    }
}

pub type SharedTaskStore = Shared<TaskStore>;
pub type SharedProjectStore = Shared<ProjectStore>;
pub type SharedFinanceStore = Shared<FinanceStore>;
pub type SharedUserStore = Shared<UserStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_update_notifies_subscribers() {
        let shared: Shared<Counter> = Shared::default();
        let notified = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&notified);
        shared.subscribe(move |counter| {
            assert_eq!(counter.value, 7);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        shared.update(|counter| counter.value = 7);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_read_does_not_notify() {
        let shared: Shared<Counter> = Shared::default();
        let notified = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&notified);
        shared.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let value = shared.read(|counter| counter.value);
        assert_eq!(value, 0);
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }
}
