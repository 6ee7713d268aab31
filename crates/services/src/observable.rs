//! Observable state cells.
//!
//! Each store keeps its state in an [`Observable`]. Readers take snapshots;
//! subscribers hold a [`Subscription`] and are woken on every change.
//! Dropping the subscription unsubscribes.

use tokio::sync::watch;

pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Reads through a borrow without cloning. Keep `f` short: writers wait.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Mutates the state and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Mutates the state; subscribers are notified only when `f` returns true.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A scoped subscription to an [`Observable`].
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Waits for the next change and returns the new snapshot.
    /// Returns `None` once the owning store has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// True when a change happened since the last `changed()`.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_sees_latest_snapshot() {
        let cell = Observable::new(0u32);
        let mut sub = cell.subscribe();

        cell.update(|n| *n += 1);
        cell.update(|n| *n += 1);

        assert!(sub.has_changed());
        assert_eq!(sub.changed().await, Some(2));
        assert!(!sub.has_changed());
    }

    #[test]
    fn update_if_false_does_not_notify() {
        let cell = Observable::new(String::from("a"));
        let sub = cell.subscribe();

        assert!(!cell.update_if(|_| false));
        assert!(!sub.has_changed());
        assert!(cell.update_if(|s| {
            s.push('b');
            true
        }));
        assert!(sub.has_changed());
        assert_eq!(cell.snapshot(), "ab");
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let cell = Observable::new(1u8);
        let sub = cell.subscribe();
        assert_eq!(cell.subscriber_count(), 1);
        drop(sub);
        assert_eq!(cell.subscriber_count(), 0);
        cell.update(|n| *n = 2);
        assert_eq!(cell.read(|n| *n), 2);
    }

    #[tokio::test]
    async fn changed_returns_none_after_owner_drop() {
        let cell = Observable::new(1u8);
        let mut sub = cell.subscribe();
        drop(cell);
        assert_eq!(sub.changed().await, None);
    }
}
