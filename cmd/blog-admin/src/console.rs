//! Notifications for a terminal: printed to stderr as they happen.

use domains::{Notification, NotificationId, NotificationLevel, Notifier};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

#[derive(Default)]
pub struct ConsoleNotifier {
    next_id: AtomicU64,
    // persistent notifications not yet dismissed
    open: Mutex<BTreeMap<u64, String>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) -> NotificationId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let label = match notification.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "ok",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        eprintln!("{label}: {}: {}", notification.title, notification.description);

        if notification.persistent {
            if let Ok(mut open) = self.open.lock() {
                open.insert(id, notification.title);
            }
        }
        NotificationId(id)
    }

    fn dismiss(&self, id: NotificationId) {
        let removed = self.open.lock().ok().and_then(|mut open| open.remove(&id.0));
        if let Some(title) = removed {
            debug!(id = id.0, %title, "notification dismissed");
        }
    }
}
