//! # User Session Store
//!
//! Owns the current [`UserIdentity`] and mirrors it to durable storage under
//! [`USER_STORAGE_KEY`]. Authentication status is always derived from the
//! identity, never stored on its own.

use domains::{KeyValueStorage, StorageError, UserIdentity};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::observable::{Observable, Subscription};

/// Durable storage key holding the JSON-encoded identity.
pub const USER_STORAGE_KEY: &str = "appUser";

pub struct UserSessionStore {
    storage: Arc<dyn KeyValueStorage>,
    current: Observable<UserIdentity>,
}

impl UserSessionStore {
    /// Builds the store from whatever identity durable storage holds.
    /// A missing, unreadable or corrupt entry yields the empty identity.
    pub fn restore(storage: Arc<dyn KeyValueStorage>) -> Self {
        let identity = read_persisted(storage.as_ref());
        debug!(authenticated = identity.is_authenticated(), "restored user session");
        Self {
            storage,
            current: Observable::new(identity),
        }
    }

    pub fn current_user(&self) -> UserIdentity {
        self.current.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read(UserIdentity::is_authenticated)
    }

    /// Replaces the in-memory identity; when `persist` is set it is written to
    /// durable storage before this returns.
    pub fn set_current_user(&self, identity: UserIdentity, persist: bool) {
        self.current.update(|current| *current = identity);
        if persist {
            if let Err(err) = self.persist_current_user() {
                error!(error = %err, "failed to persist user session");
            }
        }
    }

    pub fn set_user_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.current.update(|current| current.name = name);
    }

    pub fn set_user_nick_name(&self, nick_name: impl Into<String>) {
        let nick_name = nick_name.into();
        self.current.update(|current| current.nick_name = Some(nick_name));
    }

    pub fn persist_current_user(&self) -> Result<(), StorageError> {
        let encoded = self
            .current
            .read(serde_json::to_string)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(USER_STORAGE_KEY, &encoded)
    }

    /// Clears the identity in memory and in durable storage.
    pub fn remove(&self) {
        self.current.update(|current| *current = UserIdentity::empty());
        if let Err(err) = self.storage.remove(USER_STORAGE_KEY) {
            error!(error = %err, "failed to clear persisted user session");
        }
    }

    pub fn subscribe(&self) -> Subscription<UserIdentity> {
        self.current.subscribe()
    }
}

/// Reads the persisted identity, falling back to the empty identity.
pub fn read_persisted(storage: &dyn KeyValueStorage) -> UserIdentity {
    let raw = match storage.get(USER_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return UserIdentity::empty(),
        Err(err) => {
            warn!(error = %err, "could not read persisted user session");
            return UserIdentity::empty();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(error = %err, "discarding corrupt persisted user session");
        UserIdentity::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::MockKeyValueStorage;

    #[test]
    fn corrupt_entry_restores_empty_identity() {
        let mut storage = MockKeyValueStorage::new();
        storage
            .expect_get()
            .withf(|key| key == USER_STORAGE_KEY)
            .returning(|_| Ok(Some("{not json".to_string())));

        let store = UserSessionStore::restore(Arc::new(storage));
        assert_eq!(store.current_user(), UserIdentity::empty());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn unreadable_storage_restores_empty_identity() {
        let mut storage = MockKeyValueStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(StorageError::Io("permission denied".into())));

        let store = UserSessionStore::restore(Arc::new(storage));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn set_without_persist_does_not_touch_storage() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage.expect_set().never();

        let store = UserSessionStore::restore(Arc::new(storage));
        store.set_current_user(UserIdentity::new("a", None), false);
        assert!(store.is_authenticated());
    }

    #[test]
    fn set_with_persist_writes_json() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .withf(|key, value| key == USER_STORAGE_KEY && value == r#"{"name":"a","nickName":"Ace"}"#)
            .times(1)
            .returning(|_, _| Ok(()));

        let store = UserSessionStore::restore(Arc::new(storage));
        store.set_current_user(UserIdentity::new("a", Some("Ace".into())), true);
    }

    #[test]
    fn storage_write_failure_still_updates_memory() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, _| Err(StorageError::Io("disk full".into())));

        let store = UserSessionStore::restore(Arc::new(storage));
        store.set_current_user(UserIdentity::new("a", None), true);
        assert_eq!(store.current_user().name, "a");
    }

    #[test]
    fn remove_clears_memory_and_storage() {
        let mut storage = MockKeyValueStorage::new();
        storage
            .expect_get()
            .returning(|_| Ok(Some(r#"{"name":"a"}"#.to_string())));
        storage
            .expect_remove()
            .withf(|key| key == USER_STORAGE_KEY)
            .times(1)
            .returning(|_| Ok(()));

        let store = UserSessionStore::restore(Arc::new(storage));
        assert!(store.is_authenticated());
        store.remove();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn field_setters_notify_subscribers() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_get().returning(|_| Ok(None));

        let store = UserSessionStore::restore(Arc::new(storage));
        let sub = store.subscribe();
        store.set_user_name("gian");
        store.set_user_nick_name("G");
        assert!(sub.has_changed());
        assert_eq!(sub.current().display_name(), "G");
    }
}
