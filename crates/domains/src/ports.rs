//! # Ports
//!
//! Any adapter must implement these traits to be wired into the stores.

use async_trait::async_trait;

use crate::errors::{SigningError, StorageError, TransportError};
use crate::models::{AuthHeaders, GraphqlRequest, GraphqlResponse, Notification, NotificationId};

/// Moves one GraphQL request to the API and returns the raw envelope.
///
/// Implementations attach authentication headers and must not cache
/// responses. Application errors inside the envelope are returned as `Ok`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn execute(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError>;
}

/// Durable string key-value storage (the client's "local storage").
/// Writes are synchronous.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// User-facing notification surface (toasts in a UI, stderr in a console).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification) -> NotificationId;
    /// Dismissing an unknown or already dismissed id is a no-op.
    fn dismiss(&self, id: NotificationId);
}

/// Produces fresh client-authentication headers for one request.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RequestSigner: Send + Sync {
    fn sign(&self) -> Result<AuthHeaders, SigningError>;
}
