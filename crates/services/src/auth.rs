//! # Authentication Store
//!
//! Login and logout on top of [`UserSessionStore`], plus the two cosmetic
//! flags the login form animates with.

use domains::{Credentials, UserIdentity};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::gateway::Gateway;
use crate::observable::{Observable, Subscription};
use crate::operations;
use crate::session::UserSessionStore;

/// Login form state. `is_showing_greeting` and `is_showing_blindfold` are
/// kept mutually exclusive by the focus handlers, not by the type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticating: bool,
    pub is_showing_greeting: bool,
    pub is_showing_blindfold: bool,
}

/// Derived authentication phase. A failed attempt lands back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Idle,
    Authenticating,
    Authenticated,
}

pub struct AuthenticationStore {
    gateway: Arc<Gateway>,
    session: Arc<UserSessionStore>,
    state: Observable<AuthState>,
}

/// Clears `is_authenticating` however the request ends, including when the
/// caller drops the future.
struct AuthenticatingGuard<'a> {
    state: &'a Observable<AuthState>,
}

impl Drop for AuthenticatingGuard<'_> {
    fn drop(&mut self) {
        self.state.update(|s| s.is_authenticating = false);
    }
}

impl AuthenticationStore {
    pub fn new(gateway: Arc<Gateway>, session: Arc<UserSessionStore>) -> Self {
        Self {
            gateway,
            session,
            state: Observable::default(),
        }
    }

    /// Sends the credentials to the API. On success the returned identity is
    /// persisted through the session store.
    ///
    /// Resolves `false` without a request while another attempt is pending.
    pub async fn authenticate(&self, credentials: &Credentials) -> bool {
        let started = self.state.update_if(|s| {
            if s.is_authenticating {
                return false;
            }
            s.is_showing_greeting = false;
            s.is_showing_blindfold = false;
            s.is_authenticating = true;
            true
        });
        if !started {
            warn!(user = %credentials.user_name, "authentication already in progress");
            return false;
        }

        let guard = AuthenticatingGuard { state: &self.state };
        let result = self
            .gateway
            .query::<UserIdentity>(
                &operations::AUTHENTICATE,
                json!({
                    "userName": credentials.user_name,
                    "password": credentials.password,
                }),
            )
            .await;
        drop(guard);

        match result {
            Ok(identity) => {
                info!(user = %identity.name, "authenticated");
                self.session.set_current_user(identity, true);
                true
            }
            Err(err) => {
                warn!(user = %credentials.user_name, error = %err, "authentication failed");
                false
            }
        }
    }

    /// Ends the session locally. The API is not contacted.
    pub fn logout(&self) {
        info!("logging out");
        self.session.remove();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn phase(&self) -> AuthPhase {
        if self.state.read(|s| s.is_authenticating) {
            AuthPhase::Authenticating
        } else if self.is_authenticated() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Idle
        }
    }

    pub fn session(&self) -> &Arc<UserSessionStore> {
        &self.session
    }

    pub fn set_showing_greeting(&self, showing: bool) {
        self.state.update(|s| s.is_showing_greeting = showing);
    }

    pub fn set_showing_blindfold(&self, showing: bool) {
        self.state.update(|s| s.is_showing_blindfold = showing);
    }

    pub fn on_name_focus(&self) {
        self.state.update(|s| {
            s.is_showing_blindfold = false;
            s.is_showing_greeting = true;
        });
    }

    pub fn on_password_focus(&self) {
        self.state.update(|s| {
            s.is_showing_greeting = false;
            s.is_showing_blindfold = true;
        });
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> Subscription<AuthState> {
        self.state.subscribe()
    }
}
