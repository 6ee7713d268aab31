//! # Store Aggregator
//!
//! Builds every store once around the injected ports. The binary owns the
//! result behind an `Arc` and hands it to whatever needs a store.

use domains::{GraphqlTransport, KeyValueStorage, LayoutSettings, Notifier};
use std::sync::Arc;
use tracing::info;

use crate::article::ArticleStore;
use crate::auth::AuthenticationStore;
use crate::gateway::Gateway;
use crate::guard::AccessGuard;
use crate::layout::LayoutPreferenceStore;
use crate::session::UserSessionStore;

pub struct AppStores {
    pub gateway: Arc<Gateway>,
    pub user: Arc<UserSessionStore>,
    pub auth: Arc<AuthenticationStore>,
    pub articles: Arc<ArticleStore>,
    pub layout: Arc<LayoutPreferenceStore>,
    pub guard: AccessGuard,
}

impl AppStores {
    pub fn new(
        transport: Arc<dyn GraphqlTransport>,
        storage: Arc<dyn KeyValueStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let gateway = Arc::new(Gateway::new(transport, notifier));
        let user = Arc::new(UserSessionStore::restore(storage));
        let auth = Arc::new(AuthenticationStore::new(gateway.clone(), user.clone()));
        let articles = Arc::new(ArticleStore::new(gateway.clone()));
        let layout = Arc::new(LayoutPreferenceStore::new(LayoutSettings::default()));
        let guard = AccessGuard::new(auth.clone());

        info!(authenticated = user.is_authenticated(), "stores initialised");

        Self {
            gateway,
            user,
            auth,
            articles,
            layout,
            guard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{MockGraphqlTransport, MockKeyValueStorage, MockNotifier};

    #[test]
    fn stores_share_one_session() {
        let mut storage = MockKeyValueStorage::new();
        storage
            .expect_get()
            .returning(|_| Ok(Some(r#"{"name":"admin","nickName":"Root"}"#.to_string())));

        let stores = AppStores::new(
            Arc::new(MockGraphqlTransport::new()),
            Arc::new(storage),
            Arc::new(MockNotifier::new()),
        );

        assert!(stores.auth.is_authenticated());
        assert!(Arc::ptr_eq(stores.auth.session(), &stores.user));
        assert!(stores.guard.check("/articles").is_render());
    }
}
