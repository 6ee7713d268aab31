//! # services
//!
//! The client-side store layer. Stores sit between a presentation layer and
//! the remote GraphQL API: presentation code calls store methods, stores go
//! through the [`Gateway`], and results land in observable state that
//! subscribers read as snapshots.
//!
//! Every store operation that talks to the API resolves to `bool` or
//! `Option<T>` instead of an error. Failures have already been surfaced to the
//! user through the [`domains::Notifier`] port by the time the call returns.

pub mod app;
pub mod article;
pub mod auth;
pub mod gateway;
pub mod guard;
pub mod in_flight;
pub mod layout;
pub mod observable;
pub mod operations;
pub mod session;

pub use app::AppStores;
pub use article::{ArticleListState, ArticleStore, EditMode, EditSession, PageQuery, Validity};
pub use auth::{AuthPhase, AuthState, AuthenticationStore};
pub use gateway::{Gateway, GatewayError};
pub use guard::{AccessGuard, GuardDecision};
pub use layout::LayoutPreferenceStore;
pub use observable::{Observable, Subscription};
pub use session::UserSessionStore;
