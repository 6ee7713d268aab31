//! # Access Guard
//!
//! Decides whether a route renders or redirects to the login page. The
//! decision itself is a pure function of the route and the authentication
//! state; [`AccessGuard`] only wires it to the live store.

use std::sync::Arc;
use tracing::debug;

use crate::auth::AuthenticationStore;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render { route: String },
    /// `from` is the originally requested location, kept for after login.
    Redirect { to: String, from: String },
}

impl GuardDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render { .. })
    }
}

pub fn is_public(route: &str) -> bool {
    route == LOGIN_ROUTE
}

pub fn guard_route(route: &str, is_authenticated: bool) -> GuardDecision {
    if is_authenticated || is_public(route) {
        GuardDecision::Render {
            route: route.to_string(),
        }
    } else {
        GuardDecision::Redirect {
            to: LOGIN_ROUTE.to_string(),
            from: route.to_string(),
        }
    }
}

/// Where to go after a successful login: the preserved location, or home.
pub fn post_login_destination(from: Option<&str>) -> &str {
    match from {
        Some(route) if !route.is_empty() && !is_public(route) => route,
        _ => HOME_ROUTE,
    }
}

pub struct AccessGuard {
    auth: Arc<AuthenticationStore>,
}

impl AccessGuard {
    pub fn new(auth: Arc<AuthenticationStore>) -> Self {
        Self { auth }
    }

    pub fn check(&self, route: &str) -> GuardDecision {
        let decision = guard_route(route, self.auth.is_authenticated());
        debug!(%route, ?decision, "route guarded");
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_request_redirects_with_origin() {
        assert_eq!(
            guard_route("/articles", false),
            GuardDecision::Redirect {
                to: "/login".into(),
                from: "/articles".into(),
            }
        );
    }

    #[test]
    fn login_route_is_public() {
        assert!(guard_route(LOGIN_ROUTE, false).is_render());
    }

    #[test]
    fn authenticated_request_renders() {
        assert_eq!(
            guard_route("/articles", true),
            GuardDecision::Render {
                route: "/articles".into()
            }
        );
    }

    #[test]
    fn destination_falls_back_to_home() {
        assert_eq!(post_login_destination(Some("/articles")), "/articles");
        assert_eq!(post_login_destination(None), HOME_ROUTE);
        assert_eq!(post_login_destination(Some("")), HOME_ROUTE);
        assert_eq!(post_login_destination(Some(LOGIN_ROUTE)), HOME_ROUTE);
    }
}
