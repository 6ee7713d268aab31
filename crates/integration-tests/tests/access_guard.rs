use domains::Credentials;
use integration_tests::{stores, RecordingNotifier, ScriptedTransport};
use serde_json::json;
use services::guard::{post_login_destination, LOGIN_ROUTE};
use services::GuardDecision;

#[tokio::test]
async fn guarded_route_opens_after_login() {
    let transport = ScriptedTransport::new();
    transport.reply("authenticate", json!({ "name": "a" }));
    let stores = stores(transport, RecordingNotifier::new());

    let decision = stores.guard.check("/list/article");
    let GuardDecision::Redirect { to, from } = decision else {
        panic!("expected a redirect, got {decision:?}");
    };
    assert_eq!(to, LOGIN_ROUTE);
    assert!(stores.guard.check(LOGIN_ROUTE).is_render());

    assert!(stores.auth.authenticate(&Credentials::new("a", "b")).await);
    let destination = post_login_destination(Some(from.as_str()));
    assert_eq!(destination, "/list/article");
    assert!(stores.guard.check(destination).is_render());

    stores.auth.logout();
    assert!(!stores.guard.check("/list/article").is_render());
}
