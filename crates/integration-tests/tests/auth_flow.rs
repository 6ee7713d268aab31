use domains::{ApiError, Credentials, TransportError};
use integration_tests::{stores, RecordingNotifier, ScriptedTransport};
use serde_json::json;
use services::gateway::NETWORK_ERROR_TITLE;
use services::AuthPhase;

#[tokio::test]
async fn login_persists_identity() {
    let transport = ScriptedTransport::new();
    transport.reply("authenticate", json!({ "name": "a" }));
    let notifier = RecordingNotifier::new();
    let stores = stores(transport.clone(), notifier.clone());

    assert!(stores.auth.authenticate(&Credentials::new("a", "b")).await);
    assert!(stores.auth.is_authenticated());
    assert_eq!(stores.user.current_user().name, "a");

    let sent = transport.requests_for("authenticate");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].variables, json!({ "userName": "a", "password": "b" }));
    assert!(notifier.titles().is_empty());
}

#[tokio::test]
async fn logout_always_signs_out() {
    let transport = ScriptedTransport::new();
    transport.reply("authenticate", json!({ "name": "a", "nickName": "A" }));
    let stores = stores(transport.clone(), RecordingNotifier::new());

    stores.auth.logout();
    assert!(!stores.auth.is_authenticated());

    assert!(stores.auth.authenticate(&Credentials::new("a", "b")).await);
    stores.auth.logout();
    assert!(!stores.auth.is_authenticated());
    assert_eq!(stores.auth.phase(), AuthPhase::Idle);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn rejected_credentials_surface_api_error() {
    let transport = ScriptedTransport::new();
    transport.reply_errors(
        "authenticate",
        vec![ApiError::new("wrong password").with_code("UNAUTHENTICATED")],
    );
    let notifier = RecordingNotifier::new();
    let stores = stores(transport, notifier.clone());

    assert!(!stores.auth.authenticate(&Credentials::new("a", "x")).await);
    assert!(!stores.auth.is_authenticated());
    assert!(!stores.auth.snapshot().is_authenticating);
    assert_eq!(notifier.titles(), vec!["UNAUTHENTICATED"]);
}

#[tokio::test]
async fn network_failure_notifies_once() {
    let transport = ScriptedTransport::new();
    transport.fail("authenticate", TransportError::Request("connection refused".into()));
    let notifier = RecordingNotifier::new();
    let stores = stores(transport, notifier.clone());

    assert!(!stores.auth.authenticate(&Credentials::new("a", "b")).await);
    assert_eq!(notifier.count_titled(NETWORK_ERROR_TITLE), 1);
}

#[tokio::test]
async fn second_attempt_is_refused_while_first_is_pending() {
    let transport = ScriptedTransport::gated();
    transport.reply("authenticate", json!({ "name": "a" }));
    let stores = stores(transport.clone(), RecordingNotifier::new());
    let credentials = Credentials::new("a", "b");

    let (first, (second, phase)) = tokio::join!(stores.auth.authenticate(&credentials), async {
        transport.wait_for_requests(1).await;
        let phase = stores.auth.phase();
        let second = stores.auth.authenticate(&credentials).await;
        transport.release();
        (second, phase)
    });

    assert!(first);
    assert!(!second);
    assert_eq!(phase, AuthPhase::Authenticating);
    assert_eq!(transport.requests().len(), 1);
    assert_eq!(stores.auth.phase(), AuthPhase::Authenticated);
}
