//! Full stack over real HTTP: stores, the signed transport and a local API
//! double that verifies each request signature.

use api_adapters::{HttpGraphqlTransport, TransportConfig};
use auth_adapters::{signature, HmacRequestSigner};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use domains::Credentials;
use integration_tests::RecordingNotifier;
use secrecy::SecretString;
use serde_json::{json, Value};
use services::gateway::NETWORK_ERROR_TITLE;
use services::AppStores;
use std::sync::Arc;
use std::time::Duration;
use storage_adapters::MemoryStorage;
use tokio::net::TcpListener;

const CLIENT_ID: &str = "blog-admin";
const SERVER_SECRET: &str = "shared-secret";

fn verified(headers: &HeaderMap) -> bool {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let (Some(id), Some(stamp), Some(nonce), Some(sign)) = (
        header("id"),
        header("stamp").and_then(|s| s.parse::<i64>().ok()),
        header("nonce"),
        header("sign"),
    ) else {
        return false;
    };
    id == CLIENT_ID
        && signature(SERVER_SECRET.as_bytes(), nonce, id, stamp).is_ok_and(|expected| expected == sign)
}

async fn graphql(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !verified(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match body["operationName"].as_str() {
        Some("authenticate") => Json(json!({
            "data": {
                "authenticate": { "name": body["variables"]["userName"], "nickName": "Admin" }
            }
        }))
        .into_response(),
        Some("getArticlesByPage") => Json(json!({
            "data": {
                "getArticlesByPage": {
                    "docs": [{ "_id": "1", "title": "Hello", "postAt": "2024-03-01T10:00:00.000Z" }],
                    "totalDocs": 1,
                    "hasNextPage": false,
                    "page": 1
                }
            }
        }))
        .into_response(),
        Some("getArticleById") => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "errors": [{
                    "message": "Cast to ObjectId failed",
                    "extensions": { "code": "BAD_USER_INPUT" }
                }]
            })),
        )
            .into_response(),
        _ => Json(json!({ "errors": [{ "message": "unknown operation" }] })).into_response(),
    }
}

async fn serve() -> String {
    let app = Router::new().route("/graphql", post(graphql));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/graphql")
}

fn stores(endpoint: String, secret: &str, notifier: Arc<RecordingNotifier>) -> AppStores {
    let signer = HmacRequestSigner::new(CLIENT_ID, SecretString::from(secret.to_string()));
    let transport = HttpGraphqlTransport::new(
        TransportConfig {
            endpoint,
            timeout: Duration::from_secs(5),
            from_admin: true,
        },
        Arc::new(signer),
    )
    .unwrap();
    AppStores::new(Arc::new(transport), Arc::new(MemoryStorage::new()), notifier)
}

#[tokio::test]
async fn signed_login_and_listing() {
    let endpoint = serve().await;
    let notifier = RecordingNotifier::new();
    let stores = stores(endpoint, SERVER_SECRET, notifier.clone());

    assert!(stores.auth.authenticate(&Credentials::new("gian", "pw")).await);
    assert_eq!(stores.user.current_user().display_name(), "Admin");

    let query = services::PageQuery::new(1, 10).with_sort(stores.articles.enabled_sort());
    let page = stores.articles.get_articles_by_page(&query).await.unwrap();
    assert_eq!(page.total_docs, 1);
    assert_eq!(page.docs[0].title, "Hello");
    assert!(page.docs[0].post_at.is_some());
    assert!(notifier.titles().is_empty());
}

#[tokio::test]
async fn wrong_secret_is_a_network_error() {
    let endpoint = serve().await;
    let notifier = RecordingNotifier::new();
    let stores = stores(endpoint, "not-the-secret", notifier.clone());

    assert!(!stores.auth.authenticate(&Credentials::new("gian", "pw")).await);
    assert!(!stores.auth.is_authenticated());
    assert_eq!(notifier.titles(), vec![NETWORK_ERROR_TITLE]);
}

#[tokio::test]
async fn rejected_input_is_reported_per_error() {
    let endpoint = serve().await;
    let notifier = RecordingNotifier::new();
    let stores = stores(endpoint, SERVER_SECRET, notifier.clone());

    assert!(stores.articles.get_article_by_id("not-an-id").await.is_none());
    assert_eq!(notifier.titles(), vec!["BAD_USER_INPUT"]);
}
