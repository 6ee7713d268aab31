//! # api-adapters
//!
//! [`GraphqlTransport`] over HTTP. Each request is a JSON `POST` of the
//! GraphQL envelope to a single endpoint, carrying freshly signed client
//! authentication headers. Responses are never cached.

use async_trait::async_trait;
use domains::{
    AuthHeaders, GraphqlRequest, GraphqlResponse, GraphqlTransport, RequestSigner, TransportError,
};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const HEADER_ID: &str = "id";
pub const HEADER_STAMP: &str = "stamp";
pub const HEADER_NONCE: &str = "nonce";
pub const HEADER_SIGN: &str = "sign";
/// Marks requests from a non-production admin build.
pub const HEADER_FROM_ADMIN: &str = "from-admin";

const USER_AGENT: &str = concat!("blog-admin/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub endpoint: String,
    pub timeout: Duration,
    /// Attach `from-admin: true`. Set outside production.
    pub from_admin: bool,
}

impl TransportConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
            from_admin: false,
        }
    }
}

pub struct HttpGraphqlTransport {
    client: Client,
    config: TransportConfig,
    signer: Arc<dyn RequestSigner>,
}

impl HttpGraphqlTransport {
    pub fn new(config: TransportConfig, signer: Arc<dyn RequestSigner>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self {
            client,
            config,
            signer,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl GraphqlTransport for HttpGraphqlTransport {
    async fn execute(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError> {
        let signed = self.signer.sign()?;
        let headers = auth_header_map(&signed, self.config.from_admin)?;

        debug!(
            endpoint = %self.config.endpoint,
            operation = %request.operation_name,
            "sending graphql request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), operation = %request.operation_name, "api returned error status");
            let body = response.text().await.unwrap_or_default();
            // GraphQL servers report rejected input as 4xx with an `errors` envelope
            if let Some(envelope) = error_envelope(&body) {
                return Ok(envelope);
            }
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        response
            .json::<GraphqlResponse>()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}

fn error_envelope(body: &str) -> Option<GraphqlResponse> {
    serde_json::from_str::<GraphqlResponse>(body)
        .ok()
        .filter(|envelope| !envelope.errors().is_empty())
}

/// Builds the per-request header set from signed credentials.
pub fn auth_header_map(signed: &AuthHeaders, from_admin: bool) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    insert(&mut headers, HEADER_ID, &signed.id)?;
    insert(&mut headers, HEADER_STAMP, &signed.stamp.to_string())?;
    insert(&mut headers, HEADER_NONCE, &signed.nonce)?;
    insert(&mut headers, HEADER_SIGN, &signed.sign)?;
    if from_admin {
        headers.insert(HEADER_FROM_ADMIN, HeaderValue::from_static("true"));
    }
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(headers)
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<(), TransportError> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| TransportError::Request(format!("invalid `{name}` header: {e}")))?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}
