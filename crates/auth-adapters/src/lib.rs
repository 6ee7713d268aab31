//! # auth-adapters
//!
//! Client-application request signing. Every API request carries the client
//! id, a millisecond timestamp, a random nonce and an HMAC-SHA256 signature
//! over `nonce + id + stamp` keyed by the client secret.

use chrono::Utc;
use domains::{AuthHeaders, RequestSigner, SigningError};
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tracing::trace;

type HmacSha256 = Hmac<Sha256>;

/// Length of the random nonce attached to each request.
pub const NONCE_LEN: usize = 32;

pub struct HmacRequestSigner {
    client_id: String,
    secret: SecretString,
}

impl HmacRequestSigner {
    pub fn new(client_id: impl Into<String>, secret: SecretString) -> Self {
        Self {
            client_id: client_id.into(),
            secret,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Signs with a caller-chosen timestamp and nonce.
    pub fn sign_with(&self, stamp: i64, nonce: String) -> Result<AuthHeaders, SigningError> {
        let sign = signature(
            self.secret.expose_secret().as_bytes(),
            &nonce,
            &self.client_id,
            stamp,
        )?;
        trace!(client_id = %self.client_id, stamp, "request signed");
        Ok(AuthHeaders {
            id: self.client_id.clone(),
            stamp,
            nonce,
            sign,
        })
    }
}

impl RequestSigner for HmacRequestSigner {
    fn sign(&self) -> Result<AuthHeaders, SigningError> {
        self.sign_with(Utc::now().timestamp_millis(), generate_nonce())
    }
}

pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Lowercase hex HMAC-SHA256 of `nonce + id + stamp`.
pub fn signature(secret: &[u8], nonce: &str, id: &str, stamp: i64) -> Result<String, SigningError> {
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|e| SigningError::InvalidKey(e.to_string()))?;
    mac.update(nonce.as_bytes());
    mac.update(id.as_bytes());
    mac.update(stamp.to_string().as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
