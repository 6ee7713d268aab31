use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label used when an API error carries neither a code nor a name.
pub const GENERIC_ERROR_TITLE: &str = "Error";

/// A single GraphQL operation ready to be sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub operation_name: String,
    pub query: String,
    pub variables: Value,
}

/// The response envelope. Both members may be present at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiError>>,
}

impl GraphqlResponse {
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    pub fn with_errors(errors: Vec<ApiError>) -> Self {
        Self {
            data: None,
            errors: Some(errors),
        }
    }

    pub fn errors(&self) -> &[ApiError] {
        self.errors.as_deref().unwrap_or_default()
    }
}

/// An application-level error reported inside the response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ApiErrorExtensions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.extensions = Some(ApiErrorExtensions {
            code: Some(code.into()),
        });
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Notification title: the error code, else the error name, else a
    /// generic label.
    pub fn title(&self) -> &str {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.code.as_deref())
            .filter(|code| !code.is_empty())
            .or(self.name.as_deref().filter(|name| !name.is_empty()))
            .unwrap_or(GENERIC_ERROR_TITLE)
    }
}

/// Client-application authentication headers attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub stamp: i64,
    pub nonce: String,
    /// Lowercase hex HMAC-SHA256 of `nonce + id + stamp`.
    pub sign: String,
}
