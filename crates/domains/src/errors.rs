//! # Domain Errors
//!
//! Error types shared across the port boundary. Each adapter maps its
//! library-specific failures into one of these before returning.

use thiserror::Error;

/// Failure raised while moving a GraphQL request over the wire.
///
/// Anything that prevents a well-formed response envelope from being read
/// lands here; errors reported *inside* the envelope are not transport errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, TLS failure.
    #[error("{0}")]
    Request(String),

    /// The server answered with a non-success HTTP status.
    #[error("server responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The body could not be read as a GraphQL response envelope.
    #[error("malformed response body: {0}")]
    Body(String),

    /// Authentication headers could not be produced.
    #[error("could not sign request: {0}")]
    Signing(#[from] SigningError),
}

/// Failure reading or writing durable key-value storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage i/o error: {0}")]
    Io(String),

    #[error("storage contents are not valid JSON: {0}")]
    Serialization(String),
}

/// Failure producing request authentication headers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

/// Local rule violations detected before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failure (e.g., blank title, malformed date range)
    #[error("validation error: {0}")]
    Validation(String),

    /// An update was requested for a draft that has no identifier.
    #[error("article draft has no identifier")]
    MissingIdentifier,
}

/// A specialized Result type for domain-level checks.
pub type Result<T> = std::result::Result<T, DomainError>;
