//! # Remote Data Gateway
//!
//! The single point every API call passes through. The transport behind it
//! signs and sends requests; the gateway turns the response envelope into a
//! typed result and surfaces every failure to the user exactly once.

use domains::{
    ApiError, GraphqlRequest, GraphqlResponse, GraphqlTransport, Notification, Notifier,
    TransportError, GENERIC_ERROR_TITLE,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::operations::{Operation, OperationKind};

/// Title of the notification raised for transport failures.
pub const NETWORK_ERROR_TITLE: &str = "Network Error";

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request never produced a response envelope.
    #[error("network error: {0}")]
    Transport(#[from] TransportError),

    /// The API reported one or more errors.
    #[error("{operation} failed with {} API error(s)", errors.len())]
    Application {
        operation: &'static str,
        errors: Vec<ApiError>,
    },

    /// The envelope had no usable `data` for the operation.
    #[error("could not decode {operation} response: {reason}")]
    Decode {
        operation: &'static str,
        reason: String,
    },
}

pub struct Gateway {
    transport: Arc<dyn GraphqlTransport>,
    notifier: Arc<dyn Notifier>,
}

impl Gateway {
    pub fn new(transport: Arc<dyn GraphqlTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<T, GatewayError> {
        debug_assert_eq!(operation.kind, OperationKind::Query, "{} is not a query", operation.name);
        self.execute(operation, variables).await
    }

    pub async fn mutate<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<T, GatewayError> {
        debug_assert_eq!(operation.kind, OperationKind::Mutation, "{} is not a mutation", operation.name);
        self.execute(operation, variables).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<T, GatewayError> {
        let request = GraphqlRequest {
            operation_name: operation.name.to_string(),
            query: operation.document.to_string(),
            variables,
        };

        debug!(operation = operation.name, kind = ?operation.kind, "dispatching graphql request");

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(operation = operation.name, error = %err, "graphql transport failed");
                self.notifier
                    .notify(Notification::error(NETWORK_ERROR_TITLE, err.to_string()));
                return Err(err.into());
            }
        };

        self.unwrap_envelope(operation, response)
    }

    fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        response: GraphqlResponse,
    ) -> Result<T, GatewayError> {
        let GraphqlResponse { data, errors } = response;

        let errors = errors.unwrap_or_default();
        if !errors.is_empty() {
            for err in &errors {
                warn!(operation = operation.name, title = err.title(), message = %err.message, "api reported error");
                self.notifier
                    .notify(Notification::error(err.title(), err.message.clone()));
            }
            return Err(GatewayError::Application {
                operation: operation.name,
                errors,
            });
        }

        let decoded = match data {
            Some(mut data) => {
                let field = data
                    .get_mut(operation.field)
                    .map(Value::take)
                    .unwrap_or(Value::Null);
                serde_json::from_value::<T>(field).map_err(|e| e.to_string())
            }
            None => Err("response has no data".to_string()),
        };

        decoded.map_err(|reason| {
            warn!(operation = operation.name, %reason, "undecodable graphql response");
            self.notifier
                .notify(Notification::error(GENERIC_ERROR_TITLE, reason.clone()));
            GatewayError::Decode {
                operation: operation.name,
                reason,
            }
        })
    }
}
