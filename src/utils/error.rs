//! The `error` module defines the error types used within the `sockety` broker.
//!
//! Request errors are reported synchronously to the caller with a plain-text
//! body and a status code. Delivery errors never leave the broker: they only
//! drive eviction of the subscriber whose write failed.

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

/// Malformed or missing input on a subscribe or publish request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidRequest {
    #[error("No topic specified")]
    MissingTopic,

    #[error("Invalid content type")]
    InvalidContentType,

    #[error("Failed to read request body")]
    UnreadableBody,

    #[error("Empty body, unable to publish")]
    EmptyBody,

    /// Carries the offending body so the publisher can see what was rejected.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Topic \"{0}\" doesn't exist, unable to publish")]
    UnknownTopic(String),
}

/// Every way a request to the broker can be refused.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),

    #[error("{method} not allowed for /publish")]
    MethodNotAllowed { method: Method },

    #[error("failed to establish connection: {0}")]
    Upgrade(#[from] WebSocketUpgradeRejection),
}

impl BrokerError {
    pub fn status(&self) -> StatusCode {
        match self {
            BrokerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BrokerError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            BrokerError::Upgrade(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        warn!("{self}");
        match self {
            // The transport already knows how to describe a failed handshake.
            BrokerError::Upgrade(rejection) => rejection.into_response(),
            other => (other.status(), other.to_string()).into_response(),
        }
    }
}

/// A write to a single subscriber failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("subscriber connection closed")]
    Closed,
}
