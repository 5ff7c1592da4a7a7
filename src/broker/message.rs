use axum::extract::ws::Message as WsMessage;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::error::InvalidRequest;

/// A JSON object accepted for publishing.
///
/// The body is parsed once and re-encoded in compact form; that text is what
/// every subscriber receives.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    text: String,
}

impl Payload {
    /// Validates a raw request body.
    ///
    /// # Errors
    ///
    /// - [`InvalidRequest::EmptyBody`] if `body` is empty.
    /// - [`InvalidRequest::InvalidJson`] if `body` is not a JSON object. The
    ///   error echoes the body.
    pub fn parse(body: &[u8]) -> Result<Self, InvalidRequest> {
        if body.is_empty() {
            return Err(InvalidRequest::EmptyBody);
        }

        let invalid = || InvalidRequest::InvalidJson(String::from_utf8_lossy(body).into_owned());
        let object: Map<String, Value> = serde_json::from_slice(body).map_err(|_| invalid())?;
        let text = serde_json::to_string(&object).map_err(|_| invalid())?;

        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The frame written to each subscriber.
    pub fn to_message(&self) -> WsMessage {
        WsMessage::Text(self.text.clone().into())
    }
}

/// Sent to a subscriber right after it has been registered.
///
/// ```json
/// {"subscription_status":"OK","topic":"my_topic"}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Confirmation<'a> {
    pub subscription_status: &'static str,
    pub topic: &'a str,
}

impl<'a> Confirmation<'a> {
    pub fn ok(topic: &'a str) -> Self {
        Self {
            subscription_status: "OK",
            topic,
        }
    }

    pub fn to_message(&self) -> Result<WsMessage, serde_json::Error> {
        Ok(WsMessage::Text(serde_json::to_string(self)?.into()))
    }
}
