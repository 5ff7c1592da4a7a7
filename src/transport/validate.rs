//! Request checks applied before the broker is touched. Each one either
//! passes or yields the error the caller will see.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method};
use url::form_urlencoded;

use crate::utils::error::{BrokerError, InvalidRequest};

pub fn require_post(method: &Method) -> Result<(), BrokerError> {
    if *method != Method::POST {
        return Err(BrokerError::MethodNotAllowed {
            method: method.clone(),
        });
    }
    Ok(())
}

/// Returns the first `topic` value of a query string if it is non-empty.
/// Later `topic` values are ignored.
pub fn require_topic(query: Option<&str>) -> Result<String, InvalidRequest> {
    let topic = query.and_then(|query| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "topic")
            .map(|(_, value)| value.into_owned())
    });

    match topic {
        Some(topic) if !topic.is_empty() => Ok(topic),
        _ => Err(InvalidRequest::MissingTopic),
    }
}

/// The media type must be `application/json`; parameters such as a charset
/// are ignored.
pub fn require_json(headers: &HeaderMap) -> Result<(), InvalidRequest> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"));

    if is_json {
        Ok(())
    } else {
        Err(InvalidRequest::InvalidContentType)
    }
}
