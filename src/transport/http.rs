//! HTTP surface of the broker.
//!
//! Routes:
//! - `GET /subscribe?topic=<name>`: WebSocket subscription, see
//!   [`crate::transport::websocket`]
//! - `/publish?topic=<name>`: every method is routed here so that anything
//!   but `POST` gets a 405 before the rest of the request is looked at

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::{any, get};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::broker::{Broker, Payload};
use crate::transport::validate::{require_json, require_post, require_topic};
use crate::transport::websocket;
use crate::utils::error::{BrokerError, InvalidRequest};

pub fn router(broker: Arc<Broker>) -> Router {
    Router::new()
        .route("/subscribe", get(websocket::subscribe))
        .route("/publish", any(publish))
        .with_state(broker)
}

/// Binds `addr` and serves until the listener fails.
pub async fn start_server(addr: &str, broker: Arc<Broker>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, broker).await
}

/// Serves on an already bound listener.
pub async fn serve(listener: TcpListener, broker: Arc<Broker>) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!("Starting websocket server on {addr}");
    info!("Subscribe with: ws://{addr}/subscribe?topic=my_topic");
    info!(
        "Publish with: curl -X POST -H 'Content-Type: application/json' \
         http://{addr}/publish?topic=my_topic -d '{{\"test\":\"phase_1\"}}'"
    );

    axum::serve(listener, router(broker)).await
}

async fn publish(
    State(broker): State<Arc<Broker>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, BrokerError> {
    require_post(&method)?;
    let topic = require_topic(uri.query())?;
    require_json(&headers)?;
    let body = body.map_err(|e| {
        warn!("Failed to read request body: {e}");
        InvalidRequest::UnreadableBody
    })?;
    let payload = Payload::parse(&body)?;

    broker.publish(&topic, &payload)?;
    Ok(StatusCode::OK)
}
