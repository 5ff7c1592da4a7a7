//! WebSocket subscribe path
//!
//! `GET /subscribe?topic=<name>` upgrades the connection and registers it
//! under the topic. Per connection:
//! - a `Client` handle is created and stored in the registry
//! - the subscription confirmation is written straight to the socket
//! - a writer loop forwards the handle's channel to the socket while a
//!   reader loop drains whatever the peer sends
//!
//! When either loop stops, the channel's receiving half is dropped. The
//! handle stays in the registry; the next broadcasts to the topic see its
//! writes fail and evict it.

use std::fmt::Display;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::http::Uri;
use axum::response::Response;
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::broker::{Broker, Confirmation};
use crate::client::Client;
use crate::transport::validate::require_topic;
use crate::utils::error::BrokerError;

pub async fn subscribe(
    State(broker): State<Arc<Broker>>,
    uri: Uri,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Result<Response, BrokerError> {
    let topic = require_topic(uri.query())?;
    let ws = ws?;

    Ok(ws
        .on_failed_upgrade(|e| warn!("Failed to establish connection: {e}"))
        .on_upgrade(move |socket| serve_subscriber(socket, broker, topic)))
}

/// Registers a new handle under `topic` and sends the confirmation on
/// `ws_sender`.
///
/// Returns the handle's id and the receiving half of its channel. If the
/// confirmation cannot be sent, the sink is closed and `None` is returned.
/// The handle then stays registered with a closed channel until broadcasts
/// evict it.
pub(crate) async fn register_and_confirm<S>(
    broker: &Broker,
    topic: &str,
    ws_sender: &mut S,
) -> Option<(String, UnboundedReceiver<WsMessage>)>
where
    S: Sink<WsMessage> + Unpin,
    S::Error: Display,
{
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);
    let client_id = client.id.clone();

    broker.subscribe(topic, client);

    let confirmation = match Confirmation::ok(topic).to_message() {
        Ok(message) => message,
        Err(e) => {
            warn!("Failed to serialize confirmation for {client_id}: {e}");
            return None;
        }
    };
    if let Err(e) = ws_sender.send(confirmation).await {
        warn!("Failed to confirm subscription of {client_id} to {topic}: {e}");
        let _ = ws_sender.close().await;
        return None;
    }

    Some((client_id, rx))
}

async fn serve_subscriber(socket: WebSocket, broker: Arc<Broker>, topic: String) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let Some((client_id, mut rx)) = register_and_confirm(&broker, &topic, &mut ws_sender).await
    else {
        return;
    };

    let send_loop = async {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = ws_sender.send(msg).await {
                warn!("Failed to send message to {client_id}: {e}");
                break;
            }
        }
    };

    let receive_loop = async {
        while let Some(Ok(msg)) = ws_receiver.next().await {
            match msg {
                WsMessage::Close(_) => break,
                WsMessage::Text(text) => {
                    debug!("Ignoring message from subscriber {client_id}: {}", text.as_str());
                }
                _ => {}
            }
        }
    };

    tokio::select! {
        _ = send_loop => {}
        _ = receive_loop => {}
    }

    info!("{client_id} disconnected from {topic}");
}
