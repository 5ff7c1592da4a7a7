//! CLI for Sockety
//!
//! Subcommands:
//! - `server`: run the broker
//! - `client`: subscribe to a topic and print what gets published to it

use std::sync::Arc;

use clap::Parser;
use futures_util::StreamExt;
use sockety::broker::Broker;
use sockety::config::load_config;
use sockety::transport::start_server;
use sockety::utils::logging;
use tokio_tungstenite::connect_async;
use tracing::{error, info};
use tungstenite::protocol::Message as WsMessage;
use url::Url;

#[derive(Parser)]
#[command(name = "sockety")]
enum Command {
    /// Start the broker
    Server {
        /// Interface to listen on (overrides configuration)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides configuration)
        #[arg(long)]
        port: Option<u16>,
        /// Log level (overrides configuration)
        #[arg(long)]
        log_level: Option<String>,
    },
    /// Subscribe to a topic and log every message received
    Client {
        /// Topic to receive messages from
        #[arg(long)]
        topic: String,
        /// Base URL of the broker
        #[arg(long, default_value = "ws://127.0.0.1:8081")]
        url: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    match Command::parse() {
        Command::Server {
            host,
            port,
            log_level,
        } => {
            if let Err(e) = run_server(host, port, log_level).await {
                error!("Server failed: {e}");
            }
        }
        Command::Client { topic, url } => {
            logging::init("info");
            if let Err(e) = run_client(&url, &topic).await {
                error!("Client failed: {e}");
            }
        }
    }
}

async fn run_server(
    host: Option<String>,
    port: Option<u16>,
    log_level: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    let level = log_level
        .or_else(|| config.as_ref().ok().map(|c| c.log.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    logging::init(&level);

    let mut config = config?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let addr = config.addr();
    let broker = Arc::new(Broker::with_eviction(config.broker.eviction));
    info!("Evicting failed subscribers: {:?}", broker.eviction());

    tokio::select! {
        result = start_server(&addr, broker) => {
            result?;
            error!("Server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_client(url: &str, topic: &str) -> Result<(), Box<dyn std::error::Error>> {
    if topic.is_empty() {
        return Err("topic required to set up subscription".into());
    }

    let mut url = Url::parse(url)?.join("subscribe")?;
    url.query_pairs_mut().append_pair("topic", topic);
    info!("Connecting to {url}");

    let (mut ws_stream, _response) = connect_async(url.as_str()).await?;

    while let Some(msg) = ws_stream.next().await {
        match msg? {
            WsMessage::Text(text) => info!("{}", text.as_str()),
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    info!("Connection closed");
    Ok(())
}
