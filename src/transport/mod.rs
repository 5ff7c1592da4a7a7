//! The `transport` module is responsible for handling network communication
//! with subscribers and publishers.
//!
//! Subscribers hold a WebSocket open on `/subscribe`; publishers make plain
//! HTTP requests to `/publish`. Both are served by one axum router.

pub mod http;
pub mod validate;
pub mod websocket;

pub use http::{router, serve, start_server};
