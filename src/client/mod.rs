//! The `client` module defines the representation of a subscriber in the broker.
//!
//! It provides the `Client` struct, which is the handle the topic registry
//! stores: a unique identifier plus the channel feeding one WebSocket
//! connection.

pub mod pubsub_client;
pub use pubsub_client::Client;
