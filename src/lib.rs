//! # Sockety
//!
//! `sockety` is a minimal publish/subscribe broker. Subscribers open a
//! WebSocket on `/subscribe?topic=<name>`; anyone can `POST` a JSON object to
//! `/publish?topic=<name>` and every subscriber of that topic receives it.
//!
//! There is no persistence, replay, acknowledgement or ordering across
//! topics. Subscribers that went away are evicted lazily, when writes to
//! them fail during a broadcast (see [`broker::EvictionPolicy`]).
//!
//! ## Core Modules
//!
//! - `broker`: the topic registry and the subscribe/broadcast engine.
//! - `client`: the subscriber handle stored in the registry.
//! - `config`: loading settings from file and environment.
//! - `transport`: the axum router serving `/subscribe` and `/publish`.
//! - `utils`: error types and logging setup.

pub mod broker;
pub mod client;
pub mod config;
pub mod transport;
pub mod utils;
