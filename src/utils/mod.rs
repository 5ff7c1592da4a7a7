//! The `utils` module provides the error types and logging setup shared across
//! the `sockety` broker.

pub mod error;
pub mod logging;
