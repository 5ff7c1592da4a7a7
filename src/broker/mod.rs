pub mod engine;
pub mod message;
pub mod registry;

pub use engine::Broker;
pub use message::{Confirmation, Payload};
pub use registry::{BroadcastReport, EvictionPolicy, TopicRegistry};
