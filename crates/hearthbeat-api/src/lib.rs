// hearthbeat-api: Async Rust client for the Home Assistant HTTP + WebSocket APIs

pub mod client;
pub mod error;
pub mod models;
pub mod registry;

pub use client::{ClientConfig, HubClient};
pub use error::Error;
pub use models::{ApiStatus, EntityState, InstanceConfig, RegistryCounts};
