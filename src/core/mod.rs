// src/core/mod.rs
//! API access, persisted client state and configuration

pub mod api_client;
pub mod config_manager;
pub mod storage;

pub use api_client::{JoblyApi, JoblyBackend};
pub use config_manager::ConfigManager;
pub use storage::LocalStorage;
