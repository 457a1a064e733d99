pub mod app;
pub mod auth;
pub mod cli;
pub mod core;
pub mod error;
pub mod filter;
pub mod forms;
pub mod routes;
pub mod types;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

use anyhow::Result;

pub use app::{JoblyApp, Page, Session};
pub use error::{ApiError, ApiResult};

use crate::core::{ConfigManager, JoblyApi, LocalStorage};

/// Build the client from configuration and pick up any stored session
pub async fn connect(config: &ConfigManager) -> Result<JoblyApp<JoblyApi>> {
    let api = JoblyApi::new(config.base_url.clone())?;
    let storage = LocalStorage::open(config.storage_path.clone()).await?;

    let mut app = JoblyApp::new(api, storage);
    app.restore().await?;
    Ok(app)
}
