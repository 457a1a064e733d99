// src/core/storage.rs
//! File-backed key/value store that survives between runs (the auth token
//! lives here)

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        anyhow::bail!("Key must be a non-empty string");
    }
    Ok(())
}

impl LocalStorage {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable one is logged and treated as empty too.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match fs::read_to_string(&path).await {
            Ok(content) => match toml::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Can not parse local storage {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read local storage: {}", path.display()))
            }
        };

        debug!("Opened local storage {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn get(&self, key: &str) -> Result<Option<&str>> {
        check_key(key)?;
        Ok(self.entries.get(key).map(String::as_str))
    }

    pub async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        self.flush().await
    }

    pub async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        if self.entries.remove(key).is_some() {
            self.flush().await?;
        }
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content =
            toml::to_string(&self.entries).context("Failed to serialize local storage")?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write local storage: {}", self.path.display()))
    }
}
