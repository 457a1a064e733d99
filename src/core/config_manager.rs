// src/core/config_manager.rs
//! Client configuration: defaults, then jobly.yaml, then environment, then
//! command-line overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_LOG_FILE: &str = "/tmp/jobly.log";
const CONFIG_FILE: &str = "jobly.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub base_url: String,
    pub storage_path: PathBuf,
    pub log_file: PathBuf,
}

/// One environment section of jobly.yaml. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct EnvironmentSection {
    base_url: Option<String>,
    storage_path: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl ConfigManager {
    /// Load from the working directory and process environment
    pub fn load() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to get current directory")?;
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = Self::defaults(&root);
        if let Some(section) = Self::load_file(&root.join(CONFIG_FILE), &environment)? {
            config.apply_section(section, &root);
        }
        config.apply_env(|key| std::env::var(key).ok(), &root);

        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBLY_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn defaults(root: &Path) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            storage_path: root.join(".jobly").join("storage.toml"),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    fn load_file(path: &Path, environment: &str) -> Result<Option<EnvironmentSection>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_section(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
            .map(Some)
    }

    fn parse_section(content: &str, environment: &str) -> Result<EnvironmentSection> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    fn apply_section(&mut self, section: EnvironmentSection, root: &Path) {
        if let Some(base_url) = section.base_url {
            self.base_url = base_url;
        }
        if let Some(path) = section.storage_path {
            self.storage_path = resolve_path(path, root);
        }
        if let Some(path) = section.log_file {
            self.log_file = resolve_path(path, root);
        }
    }

    fn apply_env<F>(&mut self, lookup: F, root: &Path)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("JOBLY_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(path) = lookup("JOBLY_STORAGE_PATH").filter(|v| !v.is_empty()) {
            self.storage_path = resolve_path(PathBuf::from(path), root);
        }
        if let Some(path) = lookup("JOBLY_LOG_FILE").filter(|v| !v.is_empty()) {
            self.log_file = resolve_path(PathBuf::from(path), root);
        }
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }
}

fn resolve_path(path: PathBuf, root: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
