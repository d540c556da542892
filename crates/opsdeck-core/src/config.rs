use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::env;

/// Collection ids for the four entity families.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionIds {
    pub projects: String,
    pub tasks: String,
    pub users: String,
    pub finances: String,
}

/// Connection settings for the hosted document database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Base URL of the remote store's REST endpoint.
    pub endpoint: String,
    pub project_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub database_id: String,
    pub collections: CollectionIds,
}

impl CoreConfig {
    /// Build a config from `OPSDECK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).with_context(|| format!("missing environment variable {name}"))
        };

        Ok(Self {
            endpoint: var(env::ENDPOINT)?,
            project_id: var(env::PROJECT_ID)?,
            api_key: std::env::var(env::API_KEY).ok(),
            database_id: var(env::DATABASE_ID)?,
            collections: CollectionIds {
                projects: var(env::PROJECTS_COLLECTION_ID)?,
                tasks: var(env::TASKS_COLLECTION_ID)?,
                users: var(env::USERS_COLLECTION_ID)?,
                finances: var(env::FINANCES_COLLECTION_ID)?,
            },
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse config JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&contents)
    }

    /// Default config file location (`<config dir>/opsdeck/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("opsdeck").join("config.json"))
    }
}
