//! Server configuration from the environment.

use std::path::PathBuf;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding progress, settings and catalog edits.
    pub data_dir: PathBuf,
    /// Shipped vocabulary catalog (`{"words": [...]}`).
    pub catalog_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            catalog_path: PathBuf::from("./vocabulary.json"),
        }
    }
}

impl Config {
    /// Read `HOST`, `PORT`, `DATA_DIR` and `CATALOG_PATH`, loading `.env` first.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT {raw:?}: {e}"))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            data_dir: lookup("DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            catalog_path: lookup("CATALOG_PATH").map_or(defaults.catalog_path, PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
