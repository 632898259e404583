use std::path::PathBuf;

use anyhow::{Context, Result};
use unmutte_api::state::EnvFlags;
use unmutte_crypto::keys::key_from_base64;

pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite path; `sqlite://` prefix allowed. Unset means no database.
    pub database_url: Option<String>,
    /// Only its presence is reported.
    pub database_name: Option<String>,
    /// AES-256 key for sealing chat messages.
    pub message_key: Option<[u8; 32]>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty counts as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            None => 8000,
        };
        let message_key = var("UNMUTTE_MESSAGE_KEY")
            .map(|raw| key_from_base64(&raw).context("UNMUTTE_MESSAGE_KEY is not a base64 32-byte key"))
            .transpose()?;

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
            message_key,
        })
    }

    pub fn sqlite_path(&self) -> Option<PathBuf> {
        self.database_url.as_deref().map(|url| {
            PathBuf::from(url.strip_prefix("sqlite://").unwrap_or(url))
        })
    }

    pub fn env_flags(&self) -> EnvFlags {
        EnvFlags {
            database_url: self.database_url.is_some(),
            database_name: self.database_name.is_some(),
        }
    }
}
