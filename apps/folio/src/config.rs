use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::autosave::{AutoSaveOptions, DEFAULT_DELAY, DEFAULT_GRACE};
use crate::store::DEFAULT_STORAGE_KEY;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub autosave_delay: Duration,
    pub save_grace: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let millis = |name: &str, default: Duration| -> Result<Duration> {
            match lookup(name) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .with_context(|| format!("{name} must be a whole number of milliseconds")),
                None => Ok(default),
            }
        };

        Ok(Config {
            data_dir: lookup("FOLIO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".folio")),
            storage_key: lookup("FOLIO_STORAGE_KEY")
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            autosave_delay: millis("FOLIO_AUTOSAVE_DELAY_MS", DEFAULT_DELAY)?,
            save_grace: millis("FOLIO_SAVE_GRACE_MS", DEFAULT_GRACE)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn autosave_options(&self) -> AutoSaveOptions {
        AutoSaveOptions {
            delay: self.autosave_delay,
            grace: self.save_grace,
        }
    }
}
