//! Session configuration.
//!
//! Loaded once at startup from a TOML file shipped next to the HUD
//! layout. Every field has a default, so an empty file (or no file at
//! all) yields a working session.

use crate::error::{SyncError, SyncResult};
use hudsync_shared::constants::{
    DEFAULT_MAX_PENDING, DEFAULT_NOTIFY_CAPACITY, DEFAULT_REQUEST_TIMEOUT_MS,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Tunables for a synchronization session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// How long a data request may stay unanswered before the sweep
    /// drops it, in milliseconds.
    pub request_timeout_ms: u64,
    /// Cap on outstanding data requests. The oldest is dropped when a
    /// new request would exceed it.
    pub max_pending_requests: usize,
    /// Capacity of each raw-notice subscriber channel.
    pub notify_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_pending_requests: DEFAULT_MAX_PENDING,
            notify_capacity: DEFAULT_NOTIFY_CAPACITY,
        }
    }
}

impl SyncConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> SyncResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SyncError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SyncResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SyncError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// The request expiry deadline as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    fn validate(&self) -> SyncResult<()> {
        if self.request_timeout_ms == 0 {
            return Err(SyncError::InvalidConfig(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_pending_requests == 0 {
            return Err(SyncError::InvalidConfig(
                "max_pending_requests must be greater than zero".to_string(),
            ));
        }
        if self.notify_capacity == 0 {
            return Err(SyncError::InvalidConfig(
                "notify_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
