//! # Application Configuration
//!
//! Environment-driven configuration with sensible defaults.
//!
//! ## Environment Variables
//! ```text
//! ┌──────────────────────────┬───────────────────────────┬─────────────────┐
//! │ Variable                 │ Purpose                   │ Default         │
//! ├──────────────────────────┼───────────────────────────┼─────────────────┤
//! │ TENANTFLOW_STORE         │ Storefront slug to open   │ emporio-central │
//! │ TENANTFLOW_SESSION_DIR   │ Session snapshot location │ platform dir    │
//! │ TENANTFLOW_LOG           │ Tracing filter directives │ info,tenantflow │
//! │                          │                           │ =debug          │
//! └──────────────────────────┴───────────────────────────┴─────────────────┘
//! ```
//!
//! Without `TENANTFLOW_SESSION_DIR`, the session file lands in the platform
//! data directory (e.g. `~/.local/share/tenantflow-storefront` on Linux).

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use tenantflow_core::validation::validate_slug;
use thiserror::Error;

/// Default storefront opened by the demo walkthrough.
const DEFAULT_STORE_SLUG: &str = "emporio-central";

/// Default tracing filter when neither TENANTFLOW_LOG nor RUST_LOG is set.
pub const DEFAULT_LOG_FILTER: &str = "info,tenantflow=debug";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Slug of the store the storefront session opens
    pub store_slug: String,

    /// Override for the session snapshot directory
    pub session_dir: Option<PathBuf>,

    /// Tracing filter directives
    pub log_filter: String,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid store slug '{0}': {1}")]
    InvalidStoreSlug(String, String),

    #[error("no home directory available to place the session file")]
    NoHomeDirectory,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_slug =
            env::var("TENANTFLOW_STORE").unwrap_or_else(|_| DEFAULT_STORE_SLUG.to_string());

        validate_slug(&store_slug)
            .map_err(|e| ConfigError::InvalidStoreSlug(store_slug.clone(), e.to_string()))?;

        let session_dir = env::var("TENANTFLOW_SESSION_DIR").ok().map(PathBuf::from);

        let log_filter =
            env::var("TENANTFLOW_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(AppConfig {
            store_slug,
            session_dir,
            log_filter,
        })
    }

    /// Resolves the path of the session snapshot file.
    ///
    /// The directory is not created here; the session store creates it on
    /// first write.
    pub fn session_file(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.session_dir {
            return Ok(dir.join("session.json"));
        }

        let dirs = ProjectDirs::from("com", "tenantflow", "storefront")
            .ok_or(ConfigError::NoHomeDirectory)?;

        Ok(dirs.data_dir().join("session.json"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
