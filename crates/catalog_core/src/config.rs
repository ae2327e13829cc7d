//! Catalog configuration.
//!
//! Every field has a default, so an empty RON file (`()`) is a valid
//! configuration.
//!
//! # Example RON
//!
//! ```ron
//! CatalogConfig(
//!     image_root: "/images",
//!     table_poll: (interval_ms: 50, max_attempts: Some(200)),
//! )
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Units whose weapon role is long-range artillery rather than defense.
pub const GAME_ENDER_ARTILLERY: [&str; 6] = [
    "armbrtha",
    "corint",
    "armvulc",
    "corbuzz",
    "leglrpc",
    "legstarfall",
];

/// Top-level configuration shared by the classifier and the search UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// URL prefix for every derived image path.
    pub image_root: String,

    /// Directory (relative to the site root) holding tag icons.
    pub icon_dir: String,

    /// Building ids classified as artillery instead of defense.
    pub artillery_ids: Vec<String>,

    /// Polling used while waiting for the table widget to initialise.
    pub table_poll: PollConfig,

    /// Query parameter carrying the table sort.
    pub sort_param: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            image_root: "/images".to_string(),
            icon_dir: "images/icons".to_string(),
            artillery_ids: GAME_ENDER_ARTILLERY.iter().map(|s| s.to_string()).collect(),
            table_poll: PollConfig::default(),
            sort_param: "sort".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Parse a configuration from RON text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the text is not valid RON for this type.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| CatalogError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    /// Whether `id` names a game-ending artillery piece.
    #[must_use]
    pub fn is_artillery(&self, id: &str) -> bool {
        self.artillery_ids.iter().any(|a| a == id)
    }

    fn validate(&self) -> Result<()> {
        if self.sort_param.is_empty() {
            return Err(CatalogError::Config("sort_param must not be empty".into()));
        }
        if self.table_poll.interval_ms == 0 {
            return Err(CatalogError::Config(
                "table_poll.interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Bounded polling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay between attempts, in milliseconds.
    pub interval_ms: u64,

    /// Give up after this many attempts. `None` polls for the page lifetime.
    pub max_attempts: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 50,
            max_attempts: None,
        }
    }
}

impl PollConfig {
    /// Delay between attempts.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
