//! Application configuration.
//!
//! Values are layered: built-in defaults, then the TOML file under the user
//! config directory, then `CREWGEN_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::selector::SelectionStrategy;

/// Directory under `~/.config` holding the config file.
pub const CONFIG_DIR: &str = "crewgen";

static CONFIG_PATH: Lazy<PathBuf> = Lazy::new(|| {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
});

const DEFAULT_CONFIG: &str = r#"# crewgen configuration

# Directory containing one JSON file per mission set.
missions_dir = "data/missions"

# Modifier cards. A missing file just disables modifiers.
modifiers_file = "data/modifiers.json"

# Mission set used when --missions is not given. "all" combines every set.
default_mission_set = "classic"

# Attempt budgets per selection strategy.
deck_draw_attempts = 100
legacy_attempts = 50

# Uncomment to also write logs to <log_dir>/crewgen.log
# log_dir = "logs"
"#;

/// Settings shared by the library and the command line frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory scanned for mission sets.
    pub missions_dir: PathBuf,
    /// Modifier card file.
    pub modifiers_file: PathBuf,
    /// Mission set used when none is requested.
    pub default_mission_set: String,
    /// Attempt budget for [`SelectionStrategy::DeckDraw`].
    pub deck_draw_attempts: u32,
    /// Attempt budget for [`SelectionStrategy::LegacyGreedy`].
    pub legacy_attempts: u32,
    /// Optional directory for a log file.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load using `path` as the file layer. The file may be absent.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .set_default("missions_dir", "data/missions")?
            .set_default("modifiers_file", "data/modifiers.json")?
            .set_default("default_mission_set", "classic")?
            .set_default(
                "deck_draw_attempts",
                i64::from(SelectionStrategy::DeckDraw.default_attempts()),
            )?
            .set_default(
                "legacy_attempts",
                i64::from(SelectionStrategy::LegacyGreedy.default_attempts()),
            )?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CREWGEN"))
            .build()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Attempt budget configured for `strategy`.
    pub fn attempts_for(&self, strategy: SelectionStrategy) -> u32 {
        match strategy {
            SelectionStrategy::DeckDraw => self.deck_draw_attempts,
            SelectionStrategy::LegacyGreedy => self.legacy_attempts,
        }
    }
}

/// Default config file location.
pub fn config_path() -> PathBuf {
    CONFIG_PATH.clone()
}

/// Write the commented default config if no file exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!("wrote default configuration to {}", path.display());
    Ok(())
}
