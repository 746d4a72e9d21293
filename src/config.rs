//! Pipeline configuration loaded from `badgegen.yaml`.
//!
//! Every field has a default, so an absent file reproduces the fixed layout
//! under `scripts/`:
//!
//! ```yaml
//! scripts_dir: scripts
//! duplicates: warn
//! state_parks:
//!   input: all_parks.csv
//!   output: active_state_parks.csv
//! county_badges:
//!   input: uscounties.csv
//!   output: insert_counties.sql
//! state_park_badges:
//!   input: active_state_parks.csv
//!   output: insert_state_park_badges.sql
//!   icon: state_park.svg
//!   points: 0
//! ```
//!
//! Relative pipeline paths are resolved against `scripts_dir`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::badges::{
    DuplicatePolicy, StateParkBadgeOptions, DEFAULT_STATE_PARK_ICON, DEFAULT_STATE_PARK_POINTS,
};
use crate::error::{PipelineError, Result};
use crate::filter::Predicate;

pub const DEFAULT_CONFIG_FILE: &str = "badgegen.yaml";
pub const CONFIG_ENV: &str = "BADGEGEN_CONFIG";
pub const SCRIPTS_DIR_ENV: &str = "BADGEGEN_SCRIPTS_DIR";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base directory for relative pipeline paths
    pub scripts_dir: PathBuf,
    pub duplicates: DuplicatePolicy,
    pub state_parks: StateParksConfig,
    pub county_badges: CountyBadgesConfig,
    pub state_park_badges: StateParkBadgesConfig,
}

/// Active state park filter
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StateParksConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub filter: Predicate,
}

/// County badge generator
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CountyBadgesConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// State park badge generator
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StateParkBadgesConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub icon: String,
    pub points: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from("scripts"),
            duplicates: DuplicatePolicy::default(),
            state_parks: StateParksConfig::default(),
            county_badges: CountyBadgesConfig::default(),
            state_park_badges: StateParkBadgesConfig::default(),
        }
    }
}

impl Default for StateParksConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("all_parks.csv"),
            output: PathBuf::from("active_state_parks.csv"),
            filter: Predicate::active_state_park(),
        }
    }
}

impl Default for CountyBadgesConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("uscounties.csv"),
            output: PathBuf::from("insert_counties.sql"),
        }
    }
}

impl Default for StateParkBadgesConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("active_state_parks.csv"),
            output: PathBuf::from("insert_state_park_badges.sql"),
            icon: DEFAULT_STATE_PARK_ICON.to_string(),
            points: DEFAULT_STATE_PARK_POINTS,
        }
    }
}

impl StateParkBadgesConfig {
    pub fn badge_options(&self) -> StateParkBadgeOptions {
        StateParkBadgeOptions {
            icon: self.icon.clone(),
            points: self.points,
        }
    }
}

impl Config {
    /// Parse a YAML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PipelineError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load configuration with precedence: CLI flag > environment > `badgegen.yaml` > defaults.
    ///
    /// `BADGEGEN_SCRIPTS_DIR` overrides `scripts_dir` from any source.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let env_scripts_dir = std::env::var(SCRIPTS_DIR_ENV).ok().map(PathBuf::from);
        Self::load_with(cli_path, env_path.as_deref(), env_scripts_dir)
    }

    fn load_with(
        cli_path: Option<&Path>,
        env_path: Option<&Path>,
        env_scripts_dir: Option<PathBuf>,
    ) -> Result<Self> {
        // 1. CLI flag, 2. environment variable: the file must exist
        let explicit = cli_path.or(env_path);

        let mut config = match explicit {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None => {
                // 3. badgegen.yaml in the working directory, 4. defaults
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    tracing::info!("Loading config from {}", default_path.display());
                    Self::from_file(default_path)?
                } else {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };

        if let Some(dir) = env_scripts_dir {
            tracing::info!("Using scripts dir from {}: {}", SCRIPTS_DIR_ENV, dir.display());
            config.scripts_dir = dir;
        }

        Ok(config)
    }

    /// Resolve a pipeline path against `scripts_dir` unless it is absolute
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.scripts_dir.join(path)
        }
    }
}
