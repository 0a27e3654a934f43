//! Configuration file management for studyplan.
//!
//! Provides a TOML-based config file at `~/.config/studyplan/config.toml` and
//! a resolution chain for the plan file: CLI flag > env var > config file >
//! default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use studyplan_core::{GeneratePlanRequest, PlannerConfig};
use studyplan_store::StoreConfig;
use studyplan_store::config::PLAN_FILE_ENV;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub planner: PlannerSection,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSection {
    /// Where the active plan is kept. Unset means the XDG data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_file: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PlannerSection {
    #[serde(default = "default_min_lead_days")]
    pub min_lead_days: i64,
    #[serde(default = "default_reserved_revision_days")]
    pub reserved_revision_days: u32,
    /// Default for `generate --hours-per-day`.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            min_lead_days: default_min_lead_days(),
            reserved_revision_days: default_reserved_revision_days(),
            hours_per_day: default_hours_per_day(),
        }
    }
}

fn default_min_lead_days() -> i64 {
    PlannerConfig::DEFAULT_MIN_LEAD_DAYS
}

fn default_reserved_revision_days() -> u32 {
    PlannerConfig::DEFAULT_RESERVED_REVISION_DAYS
}

fn default_hours_per_day() -> u32 {
    GeneratePlanRequest::DEFAULT_HOURS_PER_DAY
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the studyplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/studyplan` or
/// `~/.config/studyplan`, also on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("studyplan");
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("studyplan")
}

/// Return the path to the studyplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`.
///
/// A missing file is `Ok(None)`; a file that exists but does not parse is
/// an error.
pub fn load_config_from(path: &Path) -> Result<Option<ConfigFile>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read config file at {}", path.display()));
        }
    };
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct StudyplanConfig {
    pub store_config: StoreConfig,
    pub planner_config: PlannerConfig,
    pub default_hours_per_day: u32,
}

impl StudyplanConfig {
    /// Resolve configuration from the default config file location.
    pub fn resolve(cli_plan_file: Option<&Path>) -> Result<Self> {
        Self::resolve_with(cli_plan_file, &config_path())
    }

    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Plan file: `cli_plan_file` > `STUDYPLAN_PLAN_FILE` env > `storage.plan_file` >
    ///   XDG data dir
    /// - Planner tunables: `[planner]` section > built-in defaults
    pub fn resolve_with(cli_plan_file: Option<&Path>, config_file: &Path) -> Result<Self> {
        let file_config = load_config_from(config_file)?.unwrap_or_default();

        let plan_file = if let Some(path) = cli_plan_file {
            path.to_path_buf()
        } else if let Some(path) = std::env::var_os(PLAN_FILE_ENV).filter(|v| !v.is_empty()) {
            PathBuf::from(path)
        } else if let Some(path) = file_config.storage.plan_file.clone() {
            path
        } else {
            StoreConfig::default_plan_file()
        };

        let planner = &file_config.planner;
        if planner.hours_per_day == 0 {
            bail!("planner.hours_per_day must be at least 1");
        }

        Ok(Self {
            store_config: StoreConfig::new(plan_file),
            planner_config: PlannerConfig {
                min_lead_days: planner.min_lead_days,
                reserved_revision_days: planner.reserved_revision_days,
            },
            default_hours_per_day: planner.hours_per_day,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
