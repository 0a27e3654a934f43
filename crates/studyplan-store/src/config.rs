use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the plan file location.
pub const PLAN_FILE_ENV: &str = "STUDYPLAN_PLAN_FILE";

/// Storage configuration.
///
/// Reads from the `STUDYPLAN_PLAN_FILE` environment variable, falling back to
/// `plan.json` under the XDG data directory when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the single JSON slot holding the active plan.
    pub plan_file: PathBuf,
}

impl StoreConfig {
    /// File name used inside the data directory.
    pub const DEFAULT_FILE_NAME: &'static str = "plan.json";

    /// Build a config from the environment.
    ///
    /// Priority: `STUDYPLAN_PLAN_FILE` env var, then [`Self::default_plan_file`].
    pub fn from_env() -> Self {
        let plan_file = env::var_os(PLAN_FILE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_plan_file);
        Self { plan_file }
    }

    /// Build a config from an explicit path (useful for tests and CLI flags).
    pub fn new(plan_file: impl Into<PathBuf>) -> Self {
        Self {
            plan_file: plan_file.into(),
        }
    }

    /// Return the studyplan data directory.
    ///
    /// `$XDG_DATA_HOME/studyplan` or `~/.local/share/studyplan`.
    pub fn data_dir() -> PathBuf {
        if let Some(xdg) = env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
            return PathBuf::from(xdg).join("studyplan");
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("share")
            .join("studyplan")
    }

    pub fn default_plan_file() -> PathBuf {
        Self::data_dir().join(Self::DEFAULT_FILE_NAME)
    }

    pub fn plan_file(&self) -> &Path {
        &self.plan_file
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
