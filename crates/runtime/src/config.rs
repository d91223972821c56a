//! Runtime configuration loading.
//!
//! Settings live in a RON file under the platform config directory, with
//! environment-variable overrides for the handful of switches people flip
//! per-launch.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use holdout_core::DispatchConfig;

use crate::error::{Result, RuntimeError};

const CONFIG_FILE: &str = "runtime.ron";

/// Everything the runtime needs at session start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Read-only settings the dispatch loop consults.
    pub dispatch: DispatchConfig,

    /// Bound of the input event channel.
    pub input_buffer: usize,

    /// Capacity of the session event bus.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchConfig::default(),
            input_buffer: 16,
            event_capacity: 64,
        }
    }
}

impl RuntimeConfig {
    /// Load from an explicit RON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: RuntimeConfig =
            ron::from_str(&content).map_err(|source| RuntimeError::ConfigParse {
                path: path.display().to_string(),
                source,
            })?;
        config.apply_env();
        Ok(config)
    }

    /// Load from the platform config directory; a missing file simply means
    /// defaults.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                let mut config = Self::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    /// Platform-specific location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "holdout")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Apply environment overrides.
    ///
    /// - `HOLDOUT_AUTO_SAFE_MODE`: auto-re-enable safe mode
    /// - `HOLDOUT_CAPITAL_CONFIRMATIONS`: capitalized destructive prompts
    /// - `HOLDOUT_VIEW_SHIFT_STEP`: viewport shift step in tiles
    /// - `HOLDOUT_SUPPRESS_UNKNOWN_COMMANDS`: hide unknown-key diagnostics
    /// - `HOLDOUT_INPUT_BUFFER`: input channel bound
    pub fn apply_env(&mut self) {
        if let Some(enable) = read_env::<bool>("HOLDOUT_AUTO_SAFE_MODE") {
            self.dispatch.auto_safe_mode = enable;
        }
        if let Some(enable) = read_env::<bool>("HOLDOUT_CAPITAL_CONFIRMATIONS") {
            self.dispatch.capital_confirmations = enable;
        }
        if let Some(step) = read_env::<i32>("HOLDOUT_VIEW_SHIFT_STEP") {
            self.dispatch.view_shift_step = step.max(1);
        }
        if let Some(enable) = read_env::<bool>("HOLDOUT_SUPPRESS_UNKNOWN_COMMANDS") {
            self.dispatch.suppress_unknown_commands = enable;
        }
        if let Some(buffer) = read_env::<usize>("HOLDOUT_INPUT_BUFFER") {
            self.input_buffer = buffer.max(1);
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn ron_round_trip() {
        let config = RuntimeConfig::default();
        let text = ron::to_string(&config).expect("serialize");
        let parsed: RuntimeConfig = ron::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "(dispatch: (view_shift_step: 3))").expect("write");

        let config = RuntimeConfig::load(file.path()).expect("load");
        assert_eq!(config.dispatch.view_shift_step, 3);
        assert_eq!(config.input_buffer, RuntimeConfig::default().input_buffer);
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let err = RuntimeConfig::load(Path::new("/definitely/not/here.ron"))
            .expect_err("must fail");
        assert!(matches!(err, RuntimeError::ConfigIo { .. }));
    }
}
