use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drill_core::DrillTuning;

const SETTINGS_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameplaySettings {
    pub show_gauge: bool,
    pub show_icon_label: bool,
    pub auto_pause_on_focus_loss: bool,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            show_gauge: true,
            show_icon_label: true,
            auto_pause_on_focus_loss: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub tuning: DrillTuning,
    #[serde(default)]
    pub gameplay: GameplaySettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            tuning: DrillTuning::default(),
            gameplay: GameplaySettings::default(),
            library_path: None,
        }
    }
}

impl PlayerSettings {
    /// Pulls hand-edited values back into a playable range. The result always passes
    /// `DrillTuning::validate`.
    pub fn sanitized(mut self) -> Self {
        let defaults = DrillTuning::default();
        let t = &mut self.tuning;

        self.version = default_version();
        if t.tick.is_zero() {
            t.tick = defaults.tick;
        }
        if t.min_budget.is_zero() {
            t.min_budget = defaults.min_budget.min(t.initial_budget.max(t.tick));
        }
        if t.initial_budget < t.min_budget {
            t.initial_budget = t.min_budget;
        }
        self
    }
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `STRATAGEM_SETTINGS_PATH`, else `$XDG_CONFIG_HOME/stratagem/settings.json`, else
    /// `$HOME/.config/stratagem/settings.json`.
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("STRATAGEM_SETTINGS_PATH") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(base.join("stratagem").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file gives defaults silently; an unreadable or malformed file gives
    /// defaults with a warning.
    pub fn load(&self) -> PlayerSettings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return PlayerSettings::default();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "cannot read settings: {err}");
                return PlayerSettings::default();
            }
        };
        match serde_json::from_slice::<PlayerSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring malformed settings: {err}");
                PlayerSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &PlayerSettings) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, text).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn sanitized_repairs_unplayable_tuning() {
        let settings = PlayerSettings {
            version: 42,
            tuning: DrillTuning {
                initial_budget: Duration::from_millis(300),
                min_budget: Duration::from_millis(800),
                tick: Duration::ZERO,
                ..DrillTuning::default()
            },
            ..PlayerSettings::default()
        }
        .sanitized();

        assert_eq!(settings.version, 1);
        assert_eq!(settings.tuning.tick, Duration::from_millis(100));
        assert_eq!(settings.tuning.initial_budget, Duration::from_millis(800));
        assert_eq!(settings.tuning.validate(), Ok(()));
    }

    #[test]
    fn sanitized_zero_floor_becomes_positive() {
        let settings = PlayerSettings {
            tuning: DrillTuning {
                min_budget: Duration::ZERO,
                ..DrillTuning::default()
            },
            ..PlayerSettings::default()
        }
        .sanitized();
        assert_eq!(settings.tuning.min_budget, Duration::from_millis(1_000));
        assert_eq!(settings.tuning.validate(), Ok(()));
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let parsed: PlayerSettings =
            serde_json::from_str(r#"{"version":1,"tuning":{"decrement_ms":300}}"#)
                .expect("settings JSON should parse");
        assert_eq!(parsed.tuning.decrement, Duration::from_millis(300));
        assert_eq!(parsed.tuning.tick, Duration::from_millis(100));
        assert_eq!(parsed.gameplay, GameplaySettings::default());
        assert_eq!(parsed.library_path, None);
    }
}
