//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/steptree/steptree.toml`
//! 3. Local config: `<script_dir>/.steptree.toml`
//! 4. Environment variables: `STEPTREE_*` prefix, `__` between nested keys

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::OutlineOptions;

/// Playback and rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlaySettings {
    /// Start `play` with every node revealed instead of rewound
    pub start_revealed: bool,
    /// Render hidden nodes as placeholders
    pub show_hidden: bool,
    /// Label used for hidden nodes
    pub hidden_placeholder: String,
    /// Append each node's anchoring to its label
    pub show_placement: bool,
}

impl Default for PlaySettings {
    fn default() -> Self {
        Self {
            start_revealed: false,
            show_hidden: false,
            hidden_placeholder: "·".into(),
            show_placement: false,
        }
    }
}

/// Raw play settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPlaySettings {
    pub start_revealed: Option<bool>,
    pub show_hidden: Option<bool>,
    pub hidden_placeholder: Option<String>,
    pub show_placement: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub canvas: Option<String>,
    #[serde(default)]
    pub play: RawPlaySettings,
}

impl PlaySettings {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawPlaySettings) -> Self {
        Self {
            start_revealed: overlay.start_revealed.unwrap_or(self.start_revealed),
            show_hidden: overlay.show_hidden.unwrap_or(self.show_hidden),
            hidden_placeholder: overlay
                .hidden_placeholder
                .clone()
                .unwrap_or_else(|| self.hidden_placeholder.clone()),
            show_placement: overlay.show_placement.unwrap_or(self.show_placement),
        }
    }
}

/// Unified configuration for steptree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Canvas name handed to the node factory
    pub canvas: String,
    pub play: PlaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas: "canvas".into(),
            play: PlaySettings::default(),
        }
    }
}

/// Get the XDG config directory for steptree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "steptree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("steptree.toml"))
}

/// Get the path to the local config file next to a script.
pub fn local_config_path(script_dir: &Path) -> PathBuf {
    script_dir.join(".steptree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// An unset variable yields `None`; a set but unparsable one is an error.
fn env_override<'de, T: Deserialize<'de>>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("environment override {}: {}", key, e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            canvas: overlay.canvas.clone().unwrap_or_else(|| self.canvas.clone()),
            play: self.play.merge(&overlay.play),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `script_dir` - Optional directory of the script, for local config
    pub fn load(script_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), script_dir)
    }

    /// Load settings from an explicit global config file and script directory.
    ///
    /// Missing files are skipped; unreadable or malformed ones are errors.
    pub fn load_layers(
        global_path: Option<&Path>,
        script_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config next to the script
        if let Some(dir) = script_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!(path = %local_path.display(), "loading local config");
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply STEPTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("STEPTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_override(&config, "canvas")? {
            settings.canvas = val;
        }
        if let Some(val) = env_override(&config, "play.start_revealed")? {
            settings.play.start_revealed = val;
        }
        if let Some(val) = env_override(&config, "play.show_hidden")? {
            settings.play.show_hidden = val;
        }
        if let Some(val) = env_override(&config, "play.hidden_placeholder")? {
            settings.play.hidden_placeholder = val;
        }
        if let Some(val) = env_override(&config, "play.show_placement")? {
            settings.play.show_placement = val;
        }

        Ok(settings)
    }

    /// Rendering options derived from the play settings.
    pub fn outline_options(&self) -> OutlineOptions {
        OutlineOptions {
            show_hidden: self.play.show_hidden,
            hidden_placeholder: self.play.hidden_placeholder.clone(),
            show_placement: self.play.show_placement,
            canvas: self.canvas.clone(),
        }
    }

    /// Serialize the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified() {
        let base = PlaySettings::default();
        let overlay = RawPlaySettings {
            show_hidden: Some(true),
            ..Default::default()
        };

        let merged = base.merge(&overlay);

        assert!(merged.show_hidden);
        assert!(!merged.start_revealed);
        assert_eq!(merged.hidden_placeholder, "·");
    }

    #[test]
    fn given_default_settings_when_serializing_then_contains_play_table() {
        let toml = Settings::default().to_toml().unwrap();

        assert!(toml.contains("canvas = \"canvas\""));
        assert!(toml.contains("[play]"));
    }
}
