//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bintree/bintree.toml`
//! 3. Local config: `<dir>/.bintree.toml`
//! 4. Environment variables: `BINTREE_*` prefix, `__` between table and key

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::render::RenderStyle;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {message}")]
    Config { message: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

fn config_err(e: impl std::fmt::Display) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}

/// Reads one env override; an unset variable is `None`, a malformed one is an error.
fn env_override<T: DeserializeOwned>(config: &Config, key: &str) -> SettingsResult<Option<T>> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(SettingsError::Config {
            message: format!("BINTREE_{}: {e}", key.replace('.', "__").to_uppercase()),
        }),
    }
}

/// Raw render table; `None` means "inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderStyle {
    pub unit: Option<f64>,
    pub margin: Option<f64>,
    pub stroke: Option<String>,
    pub font_size: Option<u32>,
    pub x_tick_step: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_nodes: Option<usize>,
    pub output: Option<PathBuf>,
    pub render: RawRenderStyle,
}

impl RenderStyle {
    /// Overlay wins field by field where it is set.
    pub fn merge(&self, overlay: &RawRenderStyle) -> Self {
        Self {
            unit: overlay.unit.unwrap_or(self.unit),
            margin: overlay.margin.unwrap_or(self.margin),
            stroke: overlay.stroke.clone().unwrap_or_else(|| self.stroke.clone()),
            font_size: overlay.font_size.unwrap_or(self.font_size),
            x_tick_step: overlay.x_tick_step.unwrap_or(self.x_tick_step),
        }
    }
}

/// Unified configuration for bintree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Nodes to grow when no count or seed is given
    pub default_nodes: usize,
    /// Where `render` writes its SVG when no path is given
    pub output: PathBuf,
    /// Drawing settings
    pub render: RenderStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_nodes: 17,
            output: PathBuf::from("tree.svg"),
            render: RenderStyle::default(),
        }
    }
}

/// Get the XDG config directory for bintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bintree.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".bintree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> SettingsResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_nodes: overlay.default_nodes.unwrap_or(self.default_nodes),
            output: overlay.output.clone().unwrap_or_else(|| self.output.clone()),
            render: self.render.merge(&overlay.render),
        }
    }

    /// Expand `~` and `$VAR` in the output path.
    fn expand_paths(&mut self) {
        let raw = self.output.to_string_lossy().to_string();
        if let Ok(expanded) = shellexpand::full(&raw) {
            self.output = PathBuf::from(expanded.into_owned());
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.bintree.toml`
    pub fn load(local_dir: Option<&Path>) -> SettingsResult<Self> {
        Self::load_from(global_config_path().as_deref(), local_dir)
    }

    /// Like [`Settings::load`] with an explicit global config file.
    #[instrument(level = "debug")]
    pub fn load_from(global: Option<&Path>, local_dir: Option<&Path>) -> SettingsResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("Loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("Loading local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply BINTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> SettingsResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BINTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_override::<usize>(&config, "default_nodes")? {
            settings.default_nodes = val;
        }
        if let Some(val) = env_override::<String>(&config, "output")? {
            settings.output = PathBuf::from(val);
        }
        if let Some(val) = env_override(&config, "render.unit")? {
            settings.render.unit = val;
        }
        if let Some(val) = env_override(&config, "render.margin")? {
            settings.render.margin = val;
        }
        if let Some(val) = env_override(&config, "render.stroke")? {
            settings.render.stroke = val;
        }
        if let Some(val) = env_override(&config, "render.font_size")? {
            settings.render.font_size = val;
        }
        if let Some(val) = env_override(&config, "render.x_tick_step")? {
            settings.render.x_tick_step = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> SettingsResult<String> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bintree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bintree/bintree.toml
#   Local:  <dir>/.bintree.toml
#   Env:    BINTREE_* environment variables (e.g. BINTREE_RENDER__STROKE=red)

# Nodes to grow when neither a count nor --seed is given
# default_nodes = 17

# SVG output path for `bintree render`
# output = "tree.svg"

[render]
# Pixels per layout unit
# unit = 40.0

# Border around the drawing in pixels
# margin = 60.0

# Edge colour
# stroke = "blue"

# Label font size in pixels
# font_size = 12

# Spacing of x axis ticks in layout units
# x_tick_step = 0.5
"#
        .to_string()
    }
}
