use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::common::desktop::DesktopType;
use crate::ui::prelude::*;

fn default_picture_options() -> String {
    "scaled".to_string()
}

/// User settings for the wallpaper setter. The rotation itself has no knobs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Force a specific setter backend instead of detecting the desktop
    #[serde(default)]
    pub desktop: Option<DesktopType>,
    /// Scaling mode passed to Cinnamon/GNOME (`scaled`, `zoom`, `centered`, ...)
    #[serde(default = "default_picture_options")]
    pub picture_options: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            desktop: None,
            picture_options: default_picture_options(),
        }
    }
}

impl Config {
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Unable to determine user config directory")?
            .join("pointlessarrow")
            .join("config.toml"))
    }

    /// Load from the default location, or from `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Self::load_from_path(&Self::config_file_path()?),
        }
    }

    /// Like [`Config::load`], but an unreadable or malformed file only warns.
    /// The setter options never block a rotation.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            emit(
                Level::Warn,
                "config.invalid",
                &format!("Ignoring config, using defaults: {e:#}"),
                None,
            );
            Self::default()
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&s).with_context(|| format!("parsing config {}", path.display()))
    }
}
