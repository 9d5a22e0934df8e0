//! Desktop background setters.
//!
//! Each backend shells out to the tool its desktop provides. Desktops we do
//! not know are skipped with a warning rather than treated as an error.

use anyhow::{Context, Result};
use std::path::Path;

use crate::common::desktop::DesktopType;
use crate::config::Config;
use crate::ui::prelude::*;

pub mod cinnamon;
mod command;
pub mod gnome;
pub mod gsettings;
pub mod hyprland;
pub mod kwin;
pub mod sway;
pub mod x11;

/// Desktop to target: the configured override, else whatever is detected.
pub fn resolve_desktop(config: &Config) -> DesktopType {
    config.desktop.unwrap_or_else(DesktopType::detect)
}

/// Set `path` as the desktop background.
///
/// Returns `Ok(false)` when the desktop has no known setter.
pub fn apply_wallpaper(path: &Path, config: &Config) -> Result<bool> {
    let path = path
        .canonicalize()
        .context("Failed to resolve absolute path for wallpaper")?;
    let desktop = resolve_desktop(config);

    emit(
        Level::Debug,
        "wallpaper.desktop",
        &format!("Using wallpaper backend for {}", desktop.name()),
        None,
    );

    match desktop {
        DesktopType::Cinnamon => cinnamon::apply_wallpaper(&path, &config.picture_options)?,
        DesktopType::Gnome => gnome::apply_wallpaper(&path, &config.picture_options)?,
        DesktopType::Kde => kwin::apply_wallpaper(&path)?,
        DesktopType::Sway => sway::apply_wallpaper(&path)?,
        DesktopType::Hyprland => hyprland::apply_wallpaper(&path)?,
        DesktopType::X11 => x11::apply_wallpaper(&path)?,
        DesktopType::None | DesktopType::Unknown => return Ok(false),
    }

    Ok(true)
}
