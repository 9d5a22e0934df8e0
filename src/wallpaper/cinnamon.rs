use anyhow::Result;
use std::path::Path;

use super::gsettings;

const SCHEMA: &str = "org.cinnamon.desktop.background";

pub fn apply_wallpaper(path: &Path, picture_options: &str) -> Result<()> {
    gsettings::set(SCHEMA, "picture-uri", &gsettings::file_uri(path))?;
    gsettings::set(SCHEMA, "picture-options", picture_options)?;
    Ok(())
}
