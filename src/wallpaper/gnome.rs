use anyhow::Result;
use std::path::Path;

use super::gsettings;

const SCHEMA: &str = "org.gnome.desktop.background";

pub fn apply_wallpaper(path: &Path, picture_options: &str) -> Result<()> {
    let uri = gsettings::file_uri(path);
    gsettings::set(SCHEMA, "picture-uri", &uri)?;
    // Only exists on GNOME 42+, so a failure here is not fatal
    let _ = gsettings::set(SCHEMA, "picture-uri-dark", &uri);
    gsettings::set(SCHEMA, "picture-options", picture_options)?;
    Ok(())
}
