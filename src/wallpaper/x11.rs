use anyhow::Result;
use std::path::Path;
use std::process::Command;

use super::command;

pub fn apply_wallpaper(path: &Path) -> Result<()> {
    command::require("feh")?;
    command::run(Command::new("feh").arg("--bg-fill").arg(path))?;
    Ok(())
}
