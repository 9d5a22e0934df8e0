use anyhow::Result;
use std::path::Path;
use std::process::Command;

use super::command;

pub fn apply_wallpaper(path: &Path) -> Result<()> {
    let message = format!("output \"*\" bg \"{}\" fill", path.display());
    command::run(Command::new("swaymsg").arg(message))?;
    Ok(())
}
