use anyhow::Result;
use std::path::Path;
use std::process::Command;

use super::command;

const QDBUS_COMMANDS: [&str; 3] = ["qdbus6", "qdbus", "qdbus-qt5"];

pub fn apply_wallpaper(path: &Path) -> Result<()> {
    if command::run(Command::new("plasma-apply-wallpaperimage").arg(path)).is_ok() {
        return Ok(());
    }

    let script = plasma_script(path);
    for cmd in QDBUS_COMMANDS {
        if run_qdbus_script(cmd, &script).is_ok() {
            return Ok(());
        }
    }

    anyhow::bail!(
        "Failed to set KDE wallpaper: neither plasma-apply-wallpaperimage nor qdbus found/worked"
    )
}

fn plasma_script(path: &Path) -> String {
    let escaped = path
        .to_string_lossy()
        .replace('\\', "\\\\")
        .replace('"', "\\\"");
    format!(
        r#"
        desktops().forEach(d => {{
            d.currentConfigGroup = Array("Wallpaper", "org.kde.image", "General");
            d.writeConfig("Image", "file://{escaped}");
            d.reloadConfig();
        }});
        "#
    )
}

fn run_qdbus_script(cmd: &str, script: &str) -> Result<()> {
    command::run(Command::new(cmd).args([
        "org.kde.plasmashell",
        "/PlasmaShell",
        "org.kde.PlasmaShell.evaluateScript",
        script,
    ]))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plasma_script_escapes_quotes() {
        let script = plasma_script(Path::new("/walls/say \"hi\".png"));
        assert!(script.contains(r#"file:///walls/say \"hi\".png"#));
    }
}
