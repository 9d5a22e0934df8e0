use anyhow::Result;
use std::path::Path;
use std::process::Command;

use super::command;

/// Run `gsettings set <schema> <key> <value>`
pub fn set(schema: &str, key: &str, value: &str) -> Result<()> {
    command::run(Command::new("gsettings").args(["set", schema, key, value]))?;
    Ok(())
}

pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_uri() {
        assert_eq!(
            file_uri(Path::new("/home/me/walls/a.jpg")),
            "file:///home/me/walls/a.jpg"
        );
    }
}
