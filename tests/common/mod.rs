use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Scratch image directory plus a config that disables the real setter
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir(temp_dir.path().join("walls"))?;
        fs::write(temp_dir.path().join("config.toml"), "desktop = \"none\"\n")?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The image pool directory
    pub fn walls(&self) -> PathBuf {
        self.path().join("walls")
    }

    pub fn sidecar(&self) -> PathBuf {
        self.walls().join("walls.ini")
    }

    pub fn add_image(&self, name: &str) -> Result<()> {
        fs::write(self.walls().join(name), PNG_HEADER)?;
        Ok(())
    }

    pub fn add_file(&self, name: &str, contents: &str) -> Result<()> {
        fs::write(self.walls().join(name), contents)?;
        Ok(())
    }

    pub fn add_bytes(&self, name: &str, contents: &[u8]) -> Result<()> {
        fs::write(self.walls().join(name), contents)?;
        Ok(())
    }

    pub fn write_config(&self, contents: &str) -> Result<()> {
        fs::write(self.path().join("config.toml"), contents)?;
        Ok(())
    }

    pub fn read_sidecar(&self) -> Result<String> {
        Ok(fs::read_to_string(self.sidecar())?)
    }

    /// Run the binary with the test config and a clean desktop environment
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_pointlessarrow"))
            .arg("--config")
            .arg(self.path().join("config.toml"))
            .arg("--no-color")
            .args(args)
            .env_remove("XDG_CURRENT_DESKTOP")
            .env_remove("DISPLAY")
            .env_remove("WAYLAND_DISPLAY")
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
