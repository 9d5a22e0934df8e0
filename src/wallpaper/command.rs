use anyhow::{Context, Result};
use std::process::Command;

/// Error out unless `tool` is on `PATH`.
pub fn require(tool: &str) -> Result<()> {
    which::which(tool)
        .map(|_| ())
        .with_context(|| format!("{tool} is not installed"))
}

/// Run a setter command to completion and return its stdout. A non-zero
/// exit is an error carrying the command's stderr.
pub fn run(command: &mut Command) -> Result<String> {
    let program = command.get_program().to_string_lossy().to_string();
    let output = command
        .output()
        .with_context(|| format!("Failed to run {program}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{} failed ({}): {}", program, output.status, stderr.trim());
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
