//! Hyprland draws no background itself; swww does, once its daemon is up.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use std::thread;
use std::time::Duration;

use super::command;

const DAEMON_ATTEMPTS: u32 = 20;
const DAEMON_POLL: Duration = Duration::from_millis(50);

pub fn apply_wallpaper(path: &Path) -> Result<()> {
    command::require("swww")?;
    ensure_daemon()?;
    command::run(Command::new("swww").arg("img").arg(path))?;
    Ok(())
}

fn daemon_running() -> bool {
    command::run(Command::new("swww").arg("query")).is_ok()
}

fn ensure_daemon() -> Result<()> {
    if daemon_running() {
        return Ok(());
    }
    Command::new("swww-daemon")
        .spawn()
        .context("Failed to start swww-daemon")?;

    if !wait_until(DAEMON_ATTEMPTS, DAEMON_POLL, daemon_running) {
        anyhow::bail!(
            "swww-daemon did not answer within {}ms",
            DAEMON_POLL.as_millis() * u128::from(DAEMON_ATTEMPTS)
        );
    }
    Ok(())
}

/// Poll `ready` until it holds, sleeping `interval` between tries.
fn wait_until(attempts: u32, interval: Duration, mut ready: impl FnMut() -> bool) -> bool {
    for attempt in 0..attempts {
        if attempt > 0 {
            thread::sleep(interval);
        }
        if ready() {
            return true;
        }
    }
    false
}
