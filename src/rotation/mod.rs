//! Wallpaper rotation over the images of one directory.
//!
//! Every image is shown once, in a shuffled order, before any image repeats.
//! Progress is kept in a sidecar file inside the directory, named after the
//! directory itself (`~/Pictures/walls/walls.ini`).
//!
//! There is no locking. Two runs against the same directory at the same time
//! race on the sidecar and the last writer wins.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub mod pool;
pub mod selector;
pub mod store;

pub use pool::{DirectoryPool, ImagePool};
pub use selector::{Selection, select};
pub use store::{LastUsed, RotationEntry, RotationStore};

/// Location of the sidecar file for `dir`.
///
/// The directory is canonicalized first so that `.` or a trailing slash
/// still yields a proper file name.
pub fn sidecar_path(dir: &Path) -> Result<PathBuf> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("resolving {}", dir.display()))?;
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string());
    Ok(dir.join(format!("{name}.ini")))
}
