use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use colored::*;
use rand::Rng;
use serde_json::json;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::rotation::{DirectoryPool, RotationStore, select, sidecar_path};
use crate::ui::prelude::*;
use crate::wallpaper;

#[derive(Args, Debug, Clone)]
pub struct RotateArgs {
    /// Don't change wallpaper, just print out what would happen
    #[arg(short, long)]
    pub dryrun: bool,

    /// The directory where wallpaper images are stored
    #[arg(value_name = "IMAGE_DIRECTORY")]
    pub imgdir: PathBuf,
}

#[derive(Error, Debug)]
pub enum RotateError {
    #[error("\"{}\" does not exist or is not a directory!", .0.display())]
    InvalidDirectory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct RotateOutcome {
    /// Absolute path of today's wallpaper
    pub chosen: Option<PathBuf>,
    pub regenerated: bool,
    /// Whether a desktop setter actually ran
    pub applied: bool,
    pub sidecar: PathBuf,
}

/// Rotate the wallpaper for today.
pub fn run(args: &RotateArgs, config: &Config) -> Result<RotateOutcome> {
    let today = Local::now().date_naive();
    run_for_date(args, config, today, &mut rand::thread_rng())
}

pub fn run_for_date<R: Rng + ?Sized>(
    args: &RotateArgs,
    config: &Config,
    today: NaiveDate,
    rng: &mut R,
) -> Result<RotateOutcome> {
    validate_dir(&args.imgdir)?;

    let sidecar = sidecar_path(&args.imgdir)?;
    let pool = match sidecar.parent() {
        Some(dir) => DirectoryPool::new(dir),
        None => return Err(RotateError::InvalidDirectory(args.imgdir.clone()).into()),
    };

    let mut store = RotationStore::load(&sidecar)?;
    emit(
        Level::Debug,
        "rotate.loaded",
        &format!("Loaded {} entries from {}", store.len(), sidecar.display()),
        None,
    );

    let selection = select(&mut store, today, &pool, rng)?;
    if selection.regenerated {
        emit(
            Level::Info,
            "rotate.regenerated",
            &format!("Shuffled {} images into a new rotation", store.len()),
            Some(json!({ "count": store.len() })),
        );
    }

    let chosen = selection.chosen.as_ref().map(|name| pool.dir().join(name));
    let mut applied = false;

    match &chosen {
        Some(path) => {
            emit(
                Level::Success,
                "rotate.selected",
                &format!("Setting wallpaper to {}", path.display().to_string().bold()),
                Some(json!({ "path": path.display().to_string(), "date": today.to_string() })),
            );
            if args.dryrun {
                emit(
                    Level::Info,
                    "rotate.dry_run",
                    "Dry run, wallpaper left unchanged",
                    None,
                );
            } else {
                applied = apply(path, config);
            }
        }
        None => emit(
            Level::Warn,
            "rotate.empty",
            &format!("No images found in {}", pool.dir().display()),
            None,
        ),
    }

    store.save(&sidecar)?;
    emit(
        Level::Debug,
        "rotate.saved",
        &format!("Saved {} entries to {}", store.len(), sidecar.display()),
        None,
    );

    Ok(RotateOutcome {
        chosen,
        regenerated: selection.regenerated,
        applied,
        sidecar,
    })
}

fn validate_dir(dir: &Path) -> Result<(), RotateError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(RotateError::InvalidDirectory(dir.to_path_buf()))
    }
}

/// Setter failures are reported but do not fail the run; the rotation state
/// has already advanced and is saved regardless.
fn apply(path: &Path, config: &Config) -> bool {
    match wallpaper::apply_wallpaper(path, config) {
        Ok(true) => true,
        Ok(false) => {
            emit(
                Level::Warn,
                "rotate.no_setter",
                &format!(
                    "Don't know how to set the wallpaper on {}, skipping",
                    wallpaper::resolve_desktop(config).name()
                ),
                None,
            );
            false
        }
        Err(e) => {
            emit(
                Level::Warn,
                "rotate.apply_failed",
                &format!("Failed to set wallpaper: {e:#}"),
                None,
            );
            false
        }
    }
}
