use clap::Parser;
use std::path::PathBuf;

use pointlessarrow::config::Config;
use pointlessarrow::rotate::{self, RotateArgs};
use pointlessarrow::ui::{self, prelude::*};

/// Wallpaper changer: shows every image in a directory once before repeating
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug output
    #[arg(long)]
    debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    rotate: RotateArgs,
}

fn main() {
    let cli = Cli::parse();

    ui::init(cli.format, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    if let Err(e) = run(&cli) {
        emit(Level::Error, "pointlessarrow.error", &format!("ERROR: {e:#}"), None);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(cli.config.as_deref());
    let outcome = rotate::run(&cli.rotate, &config)?;
    if outcome.applied {
        emit(Level::Debug, "rotate.applied", "Wallpaper applied", None);
    }
    Ok(())
}
