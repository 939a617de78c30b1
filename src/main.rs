// src/main.rs
use anyhow::Result;
use clap::Parser;

use auraplay::{cli::Args, config::Settings, fs::ensure_audio, logging, ui};

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    settings.validate()?;

    let _log_guard = logging::init(&settings)?;

    let file_type = ensure_audio(&args.file)?;
    tracing::info!(path = %args.file.display(), mime = %file_type.mime, "input accepted");

    ui::run(&args.file, &settings)
}
