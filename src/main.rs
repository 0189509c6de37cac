// src/main.rs
//! Folio - A terminal file manager.

use std::{env, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use folio::{
    app::{Action, App, NoticeLevel},
    config::Config,
    fs::LocalHost,
    logging, ui,
};

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Browse, preview and manage files in the terminal")]
struct Cli {
    /// Folder to open on start (defaults to the working directory)
    dir: Option<PathBuf>,

    /// Config file (defaults to <config dir>/folio/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level or filter directive, overrides the config file
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = match Config::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let log = logging::init(level)?;
    info!(log = %log.path.display(), "folio starting");

    let start = match cli.dir {
        Some(dir) => dir,
        None => env::current_dir()?,
    };
    let mut app = App::new(Box::new(LocalHost::new()), config);
    app.dispatch(Action::OpenFolder(start.display().to_string()));
    if let Some(err) = config_error {
        app.notify(NoticeLevel::Warn, format!("{err}, using defaults"));
    }

    ui::run(app)
}
