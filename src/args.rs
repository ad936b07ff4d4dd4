use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::{
    fs::projects_file::PROJECTS_FILE_NAME,
    utils::dir::{create_application_default_path, create_dir},
};

#[derive(Parser, Debug)]
#[command(name = "Worktally", version, long_about = None)]
#[command(about = "Stopwatch for tracking time spent on projects")]
pub struct Args {
    #[arg(
        long,
        help = "Application directory holding the project list and logs. By default $XDG_STATE_HOME/worktally or $HOME/.local/state/worktally"
    )]
    pub dir: Option<PathBuf>,
    #[arg(long = "export-dir", help = "Directory for exported records. Current directory by default")]
    pub export_dir: Option<PathBuf>,
    /// This option is for debugging purposes only.
    #[arg(long = "log-console")]
    pub log_console: bool,
    #[arg(long = "log-filter")]
    pub log: Option<LevelFilter>,
}

/// Paths used by the running application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_dir: PathBuf,
    pub projects_file: PathBuf,
    pub export_dir: PathBuf,
}

impl AppConfig {
    pub fn new(app_dir: PathBuf, export_dir: PathBuf) -> Self {
        Self {
            projects_file: app_dir.join(PROJECTS_FILE_NAME),
            app_dir,
            export_dir,
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.app_dir.join("logs")
    }
}

impl Args {
    pub fn resolve(&self) -> Result<AppConfig> {
        let app_dir = match &self.dir {
            Some(dir) => create_dir(dir.clone())?,
            None => create_application_default_path()?,
        };
        let export_dir = match &self.export_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Current directory is not accessible")?,
        };
        Ok(AppConfig::new(app_dir, export_dir))
    }
}
