// Don't open a console next to the window on Windows release builds.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info};
use worktally::{
    args::Args,
    fs::projects_file::load_projects,
    gui,
    tracker::projects::ProjectRegistry,
    utils::{logging::enable_logging, runtime::single_thread_runtime},
};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve()?;
    enable_logging(&config.log_dir(), args.log, args.log_console)?;
    info!("Starting with {config:?}");

    let loaded = single_thread_runtime()?.block_on(load_projects(&config.projects_file));
    let (projects, startup_error) = match loaded {
        Ok(names) => (ProjectRegistry::new(names), None),
        Err(e) => {
            error!("Failed to load projects {e:?}");
            (ProjectRegistry::default(), Some(format!("{e:#}")))
        }
    };

    if let Err(e) = gui::run(config, projects, startup_error) {
        error!("Error running gui {e:?}");
        bail!("Error running gui: {e}");
    }
    Ok(())
}
