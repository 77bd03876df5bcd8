pub mod chart;
pub mod cli;
pub mod core;

pub use crate::core::config;

use crate::chart::{SystemViewer, Viewer};
use anyhow::Result;
use std::path::Path;
use tracing::debug;

pub enum AppCommand {
    /// Render the frontier plot; `no_show` skips the viewer.
    Plot { no_show: bool },
    Summary,
}

/// Loads the configuration and runs `command`.
///
/// `results_dir` overrides the configured results directory.
pub fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    results_dir: Option<&Path>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    if let Some(dir) = results_dir {
        config.results_dir = dir.to_path_buf();
    }
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Plot { no_show } => {
            let system_viewer = SystemViewer;
            let viewer: Option<&dyn Viewer> = if config.show && !no_show {
                Some(&system_viewer)
            } else {
                None
            };
            cli::plot::run(&config, viewer).map(|_| ())
        }
        AppCommand::Summary => cli::summary::run(&config),
    }
}
