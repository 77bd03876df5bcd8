use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_TITLE: &str = "Efficient Frontier - Genetic Algorithm Optimization";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the optimiser's artifacts and the rendered plot.
    pub results_dir: PathBuf,
    pub frontier_file: String,
    pub user_portfolio_file: String,
    pub max_sharpe_file: String,
    pub output_file: String,
    pub title: String,
    /// Open the rendered document in the system viewer.
    pub show: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            results_dir: PathBuf::from("Results"),
            frontier_file: "Efficient Frontier.csv".to_string(),
            user_portfolio_file: "User Portfolio.csv".to_string(),
            max_sharpe_file: "Best Sharpe Portfolio.csv".to_string(),
            output_file: "Efficient Frontier Plot.html".to_string(),
            title: DEFAULT_TITLE.to_string(),
            show: true,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "efplot", "efplot")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn frontier_path(&self) -> PathBuf {
        self.results_dir.join(&self.frontier_file)
    }

    pub fn user_portfolio_path(&self) -> PathBuf {
        self.results_dir.join(&self.user_portfolio_file)
    }

    pub fn max_sharpe_path(&self) -> PathBuf {
        self.results_dir.join(&self.max_sharpe_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.results_dir.join(&self.output_file)
    }
}
