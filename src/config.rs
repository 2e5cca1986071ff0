//! Startup configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. JSON file named by `PENGUINS_DASHBOARD_CONFIG`
//! 2. `PENGUINS_DATA` environment variable (dataset path)
//! 3. first command-line argument (dataset path)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_ENV: &str = "PENGUINS_DASHBOARD_CONFIG";
pub const DATA_ENV: &str = "PENGUINS_DATA";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Table loaded at startup. Without one the app starts empty and waits
    /// for File → Open.
    pub dataset_path: Option<PathBuf>,
    /// Lower slider bound; defaults to 2000 g or below the lightest penguin.
    pub mass_slider_min: Option<f64>,
    /// Upper slider bound; defaults to 6000 g or above the heaviest penguin.
    pub mass_slider_max: Option<f64>,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            mass_slider_min: None,
            mass_slider_max: None,
            window_size: [1200.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Resolve configuration from the process environment and arguments.
    pub fn from_env() -> Result<Self> {
        let file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let data = std::env::var_os(DATA_ENV).map(PathBuf::from);
        let arg = std::env::args_os().nth(1).map(PathBuf::from);
        Self::resolve(file.as_deref(), data, arg)
    }

    /// Merge the three sources. Kept separate from [`Self::from_env`] so it
    /// can be exercised without touching the process environment.
    pub fn resolve(
        config_file: Option<&Path>,
        data_env: Option<PathBuf>,
        cli_path: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(path) = data_env {
            config.dataset_path = Some(path);
        }
        if let Some(path) = cli_path {
            config.dataset_path = Some(path);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
