use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{CollectorError, Result};

/// Optional on-disk configuration.
///
/// Every key is optional and CLI flags override anything set here. The file
/// exists mainly so scheduled jobs can keep the API key out of process
/// argument lists.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// city = "Oslo"
/// country = "NO"
/// output = "data/weather.csv"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist and parse. Without one, a
    /// missing file at the default location is a first run and yields an
    /// empty config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = Self::default_path()?;
                Self::load_default(&path)
            }
        }
    }

    /// Path to the config file when `--config` is not given.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-collector", "weather-collector")
            .ok_or(CollectorError::ConfigDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn load_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|err| CollectorError::ConfigRead(path.to_owned(), err))?;

        toml::from_str(&contents).map_err(|err| CollectorError::ConfigParse(path.to_owned(), err))
    }
}
