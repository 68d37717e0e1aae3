use std::{env, path::PathBuf};

use crate::{
    config::Config,
    error::{CollectorError, Result},
};

/// Environment variable consulted for the API key when `--api-key` is
/// absent.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_CITY: &str = "London";
pub const DEFAULT_COUNTRY: &str = "UK";
pub const DEFAULT_OUTPUT: &str = "weather_data.csv";

/// Values taken from the command line; `None` means the flag was not given.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub city: Option<String>,
    pub country: Option<String>,
    pub api_key: Option<String>,
    pub output: Option<PathBuf>,
}

/// Fully resolved parameters for one collection run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub city: String,
    pub country: String,
    pub api_key: String,
    pub output: PathBuf,
}

impl Settings {
    /// Merge flag overrides, environment, config file and built-in defaults.
    ///
    /// Precedence is flag > [`API_KEY_ENV`] > config > default. The API key
    /// is the one parameter without a default; an empty string counts as
    /// absent, and resolution fails before any I/O happens.
    pub fn resolve(overrides: Overrides, config: &Config) -> Result<Self> {
        Self::merge(overrides, config, env::var(API_KEY_ENV).ok())
    }

    fn merge(overrides: Overrides, config: &Config, env_api_key: Option<String>) -> Result<Self> {
        let api_key = overrides
            .api_key
            .or(env_api_key)
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        if api_key.is_empty() {
            return Err(CollectorError::MissingApiKey);
        }

        Ok(Self {
            city: overrides
                .city
                .or_else(|| config.city.clone())
                .unwrap_or_else(|| DEFAULT_CITY.to_owned()),
            country: overrides
                .country
                .or_else(|| config.country.clone())
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_owned()),
            api_key,
            output: overrides
                .output
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        })
    }
}
