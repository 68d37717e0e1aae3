//! Core library for the `weather-collector` CLI.
//!
//! This crate defines:
//! - Settings resolution (flags, environment, config file, defaults)
//! - The OpenWeatherMap current-weather client
//! - The flat observation record and its CSV sink
//!
//! It is used by `collector-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod openweather;
pub mod settings;
pub mod sink;

pub use config::Config;
pub use error::{CollectorError, Result};
pub use model::{Reading, WeatherRecord};
pub use openweather::OpenWeatherClient;
pub use settings::{Overrides, Settings};
pub use sink::append_record;
