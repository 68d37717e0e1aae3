use std::fmt;

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// Sentinel written wherever the upstream payload had no value.
pub const MISSING: &str = "N/A";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single value extracted from the upstream payload.
///
/// OpenWeatherMap omits whole sub-objects when a station has nothing to
/// report, so every reading is either the value itself or an explicit
/// placeholder. `Missing` renders as [`MISSING`] in CSV output and log
/// lines; a record is therefore always structurally complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T> {
    Present(T),
    Missing,
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Reading::Present(value),
            None => Reading::Missing,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Present(value) => value.fmt(f),
            Reading::Missing => f.write_str(MISSING),
        }
    }
}

impl<T: Serialize> Serialize for Reading<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Present(value) => value.serialize(serializer),
            Reading::Missing => serializer.serialize_str(MISSING),
        }
    }
}

/// One weather collection event, flattened to the fixed CSV schema.
///
/// Field declaration order is the schema: serde serializes struct fields in
/// this order, and [`WeatherRecord::FIELDS`] mirrors it for the header row.
/// `timestamp` is the local collection time, not the upstream observation
/// time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub city: String,
    pub country: String,
    #[serde(serialize_with = "format_timestamp")]
    pub timestamp: DateTime<Local>,
    pub temperature: Reading<f64>,
    pub feels_like: Reading<f64>,
    pub humidity: Reading<f64>,
    pub pressure: Reading<f64>,
    pub weather: Reading<String>,
    pub description: Reading<String>,
    pub wind_speed: Reading<f64>,
}

impl WeatherRecord {
    /// Header row of the output file, in schema order.
    pub const FIELDS: [&'static str; 10] = [
        "city",
        "country",
        "timestamp",
        "temperature",
        "feels_like",
        "humidity",
        "pressure",
        "weather",
        "description",
        "wind_speed",
    ];
}

fn format_timestamp<S: Serializer>(
    timestamp: &DateTime<Local>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}
