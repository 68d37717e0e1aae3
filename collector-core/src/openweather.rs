use std::{env, time::Duration};

use chrono::Local;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::{
    error::{CollectorError, Result},
    model::WeatherRecord,
};

/// Production endpoint base.
pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org";

/// Environment variable overriding the endpoint base (proxies, tests).
pub const API_URL_ENV: &str = "OPENWEATHER_API_URL";

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// Total wait for the single request; there are no retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the OpenWeatherMap current-weather API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    /// Build a client for [`DEFAULT_API_URL`], or for the [`API_URL_ENV`]
    /// override when that is set.
    pub fn new(api_key: String) -> Result<Self> {
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        Self::with_base_url(api_key, base_url)
    }

    /// Build a client against an explicit endpoint base.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(CollectorError::ClientBuild)?;

        Ok(Self {
            api_key,
            base_url,
            http,
        })
    }

    /// Fetch the current observation for a city and flatten it into a
    /// [`WeatherRecord`].
    ///
    /// Issues exactly one GET with `q={city},{country}` and metric units.
    /// Any transport failure, non-success status or undecodable body comes
    /// back as an error; nothing is retried.
    pub async fn fetch_current(&self, city: &str, country: &str) -> Result<WeatherRecord> {
        info!("Fetching weather for {city}, {country}");

        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);
        let place = format!("{city},{country}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", place.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|err| CollectorError::Request(url.clone(), err))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| CollectorError::BodyRead(url.clone(), err))?;

        if !status.is_success() {
            return Err(CollectorError::HttpStatus {
                url,
                status,
                body: truncate_body(&body),
            });
        }

        let payload: CurrentWeather = serde_json::from_str(&body)?;
        let record = flatten(payload, city, country);

        info!(
            "Data received: {}°C, {}",
            record.temperature, record.weather
        );

        Ok(record)
    }
}

/// Subset of the current-weather payload this tool consumes.
///
/// Every sub-object is optional: stations omit whole sections rather than
/// sending nulls, and a thin payload must still produce a record.
#[derive(Debug, Deserialize)]
struct CurrentWeather {
    name: Option<String>,
    sys: Option<Sys>,
    main: Option<Main>,
    wind: Option<Wind>,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct Sys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: Option<String>,
    description: Option<String>,
}

/// Flatten the nested payload into the fixed record schema.
///
/// The API's own naming wins over the requested one when present; readings
/// absent anywhere along their path become `Missing`. Only the first entry
/// of the `weather` list is consulted. The timestamp is collection time.
fn flatten(
    payload: CurrentWeather,
    requested_city: &str,
    requested_country: &str,
) -> WeatherRecord {
    let CurrentWeather {
        name,
        sys,
        main,
        wind,
        weather,
    } = payload;
    let condition = weather.into_iter().next();

    WeatherRecord {
        city: name.unwrap_or_else(|| requested_city.to_owned()),
        country: sys
            .and_then(|sys| sys.country)
            .unwrap_or_else(|| requested_country.to_owned()),
        timestamp: Local::now(),
        temperature: main.as_ref().and_then(|main| main.temp).into(),
        feels_like: main.as_ref().and_then(|main| main.feels_like).into(),
        humidity: main.as_ref().and_then(|main| main.humidity).into(),
        pressure: main.as_ref().and_then(|main| main.pressure).into(),
        weather: condition.as_ref().and_then(|cond| cond.main.clone()).into(),
        description: condition.and_then(|cond| cond.description).into(),
        wind_speed: wind.and_then(|wind| wind.speed).into(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let excerpt: String = body.chars().take(MAX).collect();
        format!("{excerpt}...")
    } else {
        body.to_owned()
    }
}
