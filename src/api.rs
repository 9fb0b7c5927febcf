//! OpenWeatherMap client.
//!
//! One endpoint is used: current weather by coordinates. The provider
//! reports temperatures in Kelvin; they are rounded to whole Celsius here so
//! the rest of the app only ever sees display-ready values.

use std::time::Duration;

use serde::Deserialize;

use crate::state::WeatherSnapshot;

/// Production API host; tests point `with_base_url` at a local mock.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: MainInfo,
    weather: Vec<ConditionInfo>,
    wind: Option<WindInfo>,
}

#[derive(Debug, Deserialize)]
struct MainInfo {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionInfo {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: Option<f64>,
}

/// Fetch failure. All variants surface to the user as one generic localized
/// message; the detail is only logged.
#[derive(Debug)]
pub enum FetchError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
    /// Response carried no `weather[0]` entry.
    MissingCondition,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(e) => write!(f, "weather request failed: {}", e),
            FetchError::Status(status) => write!(f, "weather provider returned {}", status),
            FetchError::MissingCondition => write!(f, "weather response had no condition entry"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Request(e)
    }
}

/// Client for the current-weather endpoint.
#[derive(Clone, Debug)]
pub struct WeatherApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherApi {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Point the client at a different host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch and normalize current weather for the given coordinates.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, FetchError> {
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}",
            self.base_url, lat, lon, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let data: WeatherResponse = response.json().await?;
        let condition = data
            .weather
            .into_iter()
            .next()
            .ok_or(FetchError::MissingCondition)?;

        Ok(WeatherSnapshot {
            temperature_c: kelvin_to_celsius(data.main.temp),
            min_c: kelvin_to_celsius(data.main.temp_min),
            max_c: kelvin_to_celsius(data.main.temp_max),
            feels_like_c: kelvin_to_celsius(data.main.feels_like),
            humidity_pct: data.main.humidity,
            wind_speed: data.wind.and_then(|wind| wind.speed),
            description: condition.description,
            icon: condition.icon,
        })
    }
}

/// Convert Kelvin to whole Celsius, rounding half away from zero.
pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    (kelvin - 273.15).round() as i32
}
