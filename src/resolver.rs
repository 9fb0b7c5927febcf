//! Startup city resolution.
//!
//! Picks the initial city from, in order: a previously saved choice, the
//! catalog entry nearest to the machine's approximate position, or a fixed
//! fallback. `resolve` itself is a pure function; the position comes from a
//! one-shot IP geolocation lookup that the caller runs (or skips) first.

use serde::Deserialize;
use tracing::debug;

use crate::catalog::{City, FALLBACK_CITY_ID};

/// A geographic position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Resolve the initial city id.
///
/// A saved id wins outright when it is still in the catalog (no distance
/// computation happens). Otherwise the nearest catalog entry to `position`
/// is chosen by straight-line distance, ties going to the earliest entry.
/// With neither input, the fallback id is returned. Never fails.
pub fn resolve<'a>(
    saved: Option<&str>,
    position: Option<Coordinates>,
    catalog: &'a [City],
) -> &'a str {
    if let Some(saved) = saved {
        if let Some(city) = catalog.iter().find(|city| city.id == saved) {
            return city.id;
        }
    }

    let Some(position) = position else {
        return FALLBACK_CITY_ID;
    };
    nearest(position, catalog).unwrap_or(FALLBACK_CITY_ID)
}

/// Id of the catalog entry nearest to `position`, first entry winning ties.
fn nearest(position: Coordinates, catalog: &[City]) -> Option<&str> {
    let mut best: Option<&City> = None;
    let mut best_distance = f64::INFINITY;

    for city in catalog {
        // Squared distance orders the same as distance; no sqrt needed.
        let d = (city.lat - position.lat).powi(2) + (city.lon - position.lon).powi(2);
        if d < best_distance {
            best_distance = d;
            best = Some(city);
        }
    }

    best.map(|city| city.id)
}

/// Geolocation endpoint returning the caller's approximate coordinates.
pub const DEFAULT_LOCATE_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Geolocation failure. Every variant is treated as "position unavailable";
/// none of them reach the user.
#[derive(Debug)]
pub enum LocateError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
    /// Response parsed but carried no coordinates.
    MissingCoordinates,
}

impl std::fmt::Display for LocateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocateError::Request(e) => write!(f, "geolocation request failed: {}", e),
            LocateError::Status(status) => write!(f, "geolocation service returned {}", status),
            LocateError::MissingCoordinates => {
                write!(f, "geolocation response had no coordinates")
            }
        }
    }
}

impl std::error::Error for LocateError {}

impl From<reqwest::Error> for LocateError {
    fn from(e: reqwest::Error) -> Self {
        LocateError::Request(e)
    }
}

/// One-shot IP geolocation client.
#[derive(Clone, Debug)]
pub struct Locator {
    client: reqwest::Client,
    url: String,
}

impl Locator {
    pub fn new() -> Result<Self, LocateError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: DEFAULT_LOCATE_URL.to_string(),
        })
    }

    /// Point the locator at a different endpoint (used by tests).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Ask the service for the machine's approximate coordinates.
    pub async fn locate(&self) -> Result<Coordinates, LocateError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(LocateError::Status(response.status()));
        }

        let data: IpApiResponse = response.json().await?;
        match (data.latitude, data.longitude) {
            (Some(lat), Some(lon)) => {
                debug!(lat, lon, "geolocation resolved");
                Ok(Coordinates { lat, lon })
            }
            _ => Err(LocateError::MissingCoordinates),
        }
    }
}
