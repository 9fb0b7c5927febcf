//! Side effects declared by the reducer and executed by the main loop.
//!
//! Effects keep the reducer pure: it only describes work, the loop performs
//! it. Async effects run as keyed tasks, so starting a fetch for a new city
//! automatically aborts the one still in flight.

use tracing::{debug, warn};

use crate::action::Action;
use crate::api::WeatherApi;
use crate::catalog;
use crate::persist::SavedCity;
use crate::resolver::Locator;
use crate::tasks::TaskPool;

/// Task key for the current-weather fetch; one epoch at a time.
pub const WEATHER_TASK: &str = "weather";
/// Task key for the startup geolocation lookup.
pub const LOCATE_TASK: &str = "locate";

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Run the one-shot geolocation lookup.
    Locate,
    /// Abort the geolocation lookup (a manual selection made it moot).
    CancelLocate,
    /// Fetch current weather for a catalog city.
    FetchWeather { city_id: &'static str },
    /// Remember a geolocation-based resolution for future startups.
    PersistCity { city_id: &'static str },
}

/// Collaborators the effect handler needs.
pub struct EffectContext<'a> {
    pub tasks: &'a mut TaskPool,
    pub api: &'a WeatherApi,
    pub locator: &'a Locator,
    pub saved: Option<&'a SavedCity>,
}

/// Execute one effect.
pub fn handle_effect(effect: Effect, ctx: &mut EffectContext<'_>) {
    match effect {
        Effect::Locate => {
            let locator = ctx.locator.clone();
            ctx.tasks.spawn(LOCATE_TASK, async move {
                let position = match locator.locate().await {
                    Ok(position) => Some(position),
                    Err(e) => {
                        debug!(error = %e, "geolocation unavailable, will fall back");
                        None
                    }
                };
                Action::LocateDidFinish(position)
            });
        }

        Effect::CancelLocate => ctx.tasks.cancel(LOCATE_TASK),

        Effect::FetchWeather { city_id } => {
            // Unknown ids are skipped without a request; the picker only
            // offers catalog entries, so this shouldn't happen through the UI.
            let Some(city) = catalog::find(city_id) else {
                warn!(city_id, "unknown city id, skipping fetch");
                return;
            };

            let api = ctx.api.clone();
            let (lat, lon) = (city.lat, city.lon);
            ctx.tasks.spawn(WEATHER_TASK, async move {
                match api.current(lat, lon).await {
                    Ok(snapshot) => Action::WeatherDidLoad(snapshot),
                    Err(e) => {
                        warn!(error = %e, "weather fetch failed");
                        Action::WeatherDidError(e.to_string())
                    }
                }
            });
        }

        Effect::PersistCity { city_id } => {
            if let Some(saved) = ctx.saved {
                if let Err(e) = saved.store(city_id) {
                    warn!(error = %e, "failed to persist city choice");
                }
            }
        }
    }
}
