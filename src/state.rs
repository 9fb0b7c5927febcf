//! Application state — single source of truth.
//!
//! Components receive `&AppState` through their props; only the reducer
//! mutates it.

use crate::i18n::Lang;

/// Spinner animation cadence.
pub const TICK_MS: u64 = 120;

/// Normalized current-weather record, fully replaced on each successful
/// fetch. Temperatures are whole Celsius.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_c: i32,
    pub min_c: i32,
    pub max_c: i32,
    pub feels_like_c: i32,
    pub humidity_pct: u8,
    /// Meters per second; the provider may omit it.
    pub wind_speed: Option<f64>,
    /// Provider free text, localized at render time when a translation exists.
    pub description: String,
    /// Opaque provider icon key, mapped to a glyph at render time.
    pub icon: String,
}

/// Everything the UI needs to render.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Active display language.
    pub language: Lang,
    /// Currently selected catalog id; empty until resolution finishes.
    pub selected_city: Option<&'static str>,
    /// True while the startup geolocation lookup is outstanding.
    pub auto_locating: bool,
    /// Last successfully fetched weather (survives later failures).
    pub snapshot: Option<WeatherSnapshot>,
    /// Localization key of the last fetch error, cleared on each new fetch.
    pub error: Option<&'static str>,
    /// True while a fetch is in flight.
    pub is_loading: bool,
    pub picker_open: bool,
    pub picker_index: usize,
    /// Animation frame counter for the loading spinner.
    pub tick_count: u32,
}

impl AppState {
    pub fn new(language: Lang) -> Self {
        Self {
            language,
            selected_city: None,
            auto_locating: false,
            snapshot: None,
            error: None,
            is_loading: false,
            picker_open: false,
            picker_index: 0,
            tick_count: 0,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Lang::default())
    }
}
