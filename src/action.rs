//! Application actions.
//!
//! Naming convention: intent actions trigger work, `*Did*` actions carry an
//! async result back into the reducer.

use crate::resolver::Coordinates;
use crate::state::WeatherSnapshot;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Location =====
    /// Intent: start the one-shot geolocation lookup.
    LocateStart,
    /// Result: lookup finished; `None` means position unavailable.
    LocateDidFinish(Option<Coordinates>),

    // ===== City selection =====
    /// Select a catalog city (picker confirm, CLI override, or resolver).
    CitySelect(&'static str),
    CityPickerOpen,
    CityPickerClose,
    /// Move the picker highlight to the given index.
    CityPickerMove(usize),
    /// Confirm the highlighted picker entry.
    CityPickerConfirm,

    // ===== Weather =====
    /// Intent: (re)fetch weather for the current selection.
    WeatherFetch,
    /// Result: fetch succeeded.
    WeatherDidLoad(WeatherSnapshot),
    /// Result: fetch failed; payload is the transport detail, for logs only.
    WeatherDidError(String),

    // ===== UI =====
    LanguageToggle,
    /// Periodic tick for the loading animation.
    Tick,
    Quit,
}

impl Action {
    /// Action name for dispatch logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::LocateStart => "LocateStart",
            Action::LocateDidFinish(_) => "LocateDidFinish",
            Action::CitySelect(_) => "CitySelect",
            Action::CityPickerOpen => "CityPickerOpen",
            Action::CityPickerClose => "CityPickerClose",
            Action::CityPickerMove(_) => "CityPickerMove",
            Action::CityPickerConfirm => "CityPickerConfirm",
            Action::WeatherFetch => "WeatherFetch",
            Action::WeatherDidLoad(_) => "WeatherDidLoad",
            Action::WeatherDidError(_) => "WeatherDidError",
            Action::LanguageToggle => "LanguageToggle",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }
}
