//! Reducer — pure transitions over [`AppState`].
//!
//! `fn(state, action) -> Dispatch`: mutates state, reports whether a
//! re-render is needed, and declares any side effects. No I/O happens here.

use crate::action::Action;
use crate::catalog::{self, CITIES};
use crate::effect::Effect;
use crate::resolver;
use crate::state::AppState;
use crate::store::Dispatch;

/// Localization key shown for any fetch failure.
pub const ERROR_FETCHING_KEY: &str = "error-fetching";

pub fn reducer(state: &mut AppState, action: Action) -> Dispatch {
    match action {
        // ===== Location =====
        Action::LocateStart => {
            state.auto_locating = true;
            Dispatch::changed_with(Effect::Locate)
        }

        Action::LocateDidFinish(position) => {
            // A manual selection made while locating wins; drop the late
            // result instead of letting it clobber the user's pick.
            if !state.auto_locating {
                return Dispatch::unchanged();
            }
            state.auto_locating = false;

            let city_id = resolver::resolve(None, position, &CITIES);
            let mut result = start_fetch(state, city_id);
            if position.is_some() {
                // Only geolocation-based resolutions are remembered.
                result = result.with(Effect::PersistCity { city_id });
            }
            result
        }

        // ===== City selection =====
        Action::CitySelect(city_id) => {
            let was_locating = std::mem::take(&mut state.auto_locating);
            let picker_was_open = std::mem::take(&mut state.picker_open);

            // Re-selecting the current city is not a new epoch.
            if state.selected_city == Some(city_id) {
                return if picker_was_open || was_locating {
                    Dispatch::changed()
                } else {
                    Dispatch::unchanged()
                };
            }

            let mut result = start_fetch(state, city_id);
            if was_locating {
                result = result.with(Effect::CancelLocate);
            }
            result
        }

        Action::CityPickerOpen => {
            state.picker_open = true;
            state.picker_index = state
                .selected_city
                .and_then(catalog::position)
                .unwrap_or(0);
            Dispatch::changed()
        }

        Action::CityPickerClose => {
            state.picker_open = false;
            Dispatch::changed()
        }

        Action::CityPickerMove(index) => {
            let clamped = index.min(CITIES.len() - 1);
            if state.picker_index == clamped {
                return Dispatch::unchanged();
            }
            state.picker_index = clamped;
            Dispatch::changed()
        }

        Action::CityPickerConfirm => {
            let city_id = CITIES[state.picker_index.min(CITIES.len() - 1)].id;
            reducer(state, Action::CitySelect(city_id))
        }

        // ===== Weather =====
        Action::WeatherFetch => match state.selected_city {
            Some(city_id) => {
                state.error = None;
                state.is_loading = true;
                Dispatch::changed_with(Effect::FetchWeather { city_id })
            }
            None => Dispatch::unchanged(),
        },

        Action::WeatherDidLoad(snapshot) => {
            state.snapshot = Some(snapshot);
            state.is_loading = false;
            state.error = None;
            Dispatch::changed()
        }

        Action::WeatherDidError(_) => {
            // The previous snapshot stays on screen; only the error line is
            // added. The transport detail was already logged at the source.
            state.is_loading = false;
            state.error = Some(ERROR_FETCHING_KEY);
            Dispatch::changed()
        }

        // ===== UI =====
        Action::LanguageToggle => {
            state.language = state.language.toggle();
            Dispatch::changed()
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Only the spinner animates; skip re-renders otherwise.
            if state.is_loading || state.auto_locating {
                Dispatch::changed()
            } else {
                Dispatch::unchanged()
            }
        }

        Action::Quit => Dispatch::unchanged(), // handled by the main loop
    }
}

/// Begin a fetch epoch for `city_id`: select it, clear the previous error,
/// and declare the fetch effect.
fn start_fetch(state: &mut AppState, city_id: &'static str) -> Dispatch {
    state.selected_city = Some(city_id);
    state.error = None;
    state.is_loading = true;
    Dispatch::changed_with(Effect::FetchWeather { city_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Coordinates;
    use crate::state::WeatherSnapshot;

    fn snapshot(temperature_c: i32) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c,
            min_c: temperature_c - 3,
            max_c: temperature_c + 3,
            feels_like_c: temperature_c,
            humidity_pct: 40,
            wind_speed: Some(3.5),
            description: "clear sky".into(),
            icon: "01d".into(),
        }
    }

    #[test]
    fn test_city_select_starts_fetch_and_clears_error() {
        let mut state = AppState::default();
        state.error = Some(ERROR_FETCHING_KEY);

        let result = reducer(&mut state, Action::CitySelect("rabat"));

        assert!(result.changed);
        assert_eq!(result.effects, vec![Effect::FetchWeather { city_id: "rabat" }]);
        assert_eq!(state.selected_city, Some("rabat"));
        assert!(state.is_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_reselecting_same_city_does_not_refetch() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CitySelect("fes"));

        let result = reducer(&mut state, Action::CitySelect("fes"));

        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_selecting_new_city_supersedes_previous_epoch() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CitySelect("fes"));
        assert!(state.is_loading);

        // City changed mid-flight: a fresh fetch effect is declared. The
        // task pool aborts the old request when the new one spawns.
        let result = reducer(&mut state, Action::CitySelect("agadir"));

        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather { city_id: "agadir" }]
        );
        assert_eq!(state.selected_city, Some("agadir"));
        assert!(state.is_loading);
    }

    #[test]
    fn test_did_load_replaces_snapshot_wholesale() {
        let mut state = AppState::default();
        state.snapshot = Some(snapshot(10));
        state.is_loading = true;

        let result = reducer(&mut state, Action::WeatherDidLoad(snapshot(25)));

        assert!(result.changed);
        assert!(!state.is_loading);
        assert_eq!(state.snapshot, Some(snapshot(25)));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_did_error_keeps_previous_snapshot() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CitySelect("rabat"));
        reducer(&mut state, Action::WeatherDidLoad(snapshot(25)));

        reducer(&mut state, Action::CitySelect("dakhla"));
        let result = reducer(&mut state, Action::WeatherDidError("boom".into()));

        assert!(result.changed);
        assert_eq!(state.snapshot, Some(snapshot(25)));
        assert_eq!(state.error, Some(ERROR_FETCHING_KEY));
        assert!(!state.is_loading);
    }

    #[test]
    fn test_fetch_clears_error_on_retry() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CitySelect("rabat"));
        reducer(&mut state, Action::WeatherDidError("boom".into()));
        assert!(state.error.is_some());

        let result = reducer(&mut state, Action::WeatherFetch);

        assert!(state.error.is_none());
        assert!(state.is_loading);
        assert_eq!(result.effects, vec![Effect::FetchWeather { city_id: "rabat" }]);
    }

    #[test]
    fn test_fetch_without_selection_is_a_noop() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::WeatherFetch);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_locate_start_declares_lookup() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::LocateStart);
        assert!(state.auto_locating);
        assert_eq!(result.effects, vec![Effect::Locate]);
    }

    #[test]
    fn test_locate_finish_selects_nearest_and_persists() {
        let mut state = AppState::default();
        reducer(&mut state, Action::LocateStart);

        let near_tangier = Coordinates { lat: 35.75, lon: -5.84 };
        let result = reducer(&mut state, Action::LocateDidFinish(Some(near_tangier)));

        assert!(!state.auto_locating);
        assert_eq!(state.selected_city, Some("tangier"));
        assert!(result
            .effects
            .contains(&Effect::FetchWeather { city_id: "tangier" }));
        assert!(result
            .effects
            .contains(&Effect::PersistCity { city_id: "tangier" }));
    }

    #[test]
    fn test_locate_failure_falls_back_without_persisting() {
        let mut state = AppState::default();
        reducer(&mut state, Action::LocateStart);

        let result = reducer(&mut state, Action::LocateDidFinish(None));

        assert_eq!(state.selected_city, Some("rabat"));
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather { city_id: "rabat" }]
        );
    }

    #[test]
    fn test_manual_selection_wins_over_late_locate_result() {
        let mut state = AppState::default();
        reducer(&mut state, Action::LocateStart);

        let result = reducer(&mut state, Action::CitySelect("dakhla"));
        assert!(result.effects.contains(&Effect::CancelLocate));

        let late = Coordinates { lat: 35.75, lon: -5.84 };
        let result = reducer(&mut state, Action::LocateDidFinish(Some(late)));

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.selected_city, Some("dakhla"));
    }

    #[test]
    fn test_picker_opens_on_current_city() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CitySelect("fes"));

        reducer(&mut state, Action::CityPickerOpen);

        assert!(state.picker_open);
        assert_eq!(state.picker_index, catalog::position("fes").unwrap());
    }

    #[test]
    fn test_picker_confirm_selects_highlighted_city() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CityPickerOpen);
        reducer(&mut state, Action::CityPickerMove(3));

        let result = reducer(&mut state, Action::CityPickerConfirm);

        assert!(!state.picker_open);
        assert_eq!(state.selected_city, Some(CITIES[3].id));
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather { city_id: CITIES[3].id }]
        );
    }

    #[test]
    fn test_picker_move_clamps_to_catalog() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CityPickerMove(999));
        assert_eq!(state.picker_index, CITIES.len() - 1);
    }

    #[test]
    fn test_language_toggle() {
        use crate::i18n::Lang;

        let mut state = AppState::default();
        assert_eq!(state.language, Lang::Ar);

        reducer(&mut state, Action::LanguageToggle);
        assert_eq!(state.language, Lang::En);

        reducer(&mut state, Action::LanguageToggle);
        assert_eq!(state.language, Lang::Ar);
    }

    #[test]
    fn test_tick_only_rerenders_while_busy() {
        let mut state = AppState::default();

        assert!(!reducer(&mut state, Action::Tick).changed);

        state.is_loading = true;
        assert!(reducer(&mut state, Action::Tick).changed);

        state.is_loading = false;
        state.auto_locating = true;
        assert!(reducer(&mut state, Action::Tick).changed);
    }
}
