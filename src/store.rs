//! Effect-aware state store.
//!
//! The store is the single dispatch point: every action goes through the
//! reducer here, and the caller receives the state-changed flag plus any
//! effects to execute.

use tracing::debug;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

/// Result of dispatching one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// Whether the state was modified (the UI should re-render).
    pub changed: bool,
    /// Effects to execute after dispatch.
    pub effects: Vec<Effect>,
}

impl Dispatch {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Append an effect.
    #[inline]
    pub fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Whether there are effects to execute.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer: mutate state for an action, report changes and effects.
pub type Reducer = fn(&mut AppState, Action) -> Dispatch;

/// Centralized state container.
pub struct Store {
    state: AppState,
    reducer: Reducer,
}

impl Store {
    pub fn new(state: AppState, reducer: Reducer) -> Self {
        Self { state, reducer }
    }

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Dispatch an action through the reducer.
    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        debug!(action = action.name(), "dispatch");
        (self.reducer)(&mut self.state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;
    use crate::reducer::reducer;

    #[test]
    fn test_dispatch_builders() {
        let r = Dispatch::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = Dispatch::changed();
        assert!(r.changed);
        assert!(r.effects.is_empty());

        let r = Dispatch::changed_with(Effect::Locate).with(Effect::CancelLocate);
        assert!(r.changed);
        assert_eq!(r.effects, vec![Effect::Locate, Effect::CancelLocate]);
        assert!(r.has_effects());
    }

    #[test]
    fn test_store_dispatch_runs_reducer() {
        let mut store = Store::new(AppState::default(), reducer);
        assert_eq!(store.state().language, Lang::Ar);

        let result = store.dispatch(Action::LanguageToggle);

        assert!(result.changed);
        assert_eq!(store.state().language, Lang::En);
    }

    #[test]
    fn test_store_dispatch_collects_effects() {
        let mut store = Store::new(AppState::default(), reducer);

        let result = store.dispatch(Action::CitySelect("rabat"));

        assert_eq!(result.effects, vec![Effect::FetchWeather { city_id: "rabat" }]);
    }
}
