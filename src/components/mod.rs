//! Pure UI components.
//!
//! Components receive read-only props, return actions from key handling,
//! and render from props alone. Data mutations only ever happen through
//! dispatched actions.

mod component;

pub mod city_picker;
pub mod help_bar;
pub mod weather_card;

pub use component::Component;

pub use city_picker::{centered_rect, CityPicker, CityPickerProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use weather_card::{WeatherCard, WeatherCardProps, SPINNERS};
