//! Fixed catalog of supported cities.
//!
//! The catalog is read-only reference data known at compile time. Its
//! declaration order matters: it is the tie-break order for nearest-city
//! resolution and the display order of the city picker.

/// A supported city with its coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct City {
    /// Unique catalog key, also the localization key for the display name.
    pub id: &'static str,
    pub lat: f64,
    pub lon: f64,
}

/// City used when neither a saved choice nor a position is available.
pub const FALLBACK_CITY_ID: &str = "rabat";

/// All supported cities, in picker/tie-break order.
pub static CITIES: [City; 12] = [
    City { id: "rabat", lat: 34.01325, lon: -6.83255 },
    City { id: "beni mellal", lat: 32.3373, lon: -6.3498 },
    City { id: "sidi slimane", lat: 34.2648, lon: -5.925 },
    City { id: "casablanca", lat: 33.5731, lon: -7.5898 },
    City { id: "fes", lat: 34.0331, lon: -5.0003 },
    City { id: "kenitra", lat: 34.261, lon: -6.5802 },
    City { id: "agadir", lat: 30.4202, lon: -9.5982 },
    City { id: "dakhla", lat: 23.6848, lon: -15.9579 },
    City { id: "tangier", lat: 35.7595, lon: -5.834 },
    City { id: "tetouan", lat: 35.5785, lon: -5.3684 },
    City { id: "tata", lat: 29.7429, lon: -7.9726 },
    City { id: "ouarzazate", lat: 30.9189, lon: -6.8934 },
];

/// Look up a city by its exact id.
pub fn find(id: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.id == id)
}

/// Position of a city id in the catalog, for picker highlighting.
pub fn position(id: &str) -> Option<usize> {
    CITIES.iter().position(|city| city.id == id)
}
