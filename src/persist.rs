//! Saved-city persistence.
//!
//! One small JSON file remembers the last geolocation-resolved city so the
//! next startup skips the lookup. Reads never fail: a missing or corrupt
//! file just means "nothing saved".

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct SavedCityFile {
    city: String,
}

/// Handle to the saved-city file.
#[derive(Clone, Debug)]
pub struct SavedCity {
    path: PathBuf,
}

impl SavedCity {
    /// Use an explicit file path (tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default platform location; `None` when the platform exposes no data
    /// directory (persistence is then skipped entirely).
    pub fn default_location() -> Option<Self> {
        dirs::data_local_dir().map(|dir| Self::at(dir.join("taqs").join("saved_city.json")))
    }

    /// Read the saved city id, if any.
    pub fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let parsed: SavedCityFile = serde_json::from_str(&raw).ok()?;
        Some(parsed.city)
    }

    /// Write the city id, creating parent directories as needed.
    pub fn store(&self, city: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&SavedCityFile {
            city: city.to_string(),
        })
        .map_err(io::Error::other)?;
        std::fs::write(&self.path, json)
    }
}
