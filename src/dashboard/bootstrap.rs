//! City directory loading for the startup sequence

use serde::Serialize;

use crate::client::Backend;

/// Number of city slots on the dashboard
pub const CITY_SLOTS: usize = 5;

/// Cities used when the backend does not provide a full directory
pub const DEFAULT_CITIES: [&str; CITY_SLOTS] =
    ["New Delhi", "Mumbai", "Kolkata", "Chennai", "Bengaluru"];

/// Cities bound to the dashboard's city buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityDirectory {
    cities: Vec<String>,
    from_backend: bool,
}

impl CityDirectory {
    /// Build the directory from a backend listing.
    ///
    /// A listing with fewer than [`CITY_SLOTS`] names is replaced by the
    /// fallback as a whole. Otherwise the first five names are used, with
    /// blank entries filled from the same fallback slot.
    pub fn resolve(listed: Vec<String>, fallback: &[String]) -> Self {
        if listed.len() < CITY_SLOTS {
            return Self::fallback(fallback);
        }

        let fallback = fallback_slots(fallback);

        let cities = listed
            .into_iter()
            .take(CITY_SLOTS)
            .enumerate()
            .map(|(idx, name)| {
                let name = name.trim();
                if name.is_empty() {
                    fallback[idx].clone()
                } else {
                    name.to_string()
                }
            })
            .collect();

        Self {
            cities,
            from_backend: true,
        }
    }

    /// Directory made only of fallback cities
    pub fn fallback(fallback: &[String]) -> Self {
        Self {
            cities: fallback_slots(fallback),
            from_backend: false,
        }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// City loaded automatically after bootstrap
    pub fn first(&self) -> Option<&str> {
        self.cities.first().map(String::as_str)
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.cities.get(slot).map(String::as_str)
    }

    pub fn is_from_backend(&self) -> bool {
        self.from_backend
    }
}

/// Fetch the directory, falling back to the defaults when `/cities` fails
pub async fn load_directory(backend: &dyn Backend, fallback: &[String]) -> CityDirectory {
    match backend.cities().await {
        Ok(listed) => {
            let count = listed.len();
            let directory = CityDirectory::resolve(listed, fallback);
            tracing::info!(
                listed = count,
                from_backend = directory.is_from_backend(),
                "City directory loaded"
            );
            directory
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load cities, using defaults");
            CityDirectory::fallback(fallback)
        }
    }
}

/// Exactly [`CITY_SLOTS`] non-blank names: missing or blank entries take the
/// matching [`DEFAULT_CITIES`] slot, extra entries are dropped
pub fn fallback_slots(fallback: &[String]) -> Vec<String> {
    DEFAULT_CITIES
        .iter()
        .enumerate()
        .map(|(idx, default)| match fallback.get(idx).map(|c| c.trim()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default.to_string(),
        })
        .collect()
}

/// Default fallback list as owned strings
pub fn default_cities() -> Vec<String> {
    DEFAULT_CITIES.iter().map(|c| c.to_string()).collect()
}
