//! State and city directory used by listing location validation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::catalog::find_ignore_case;
use crate::error::TaxonomyError;

const SUPPORTED_VERSION: u32 = 1;
const LOCATIONS_JSON: &str = include_str!("../data/locations.json");

static LOCATIONS: OnceLock<LocationDirectory> = OnceLock::new();

/// A state and the cities listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCities {
    /// State name.
    pub name: String,
    /// Cities in table order.
    #[serde(default)]
    pub cities: Vec<String>,
}

/// A validated state/city directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationDirectory {
    version: u32,
    states: Vec<StateCities>,
}

#[derive(Debug, Deserialize)]
struct RawDirectory {
    version: u32,
    states: Vec<StateCities>,
}

impl LocationDirectory {
    /// Parse a directory from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] when the JSON is malformed, the version is
    /// unsupported, or a state appears twice.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let raw: RawDirectory = serde_json::from_str(json).map_err(|e| TaxonomyError::Parse {
            message: e.to_string(),
        })?;
        if raw.version != SUPPORTED_VERSION {
            return Err(TaxonomyError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let mut seen = HashSet::new();
        for state in &raw.states {
            if !seen.insert(state.name.trim().to_ascii_lowercase()) {
                return Err(TaxonomyError::DuplicateState {
                    name: state.name.clone(),
                });
            }
        }

        Ok(Self {
            version: raw.version,
            states: raw.states,
        })
    }

    /// Load a directory from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, TaxonomyError> {
        let contents = fs::read_to_string(path).map_err(|e| TaxonomyError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&contents)
    }

    /// Return the directory bundled with the crate.
    ///
    /// # Panics
    ///
    /// Panics if the bundled JSON fails validation.
    #[must_use]
    pub fn builtin() -> &'static Self {
        LOCATIONS.get_or_init(|| {
            Self::from_json(LOCATIONS_JSON)
                .unwrap_or_else(|error| panic!("bundled location directory is invalid: {error}"))
        })
    }

    /// All states with their cities.
    #[must_use]
    pub fn states(&self) -> &[StateCities] {
        &self.states
    }

    /// State names in table order.
    #[must_use]
    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(|state| state.name.as_str()).collect()
    }

    /// Cities listed under `state`; empty when the state is unknown.
    #[must_use]
    pub fn cities_in(&self, state: &str) -> &[String] {
        self.find_state(state)
            .map(|found| found.cities.as_slice())
            .unwrap_or_default()
    }

    /// Look up a state by name, ignoring ASCII case and surrounding space.
    #[must_use]
    pub fn find_state(&self, state: &str) -> Option<&StateCities> {
        let wanted = state.trim();
        self.states
            .iter()
            .find(|candidate| candidate.name.eq_ignore_ascii_case(wanted))
    }

    /// Canonical spelling of `city` within `state`, if listed.
    #[must_use]
    pub fn find_city(&self, state: &str, city: &str) -> Option<&str> {
        find_ignore_case(self.cities_in(state), city)
    }

    /// Whether `city` is listed under `state`.
    #[must_use]
    pub fn contains(&self, state: &str, city: &str) -> bool {
        self.find_city(state, city).is_some()
    }
}
