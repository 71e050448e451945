use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ConfigError;

/// Lifecycle status of a show in the catalog.
///
/// Only `scheduled` and `live` shows are candidates for proximity matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowStatus {
    Scheduled,
    Live,
    Finished,
    Cancelled,
}

impl std::fmt::Display for ShowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShowStatus::Scheduled => write!(f, "scheduled"),
            ShowStatus::Live => write!(f, "live"),
            ShowStatus::Finished => write!(f, "finished"),
            ShowStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSpec {
    pub name: String,
    /// WGS-84 latitude in degrees.
    pub lat: f64,
    /// WGS-84 longitude in degrees.
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowEntry {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub venue: VenueSpec,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: ShowStatus,
}

#[derive(Debug, Deserialize)]
pub struct ShowsFile {
    pub shows: Vec<ShowEntry>,
}

/// Load and validate the show catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_shows(path: &Path) -> Result<ShowsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ShowsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let shows_file: ShowsFile = serde_yaml::from_str(&content)?;

    validate_shows(&shows_file)?;

    Ok(shows_file)
}

fn validate_shows(shows_file: &ShowsFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for show in &shows_file.shows {
        if show.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "show {} has an empty title",
                show.id
            )));
        }

        if show.artist.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "show '{}' has an empty artist",
                show.title
            )));
        }

        if show.venue.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "show '{}' has an empty venue name",
                show.title
            )));
        }

        let (lat, lng) = (show.venue.lat, show.venue.lng);
        if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
            return Err(ConfigError::Validation(format!(
                "show '{}' has venue coordinate ({lat}, {lng}) outside WGS-84 bounds",
                show.title
            )));
        }

        if let Some(ends_at) = show.ends_at {
            if ends_at <= show.starts_at {
                return Err(ConfigError::Validation(format!(
                    "show '{}' ends at {ends_at} which is not after its start {}",
                    show.title, show.starts_at
                )));
            }
        }

        if !seen_ids.insert(show.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate show id: {}",
                show.id
            )));
        }
    }

    Ok(())
}
