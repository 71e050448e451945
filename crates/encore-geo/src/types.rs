//! Domain types for location acquisition and show matching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use encore_core::shows::{ShowEntry, ShowStatus};

/// A WGS-84 position in degrees. Immutable snapshot; replaced, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// `true` iff both components are finite and within WGS-84 bounds
    /// (`|lat| <= 90`, `|lng| <= 180`).
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }
}

/// One sensor reading. Superseded by the next reading, discarded on failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub lat: f64,
    pub lng: f64,
    /// Sensor-reported radius of uncertainty. Must be `>= 0`.
    pub accuracy_meters: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl UserLocation {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Acquisition/match status presented to callers. Exactly one value holds at
/// any time for a given session; `detecting` is the only initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeolocationStatus {
    Detecting,
    Found,
    Multiple,
    None,
    Error,
    PermissionDenied,
    Timeout,
}

impl GeolocationStatus {
    /// Terminal statuses end an acquisition attempt; only `refetch` leaves them.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != GeolocationStatus::Detecting
    }
}

impl std::fmt::Display for GeolocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeolocationStatus::Detecting => write!(f, "detecting"),
            GeolocationStatus::Found => write!(f, "found"),
            GeolocationStatus::Multiple => write!(f, "multiple"),
            GeolocationStatus::None => write!(f, "none"),
            GeolocationStatus::Error => write!(f, "error"),
            GeolocationStatus::PermissionDenied => write!(f, "permission-denied"),
            GeolocationStatus::Timeout => write!(f, "timeout"),
        }
    }
}

/// Caller-selectable proximity radius used for inclusion filtering and
/// confidence weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadiusOption {
    VeryClose,
    WalkingDistance,
    ShortDrive,
    NearbyArea,
}

impl RadiusOption {
    #[must_use]
    pub const fn meters(self) -> u32 {
        match self {
            RadiusOption::VeryClose => 274,
            RadiusOption::WalkingDistance => 1609,
            RadiusOption::ShortDrive => 4828,
            RadiusOption::NearbyArea => 8047,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RadiusOption::VeryClose => "very close",
            RadiusOption::WalkingDistance => "walking distance",
            RadiusOption::ShortDrive => "short drive",
            RadiusOption::NearbyArea => "nearby area",
        }
    }

    /// Map a configured radius in meters to its option, if recognized.
    #[must_use]
    pub fn from_meters(meters: u32) -> Option<Self> {
        match meters {
            274 => Some(RadiusOption::VeryClose),
            1609 => Some(RadiusOption::WalkingDistance),
            4828 => Some(RadiusOption::ShortDrive),
            8047 => Some(RadiusOption::NearbyArea),
            _ => None,
        }
    }
}

impl std::fmt::Display for RadiusOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Published confidence bands partitioning the 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceBand::High => write!(f, "high"),
            ConfidenceBand::Medium => write!(f, "medium"),
            ConfidenceBand::Low => write!(f, "low"),
        }
    }
}

/// Score thresholds for the confidence bands. Scores below `low` are treated
/// as non-matches and excluded from results entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl ConfidenceThresholds {
    #[must_use]
    pub fn band(&self, score: f64) -> ConfidenceBand {
        if score >= self.high {
            ConfidenceBand::High
        } else if score >= self.medium {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 90.0,
            medium: 70.0,
            low: 50.0,
        }
    }
}

/// A show under consideration by the matcher. Supplied externally; immutable
/// from the matcher's perspective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowCandidate {
    pub id: Uuid,
    pub venue_coordinate: Coordinate,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: ShowStatus,
}

impl From<&ShowEntry> for ShowCandidate {
    fn from(entry: &ShowEntry) -> Self {
        Self {
            id: entry.id,
            venue_coordinate: Coordinate {
                lat: entry.venue.lat,
                lng: entry.venue.lng,
            },
            starts_at: entry.starts_at,
            ends_at: entry.ends_at,
            status: entry.status,
        }
    }
}

/// One ranked match. Derived, recomputed on every pass, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult {
    pub show_id: Uuid,
    pub distance_meters: f64,
    /// Clamped to `[0, 100]`.
    pub confidence_score: f64,
    pub confidence_band: ConfidenceBand,
    pub travel_time_minutes: u32,
    pub is_within_venue: bool,
    pub starts_at: DateTime<Utc>,
}
