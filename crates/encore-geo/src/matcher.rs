//! Proximity matching of shows against a user location.
//!
//! A match pass is a pure function of its inputs: it validates, filters by
//! show status and start-time window, scores the remainder, and returns a
//! deterministically ordered ranking.

use chrono::{DateTime, Utc};

use encore_core::shows::ShowStatus;

use crate::distance::haversine_meters;
use crate::error::MatchError;
use crate::types::{
    ConfidenceThresholds, GeolocationStatus, MatchResult, RadiusOption, ShowCandidate,
    UserLocation,
};

/// Confidence drop across the selected radius: a venue right at the radius
/// edge scores `100 - WITHIN_RADIUS_DROP` before the accuracy penalty.
const WITHIN_RADIUS_DROP: f64 = 8.0;

/// Score decay per radius-multiple beyond the selected radius.
const BEYOND_RADIUS_SLOPE: f64 = 60.0;

/// Maximum score deduction for sensor uncertainty, reached when the reported
/// accuracy radius is as large as the selected search radius.
const ACCURACY_PENALTY_MAX: f64 = 20.0;

/// Assumed walking speed (~4.8 km/h), used up to the walking-distance radius.
const WALKING_METERS_PER_MINUTE: f64 = 80.0;

/// Assumed urban driving speed (~30 km/h), used beyond the walking-distance
/// radius.
const DRIVING_METERS_PER_MINUTE: f64 = 500.0;

/// Tunables for one match pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    pub radius: RadiusOption,
    /// Shows starting within `now ± time_window` are temporally relevant.
    pub time_window: chrono::Duration,
    pub thresholds: ConfidenceThresholds,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            radius: RadiusOption::VeryClose,
            time_window: chrono::Duration::hours(4),
            thresholds: ConfidenceThresholds::default(),
        }
    }
}

/// Rank `candidates` by proximity to `location`.
///
/// 1. Validate the location and every candidate coordinate.
/// 2. Drop finished/cancelled shows and shows starting outside
///    `now ± time_window`.
/// 3. Score the rest; scores below the `low` threshold are non-matches.
/// 4. Order by confidence descending, then distance ascending, then start
///    time ascending; total and deterministic for equal inputs.
///
/// An empty result is a valid outcome, not an error.
///
/// # Errors
///
/// Returns [`MatchError::InvalidLocation`] if the location coordinate is out
/// of WGS-84 bounds or its accuracy is negative or non-finite, and
/// [`MatchError::InvalidCandidate`] if any candidate venue coordinate is
/// malformed, including candidates the filters would have dropped.
pub fn match_shows(
    location: &UserLocation,
    candidates: &[ShowCandidate],
    config: &MatchConfig,
    now: DateTime<Utc>,
) -> Result<Vec<MatchResult>, MatchError> {
    if !location.coordinate().in_bounds() {
        return Err(MatchError::InvalidLocation {
            reason: format!("coordinate ({}, {}) out of bounds", location.lat, location.lng),
        });
    }
    if !location.accuracy_meters.is_finite() || location.accuracy_meters < 0.0 {
        return Err(MatchError::InvalidLocation {
            reason: format!("accuracy {} must be >= 0", location.accuracy_meters),
        });
    }
    for candidate in candidates {
        if !candidate.venue_coordinate.in_bounds() {
            return Err(MatchError::InvalidCandidate {
                show_id: candidate.id,
                reason: format!(
                    "venue coordinate ({}, {}) out of bounds",
                    candidate.venue_coordinate.lat, candidate.venue_coordinate.lng
                ),
            });
        }
    }

    let radius_meters = f64::from(config.radius.meters());
    let window_start = now - config.time_window;
    let window_end = now + config.time_window;

    let mut results: Vec<MatchResult> = candidates
        .iter()
        .filter(|candidate| {
            matches!(candidate.status, ShowStatus::Scheduled | ShowStatus::Live)
        })
        .filter(|candidate| {
            candidate.starts_at >= window_start && candidate.starts_at <= window_end
        })
        .filter_map(|candidate| {
            let distance_meters =
                haversine_meters(location.coordinate(), candidate.venue_coordinate);
            let confidence_score =
                confidence_score(distance_meters, location.accuracy_meters, radius_meters);
            if confidence_score < config.thresholds.low {
                return None;
            }
            Some(MatchResult {
                show_id: candidate.id,
                distance_meters,
                confidence_score,
                confidence_band: config.thresholds.band(confidence_score),
                travel_time_minutes: travel_time_minutes(distance_meters),
                is_within_venue: distance_meters <= radius_meters,
                starts_at: candidate.starts_at,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.confidence_score
            .total_cmp(&a.confidence_score)
            .then_with(|| a.distance_meters.total_cmp(&b.distance_meters))
            .then_with(|| a.starts_at.cmp(&b.starts_at))
    });

    tracing::debug!(
        candidates = candidates.len(),
        matches = results.len(),
        radius = %config.radius,
        "proximity match pass"
    );

    Ok(results)
}

/// Map match cardinality to the status the presentation layer renders.
#[must_use]
pub fn status_for_matches(matches: &[MatchResult]) -> GeolocationStatus {
    match matches.len() {
        0 => GeolocationStatus::None,
        1 => GeolocationStatus::Found,
        _ => GeolocationStatus::Multiple,
    }
}

/// Combine distance margin and sensor accuracy into a 0–100 score.
///
/// Within the radius the score falls linearly from 100 to
/// `100 - WITHIN_RADIUS_DROP`; beyond it, it decays by `BEYOND_RADIUS_SLOPE`
/// per additional radius-multiple. The sensor's accuracy radius, weighted
/// against the selected radius, deducts up to `ACCURACY_PENALTY_MAX` points.
/// Strictly decreasing in distance, non-increasing in accuracy.
fn confidence_score(distance_meters: f64, accuracy_meters: f64, radius_meters: f64) -> f64 {
    let ratio = distance_meters / radius_meters;
    let base = if ratio <= 1.0 {
        100.0 - WITHIN_RADIUS_DROP * ratio
    } else {
        (100.0 - WITHIN_RADIUS_DROP) - BEYOND_RADIUS_SLOPE * (ratio - 1.0)
    };
    let penalty = ACCURACY_PENALTY_MAX * (accuracy_meters / radius_meters).min(1.0);
    (base - penalty).clamp(0.0, 100.0)
}

/// Estimate travel time from distance alone: walking pace up to the
/// walking-distance radius, urban driving pace beyond it, rounded up to
/// whole minutes.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn travel_time_minutes(distance_meters: f64) -> u32 {
    let speed = if distance_meters <= f64::from(RadiusOption::WalkingDistance.meters()) {
        WALKING_METERS_PER_MINUTE
    } else {
        DRIVING_METERS_PER_MINUTE
    };
    (distance_meters / speed).ceil() as u32
}
