//! Acquisition state machine over a [`LocationSource`].
//!
//! A session owns the single mutable `(status, location, error)` triple.
//! `refetch` restarts acquisition; a superseding call bumps the generation
//! counter so the outcome of any in-flight attempt is dropped instead of
//! mutating state late. Failures become terminal statuses with a message,
//! never errors thrown past the session boundary.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use crate::error::PositionError;
use crate::source::{AcquireOptions, LocationSource};
use crate::types::{GeolocationStatus, UserLocation};

/// Observable state of a session at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSnapshot {
    pub status: GeolocationStatus,
    pub location: Option<UserLocation>,
    /// Human-readable description of the failure for terminal error statuses.
    pub error: Option<String>,
}

#[derive(Debug)]
struct Inner {
    generation: u64,
    status: GeolocationStatus,
    location: Option<UserLocation>,
    error: Option<String>,
}

/// One acquisition session. Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct LocationSession {
    inner: Arc<Mutex<Inner>>,
}

impl Default for LocationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                generation: 0,
                status: GeolocationStatus::Detecting,
                location: None,
                error: None,
            })),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> LocationSnapshot {
        let inner = self.lock();
        LocationSnapshot {
            status: inner.status,
            location: inner.location,
            error: inner.error.clone(),
        }
    }

    #[must_use]
    pub fn status(&self) -> GeolocationStatus {
        self.lock().status
    }

    /// Restart acquisition, superseding any in-flight attempt.
    ///
    /// The session enters `detecting`, then reaches exactly one terminal
    /// status for this call: `found` on a reading (cached or fresh),
    /// `permission-denied`, `timeout`, or `error`. If another `refetch`
    /// supersedes this one, the returned snapshot reflects the newer attempt.
    pub async fn refetch<S: LocationSource>(
        &self,
        source: &S,
        options: &AcquireOptions,
    ) -> LocationSnapshot {
        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.status = GeolocationStatus::Detecting;
            inner.error = None;
            inner.generation
        };

        if !source.supported() {
            return self.apply(generation, Err(PositionError::Unsupported));
        }

        let cached = {
            let inner = self.lock();
            inner
                .location
                .filter(|held| fresh_within(held, options.maximum_age))
        };
        if let Some(reading) = cached {
            tracing::debug!(generation, "serving held reading within maximum age");
            return self.apply(generation, Ok(reading));
        }

        let outcome = match tokio::time::timeout(options.timeout, source.read_position(options))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(PositionError::Timeout),
        };

        self.apply(generation, outcome)
    }

    /// Commit an acquisition outcome, unless a newer generation superseded it.
    fn apply(
        &self,
        generation: u64,
        outcome: Result<UserLocation, PositionError>,
    ) -> LocationSnapshot {
        let mut inner = self.lock();

        if inner.generation != generation {
            tracing::debug!(
                generation,
                current = inner.generation,
                "dropping stale acquisition outcome"
            );
            return LocationSnapshot {
                status: inner.status,
                location: inner.location,
                error: inner.error.clone(),
            };
        }

        match outcome {
            Ok(reading) if reading.accuracy_meters.is_finite() && reading.accuracy_meters >= 0.0 => {
                tracing::info!(
                    generation,
                    lat = reading.lat,
                    lng = reading.lng,
                    accuracy_meters = reading.accuracy_meters,
                    "position found"
                );
                inner.status = GeolocationStatus::Found;
                inner.location = Some(reading);
                inner.error = None;
            }
            Ok(reading) => {
                let message = format!(
                    "sensor reported invalid accuracy {}",
                    reading.accuracy_meters
                );
                tracing::warn!(generation, %message, "rejecting position reading");
                inner.status = GeolocationStatus::Error;
                inner.location = None;
                inner.error = Some(message);
            }
            Err(error) => {
                let status = match error {
                    PositionError::PermissionDenied => GeolocationStatus::PermissionDenied,
                    PositionError::Timeout => GeolocationStatus::Timeout,
                    PositionError::Unsupported | PositionError::Unavailable(_) => {
                        GeolocationStatus::Error
                    }
                };
                tracing::info!(generation, %status, error = %error, "acquisition failed");
                inner.status = status;
                inner.location = None;
                inner.error = Some(error.to_string());
            }
        }

        LocationSnapshot {
            status: inner.status,
            location: inner.location,
            error: inner.error.clone(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A held reading satisfies a refetch while younger than `maximum_age`.
fn fresh_within(location: &UserLocation, maximum_age: std::time::Duration) -> bool {
    let Some(timestamp) = location.timestamp else {
        return false;
    };
    match chrono::Duration::from_std(maximum_age) {
        Ok(max_age) => {
            let age = Utc::now().signed_duration_since(timestamp);
            age >= chrono::Duration::zero() && age <= max_age
        }
        // An age bound too large for chrono means "any held reading is fine".
        Err(_) => true,
    }
}
