//! The positioning capability the acquisition session drives.
//!
//! The real sensor is a polymorphic dependency: anything that can produce a
//! one-shot [`UserLocation`] reading implements [`LocationSource`]. The
//! fixture variants here make sessions fully deterministic in tests and let
//! the CLI run without a positioning device.

use std::future::Future;
use std::time::Duration;

use crate::error::PositionError;
use crate::types::UserLocation;

/// Per-call acquisition options. Every field is overridable; defaults match
/// the configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireOptions {
    /// Ask the sensor for its best fix rather than a fast coarse one.
    pub enable_high_accuracy: bool,
    /// How long the session waits before giving up with a `timeout` status.
    pub timeout: Duration,
    /// A held reading no older than this satisfies a refetch without a
    /// sensor call.
    pub maximum_age: Duration,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_millis(12_000),
            maximum_age: Duration::from_millis(300_000),
        }
    }
}

/// A one-shot position capability.
pub trait LocationSource {
    /// Whether the positioning capability exists in this runtime. Sessions
    /// report `error` without calling [`read_position`](Self::read_position)
    /// when this is `false`.
    fn supported(&self) -> bool {
        true
    }

    /// Read a single position fix, honoring `options`.
    fn read_position(
        &self,
        options: &AcquireOptions,
    ) -> impl Future<Output = Result<UserLocation, PositionError>> + Send;
}

/// Fixture source that always returns the same reading.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource {
    reading: UserLocation,
}

impl FixedSource {
    #[must_use]
    pub fn new(reading: UserLocation) -> Self {
        Self { reading }
    }
}

impl LocationSource for FixedSource {
    fn read_position(
        &self,
        _options: &AcquireOptions,
    ) -> impl Future<Output = Result<UserLocation, PositionError>> + Send {
        let reading = self.reading;
        async move { Ok(reading) }
    }
}

/// Fixture source that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingSource {
    error: PositionError,
}

impl FailingSource {
    #[must_use]
    pub fn new(error: PositionError) -> Self {
        Self { error }
    }
}

impl LocationSource for FailingSource {
    fn read_position(
        &self,
        _options: &AcquireOptions,
    ) -> impl Future<Output = Result<UserLocation, PositionError>> + Send {
        let error = self.error.clone();
        async move { Err(error) }
    }
}

/// Fixture source that never resolves; pairs with the session timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingSource;

impl LocationSource for PendingSource {
    fn read_position(
        &self,
        _options: &AcquireOptions,
    ) -> impl Future<Output = Result<UserLocation, PositionError>> + Send {
        std::future::pending()
    }
}

/// Fixture for runtimes with no positioning capability at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedSource;

impl LocationSource for UnsupportedSource {
    fn supported(&self) -> bool {
        false
    }

    fn read_position(
        &self,
        _options: &AcquireOptions,
    ) -> impl Future<Output = Result<UserLocation, PositionError>> + Send {
        async move { Err(PositionError::Unsupported) }
    }
}
