//! Location acquisition and proximity matching for Encore.
//!
//! Wraps an injected positioning capability in a typed acquisition state
//! machine, computes great-circle distances to show venues, and ranks shows
//! by a confidence score combining distance margin and sensor accuracy. All
//! matching is pure; the session owns the only mutable state.

pub mod distance;
pub mod error;
pub mod matcher;
pub mod session;
pub mod source;
pub mod types;

pub use distance::haversine_meters;
pub use error::{MatchError, PositionError};
pub use matcher::{match_shows, status_for_matches, MatchConfig};
pub use session::{LocationSession, LocationSnapshot};
pub use source::{
    AcquireOptions, FailingSource, FixedSource, LocationSource, PendingSource, UnsupportedSource,
};
pub use types::{
    Coordinate, ConfidenceBand, ConfidenceThresholds, GeolocationStatus, MatchResult, RadiusOption,
    ShowCandidate, UserLocation,
};
