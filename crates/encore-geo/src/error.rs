use thiserror::Error;
use uuid::Uuid;

/// Structured failure from a position read.
#[derive(Debug, Clone, Error)]
pub enum PositionError {
    #[error("geolocation is not supported in this runtime")]
    Unsupported,

    #[error("permission to read the device position was denied")]
    PermissionDenied,

    #[error("device position is unavailable: {0}")]
    Unavailable(String),

    #[error("position request timed out")]
    Timeout,
}

/// Invalid input handed to the proximity matcher.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid location: {reason}")]
    InvalidLocation { reason: String },

    #[error("invalid candidate {show_id}: {reason}")]
    InvalidCandidate { show_id: Uuid, reason: String },
}
