use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeeError {
    #[error("donation amount {amount} outside allowed range [{min}, {max}]")]
    OutOfRange { amount: u64, min: u64, max: u64 },

    #[error("invalid rate configuration: {0}")]
    InvalidConfiguration(String),
}
