//! Donation fee allocation for Encore.
//!
//! Splits a donation, in integer minor units, into platform, processing,
//! referral, and artist shares. The artist payout is always the residual, so
//! the shares sum to the donation amount exactly. No floating-point money
//! anywhere.

pub mod allocate;
pub mod error;
pub mod rates;

pub use allocate::{allocate, FeeBreakdown};
pub use error::FeeError;
pub use rates::RateTable;
