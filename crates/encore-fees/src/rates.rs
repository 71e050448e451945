//! Rate table configuration for donation splits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FeeError;

/// The four percentage rates may sum to at most this, leaving headroom for
/// the flat processing add-on before the artist residual.
const MAX_TOTAL_RATE: Decimal = Decimal::from_parts(95, 0, 0, false, 2);

/// Rates and bounds for a donation split. Fractions of the donation amount
/// except for `processing_fee_cents`, a flat minor-unit add-on.
///
/// Validate once at configuration time with [`RateTable::validate`];
/// [`allocate`](crate::allocate::allocate) trusts its table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub platform_fee_rate: Decimal,
    pub processing_fee_rate: Decimal,
    pub processing_fee_cents: u64,
    pub direct_referral_rate: Decimal,
    pub tier2_referral_rate: Decimal,
    /// Smallest accepted donation, in minor units. At least 1.
    pub min_amount: u64,
    /// Largest accepted donation, in minor units.
    pub max_amount: u64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            platform_fee_rate: Decimal::new(15, 2),
            processing_fee_rate: Decimal::new(29, 3),
            processing_fee_cents: 30,
            direct_referral_rate: Decimal::new(25, 3),
            tier2_referral_rate: Decimal::new(25, 3),
            min_amount: 1,
            max_amount: 500_000,
        }
    }
}

impl RateTable {
    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FeeError::InvalidConfiguration`] if any rate is negative,
    /// the four rates sum above the safe ceiling, `min_amount` is zero, or
    /// the bounds are inverted.
    pub fn validate(&self) -> Result<(), FeeError> {
        let rates = [
            ("platform_fee_rate", self.platform_fee_rate),
            ("processing_fee_rate", self.processing_fee_rate),
            ("direct_referral_rate", self.direct_referral_rate),
            ("tier2_referral_rate", self.tier2_referral_rate),
        ];
        for (name, rate) in rates {
            if rate.is_sign_negative() && !rate.is_zero() {
                return Err(FeeError::InvalidConfiguration(format!(
                    "{name} must not be negative, got {rate}"
                )));
            }
        }

        let total: Decimal = rates.iter().map(|(_, rate)| *rate).sum();
        if total > MAX_TOTAL_RATE {
            return Err(FeeError::InvalidConfiguration(format!(
                "combined rates {total} exceed the {MAX_TOTAL_RATE} ceiling"
            )));
        }

        if self.min_amount == 0 {
            return Err(FeeError::InvalidConfiguration(
                "min_amount must be at least 1 minor unit".to_string(),
            ));
        }

        if self.min_amount > self.max_amount {
            return Err(FeeError::InvalidConfiguration(format!(
                "min_amount {} exceeds max_amount {}",
                self.min_amount, self.max_amount
            )));
        }

        Ok(())
    }
}
