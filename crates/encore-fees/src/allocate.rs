//! Deterministic donation splitting.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::FeeError;
use crate::rates::RateTable;

/// One donation decomposed into shares. Field sum equals the donation
/// amount exactly, always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub platform_fee: u64,
    pub processing_fee: u64,
    pub referral_direct: u64,
    pub referral_tier2: u64,
    pub artist_payout: u64,
}

impl FeeBreakdown {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.platform_fee
            + self.processing_fee
            + self.referral_direct
            + self.referral_tier2
            + self.artist_payout
    }
}

/// Split `amount` minor units according to `rates`.
///
/// Each percentage share is rounded to the nearest minor unit independently,
/// half away from zero, then charged against the remaining amount in order
/// platform -> processing (rate + flat add-on) -> direct referral -> tier-2
/// referral, each capped at what remains. The artist payout is the residual,
/// which is what makes the sum invariant hold exactly for every in-range
/// amount, including amounts smaller than the flat processing fee.
///
/// # Errors
///
/// Returns [`FeeError::OutOfRange`] if `amount` falls outside the table's
/// `[min_amount, max_amount]` bounds.
pub fn allocate(amount: u64, rates: &RateTable) -> Result<FeeBreakdown, FeeError> {
    if amount < rates.min_amount || amount > rates.max_amount {
        return Err(FeeError::OutOfRange {
            amount,
            min: rates.min_amount,
            max: rates.max_amount,
        });
    }

    let mut remaining = amount;
    let mut charge = |share: u64| -> u64 {
        let taken = share.min(remaining);
        remaining -= taken;
        taken
    };

    let platform_fee = charge(rounded_share(amount, rates.platform_fee_rate));
    let processing_fee = charge(
        rounded_share(amount, rates.processing_fee_rate) + rates.processing_fee_cents,
    );
    let referral_direct = charge(rounded_share(amount, rates.direct_referral_rate));
    let referral_tier2 = charge(rounded_share(amount, rates.tier2_referral_rate));
    let artist_payout = remaining;

    Ok(FeeBreakdown {
        platform_fee,
        processing_fee,
        referral_direct,
        referral_tier2,
        artist_payout,
    })
}

/// `rate * amount` in minor units, rounded half away from zero.
fn rounded_share(amount: u64, rate: Decimal) -> u64 {
    (rate * Decimal::from(amount))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}
