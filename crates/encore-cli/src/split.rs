//! `encore-cli split`: decompose a donation into shares.

use clap::Args;

use encore_core::AppConfig;
use encore_fees::{allocate, RateTable};

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Donation amount in minor currency units (cents).
    #[arg(long)]
    pub amount: u64,
}

pub fn run(config: &AppConfig, args: &SplitArgs) -> anyhow::Result<()> {
    let rates = RateTable {
        platform_fee_rate: config.platform_fee_rate,
        processing_fee_rate: config.processing_fee_rate,
        processing_fee_cents: config.processing_fee_cents,
        direct_referral_rate: config.direct_referral_rate,
        tier2_referral_rate: config.tier2_referral_rate,
        min_amount: config.min_donation_cents,
        max_amount: config.max_donation_cents,
    };
    rates.validate()?;

    let breakdown = allocate(args.amount, &rates)?;
    tracing::debug!(amount = args.amount, ?breakdown, "donation split");

    println!("donation:         {:>8}", args.amount);
    println!("platform fee:     {:>8}", breakdown.platform_fee);
    println!("processing fee:   {:>8}", breakdown.processing_fee);
    println!("direct referral:  {:>8}", breakdown.referral_direct);
    println!("tier-2 referral:  {:>8}", breakdown.referral_tier2);
    println!("artist payout:    {:>8}", breakdown.artist_payout);

    Ok(())
}
