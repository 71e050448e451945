//! `encore-cli nearby`: acquire a position and rank nearby shows.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use uuid::Uuid;

use encore_core::shows::{load_shows, ShowEntry};
use encore_core::AppConfig;
use encore_geo::{
    match_shows, status_for_matches, AcquireOptions, ConfidenceThresholds, FixedSource,
    LocationSession, MatchConfig, RadiusOption, ShowCandidate, UserLocation,
};

#[derive(Debug, Args)]
pub struct NearbyArgs {
    /// Latitude reported by the positioning fixture.
    #[arg(long)]
    pub lat: f64,
    /// Longitude reported by the positioning fixture.
    #[arg(long)]
    pub lng: f64,
    /// Sensor accuracy radius in meters.
    #[arg(long, default_value_t = 25.0)]
    pub accuracy: f64,
    /// Search radius in meters; overrides the configured one.
    #[arg(long)]
    pub radius: Option<u32>,
    /// Match relative to this instant instead of the current time (RFC 3339).
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

pub async fn run(config: &AppConfig, args: &NearbyArgs) -> anyhow::Result<()> {
    let shows = load_shows(&config.shows_path)?;
    let candidates: Vec<ShowCandidate> = shows.shows.iter().map(ShowCandidate::from).collect();
    let titles: HashMap<Uuid, &ShowEntry> = shows.shows.iter().map(|s| (s.id, s)).collect();

    let radius_meters = args.radius.unwrap_or(config.radius_meters);
    let radius = RadiusOption::from_meters(radius_meters).with_context(|| {
        format!("unrecognized radius {radius_meters} m (options: 274, 1609, 4828, 8047)")
    })?;

    let session = LocationSession::new();
    let source = FixedSource::new(UserLocation {
        lat: args.lat,
        lng: args.lng,
        accuracy_meters: args.accuracy,
        timestamp: Some(Utc::now()),
    });
    let options = AcquireOptions {
        enable_high_accuracy: config.acquire_high_accuracy,
        timeout: Duration::from_millis(config.acquire_timeout_ms),
        maximum_age: Duration::from_millis(config.acquire_maximum_age_ms),
    };

    let snapshot = session.refetch(&source, &options).await;
    let Some(location) = snapshot.location else {
        println!("status: {}", snapshot.status);
        if let Some(error) = snapshot.error {
            println!("error: {error}");
        }
        return Ok(());
    };

    let match_config = MatchConfig {
        radius,
        time_window: chrono::Duration::hours(config.time_window_hours),
        thresholds: ConfidenceThresholds {
            high: config.confidence_high,
            medium: config.confidence_medium,
            low: config.confidence_low,
        },
    };
    let now = args.at.unwrap_or_else(Utc::now);
    let matches = match_shows(&location, &candidates, &match_config, now)?;

    println!(
        "status: {} ({} radius, {} candidates)",
        status_for_matches(&matches),
        radius,
        candidates.len()
    );
    for result in &matches {
        let title = titles
            .get(&result.show_id)
            .map_or("<unknown show>", |s| s.title.as_str());
        println!(
            "  {title:<24} {:>6.0} m  confidence {:>5.1} ({})  ~{} min  {}",
            result.distance_meters,
            result.confidence_score,
            result.confidence_band,
            result.travel_time_minutes,
            if result.is_within_venue {
                "at venue"
            } else {
                "nearby"
            }
        );
    }

    Ok(())
}
