//! CLI entry point.
//!
//! Loads the home-location config and the GTFS stop reference data, selects
//! the stops within walking distance, polls every configured trip-update
//! feed once, and prints the grouped departure report as JSON on stdout.
//! Logs go to stderr so the report stays machine-readable.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use departurled::config::Config;
use departurled::fetch::BasicClient;
use departurled::geo::{RADIUS_METERS, select_stops};
use departurled::pipeline;
use departurled::stops::load_stops;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "departurled")]
#[command(about = "Upcoming subway departures within walking distance of home", long_about = None)]
struct Cli {
    /// Path to the JSON config (home location, buffer, walking speed, feeds)
    #[arg(short, long, default_value = "departurled.json")]
    config: String,

    /// Path to the GTFS stops.txt reference dataset
    #[arg(short, long, default_value = "sources/stops.txt")]
    stops: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    tracing_subscriber::registry().with(stderr_layer).init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    let stops = load_stops(&cli.stops)?;
    info!(
        stops = stops.len(),
        feeds = config.feeds.len(),
        "Config and reference data loaded"
    );

    let selected = select_stops(
        &stops,
        config.location.latitude,
        config.location.longitude,
        RADIUS_METERS,
        config.walking_speed,
    )?;
    info!(selected = selected.len(), "Stops within walking radius");

    let client = BasicClient::new();
    let report = pipeline::run(
        &client,
        &config.feeds,
        &selected,
        config.buffer_minutes,
        Utc::now(),
    )
    .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
