mod analyze;
mod lookup;
mod watch;


use std::sync::Arc;

use bizgap_core::{AppConfig, SearchRadius, ThresholdTable};
use bizgap_osm::{NominatimClient, OverpassClient};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bizgap-cli")]
#[command(about = "Find under-served business categories around a location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the Overpass QL query for a location without running it
    Query {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Search radius in metres
        #[arg(long, default_value_t = SearchRadius::DEFAULT_METRES)]
        radius: u32,
    },
    /// Look up places by name
    Geocode {
        query: String,
        /// Maximum number of candidates (defaults to BIZGAP_GEOCODE_LIMIT)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Count nearby businesses and rank opportunities
    Analyze {
        #[arg(
            long,
            allow_negative_numbers = true,
            requires = "lon",
            required_unless_present = "place",
            conflicts_with = "place"
        )]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
        /// Free-text place name; the best geocoding match is analyzed
        #[arg(long)]
        place: Option<String>,
        /// Search radius in metres, clamped to 100..=2000
        #[arg(long, default_value_t = SearchRadius::DEFAULT_METRES)]
        radius: u32,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read `lat,lon[,radius]` lines from stdin and analyze each, showing only
    /// the latest result when requests overlap
    Watch {
        /// Radius used for lines that do not specify one
        #[arg(long, default_value_t = SearchRadius::DEFAULT_METRES)]
        radius: u32,
    },
}

/// Shared clients and settings for commands that reach the network.
pub(crate) struct Context {
    pub nominatim: NominatimClient,
    pub overpass: Arc<OverpassClient>,
    pub thresholds: Arc<ThresholdTable>,
    pub geocode_limit: u32,
}

impl Context {
    fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let thresholds = bizgap_core::load_thresholds(config.thresholds_path.as_deref())?;
        Ok(Self {
            nominatim: NominatimClient::new(&config.user_agent, config.request_timeout_secs)?,
            overpass: Arc::new(OverpassClient::new(
                &config.user_agent,
                config.request_timeout_secs,
            )?),
            thresholds: Arc::new(thresholds),
            geocode_limit: config.geocode_limit,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = bizgap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Query { lat, lon, radius } => lookup::print_query(lat, lon, radius),
        Commands::Geocode { query, limit } => {
            let ctx = Context::from_config(&config)?;
            lookup::geocode(&ctx, &query, limit).await
        }
        Commands::Analyze {
            lat,
            lon,
            place,
            radius,
            json,
        } => {
            let ctx = Context::from_config(&config)?;
            let target = analyze::Target::from_args(lat, lon, place)?;
            analyze::run(&ctx, target, radius, json).await
        }
        Commands::Watch { radius } => {
            let ctx = Context::from_config(&config)?;
            watch::run_stdin(&ctx, radius).await
        }
    }
}

/// Validates a CLI radius and clamps it into the interactive slider range.
pub(crate) fn cli_radius(metres: u32) -> anyhow::Result<SearchRadius> {
    let requested = SearchRadius::new(metres)?;
    let clamped = requested.clamp_to_slider();
    if clamped != requested {
        tracing::warn!(
            requested = requested.metres(),
            used = clamped.metres(),
            "radius outside {}..={} m; clamped",
            SearchRadius::MIN_SLIDER_METRES,
            SearchRadius::MAX_SLIDER_METRES
        );
    }
    Ok(clamped)
}
