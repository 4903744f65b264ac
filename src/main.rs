// scout: command-line front end for venue-scout.
// Runs one search and prints the published results.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;

use venue_scout::api::SearchClient;
use venue_scout::cache::{FileStore, SearchCache};
use venue_scout::geo::{Coordinate, FixedLocator, IpLocator};
use venue_scout::state::{LoadingState, SearchOrchestrator, SearchState};
use venue_scout::venue::DisplayResult;
use venue_scout::{Config, Result, ScoutError};

/// Find nearby venues by location or keyword.
///
/// Examples:
///   scout near
///   scout near --lat 35.6895 --lon 139.6917
///   scout find mahjong
///   scout cache clear
#[derive(Parser)]
#[command(name = "scout", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search around your position (IP-based unless --lat/--lon are given).
    Near {
        /// Latitude (-90 to 90).
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        /// Longitude (-180 to 180).
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
    },
    /// Search by free-text keyword.
    Find {
        keyword: String,
    },
    /// Manage the local result cache.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Delete every cached search.
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "venue_scout=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::from_env();
    debug!(?config, "loaded configuration");

    let cache_dir = config.cache_dir.clone().ok_or(ScoutError::NoCacheDir)?;
    let cache = SearchCache::with_ttl(FileStore::new(cache_dir), config.cache_ttl);
    let client = SearchClient::new(&config.api_base, config.http_timeout)?;
    let orchestrator = SearchOrchestrator::new(client, cache);

    match cli.command {
        Command::Near {
            lat: Some(lat),
            lon: Some(lon),
        } => {
            let locator = FixedLocator::new(Coordinate::new(lat, lon));
            orchestrator.search_nearby(&locator).await;
        }
        Command::Near { .. } => {
            let locator = IpLocator::new(config.geoip_url.as_str(), config.http_timeout)?;
            orchestrator.search_nearby(&locator).await;
        }
        Command::Find { keyword } => {
            orchestrator.search_by_keyword(&keyword).await;
        }
        Command::Cache {
            action: CacheAction::Clear,
        } => {
            orchestrator.with_cache(|cache| cache.clear())?;
            println!("Cache cleared.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    Ok(report(&orchestrator.snapshot()))
}

fn report(state: &SearchState) -> ExitCode {
    match &state.status {
        LoadingState::Loaded(results) if results.is_empty() => {
            println!("No venues found.");
            ExitCode::SUCCESS
        }
        LoadingState::Loaded(results) => {
            for (i, result) in results.iter().enumerate() {
                print_result(i + 1, result);
            }
            ExitCode::SUCCESS
        }
        LoadingState::Error(e) => {
            eprintln!("Search failed: {}", e);
            eprintln!("Please try again.");
            ExitCode::FAILURE
        }
        LoadingState::Idle | LoadingState::Loading => ExitCode::FAILURE,
    }
}

fn print_result(rank: usize, result: &DisplayResult) {
    let mut headline = format!("{}. {}", rank, result.name);
    if let Some(rating) = result.rating {
        headline.push_str(&format!("  ★ {:.1}", rating));
        if let Some(count) = result.rating_count {
            headline.push_str(&format!(" ({})", count));
        }
    }
    if result.recommended {
        headline.push_str("  [recommended]");
    }
    println!("{}", headline);

    if !result.address.is_empty() {
        println!("   {}", result.address);
    }
    if let Some(p) = result.proximity {
        println!("   {:.1} km away ({} min walk)", p.distance_km, p.walk_minutes);
    }
    if let Some(smoking) = &result.smoking_status {
        println!("   smoking: {}", smoking);
    }
    if let Some(s) = result.sentiment {
        println!("   positive {}% / negative {}%", s.positive, s.negative);
    }
    if let Some(summary) = &result.summary {
        println!("   {}", summary);
    }
    println!();
}
