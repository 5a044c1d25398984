use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use metar_daemon::config::{ConfigError, DaemonConfig};
use metar_daemon::display::report_summary;
use metar_daemon::domain::{InvalidStationId, StationId};
use metar_daemon::fetch::{FetchError, ReportClient};
use metar_daemon::store::CacheStore;
use metar_daemon::update::{UpdateError, UpdateOutcome, UpdateRequest, run_update};

/// Fetch, decode, and cache the latest METAR for one station
#[derive(Parser, Debug)]
#[command(name = "metar-daemon")]
struct Args {
    /// Target station identifier (overrides the config file)
    #[arg(short, long)]
    airport: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable info logging
    #[arg(short, long)]
    info: bool,

    /// Force an update cycle even if the cache is fresh
    #[arg(short, long)]
    update: bool,

    /// Print every field of the fetched report
    #[arg(short, long)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/metar-daemon/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Station(#[from] InvalidStationId),

    #[error("failed to create HTTP client: {0}")]
    Client(#[from] FetchError),

    #[error("update for {station} failed: {source}")]
    Update {
        station: StationId,
        source: UpdateError,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "update failed");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise the level comes from the flags.
fn init_tracing(args: &Args) {
    let level = if args.debug {
        "debug"
    } else if args.info {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<(), RunError> {
    let mut config = match &args.config {
        Some(path) => DaemonConfig::load(path)?,
        None => DaemonConfig::load_default()?,
    };
    if let Some(airport) = args.airport {
        config.airport = airport.to_ascii_uppercase();
    }

    let station = config.station()?;
    let client = ReportClient::new(config.client_config())?;
    let store = CacheStore::new(&config.cache_path);
    let request = UpdateRequest::new(station)
        .with_force(args.update)
        .with_max_attempts(config.max_attempts)
        .with_interval(config.update_interval());

    let outcome = run_update(&client, &store, &request, Utc::now())
        .await
        .map_err(|source| RunError::Update {
            station: request.station.clone(),
            source,
        })?;

    match outcome {
        UpdateOutcome::Refreshed {
            report,
            observation_changed,
            ..
        } => {
            if !observation_changed {
                info!(station = %request.station, "service returned the cached observation");
            }
            if args.verbose {
                print!("{}", report_summary(&report));
            }
        }
        UpdateOutcome::Skipped { .. } => {}
    }

    Ok(())
}
