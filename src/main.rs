use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use skyai_core::{AppError, Config};
use skyai_dashboard::{build_locator, render, Dashboard, DashboardSnapshot, LoadOutcome};
use skyai_weather::{Coordinates, FixedLocation, SystemLocator};

#[derive(Debug, Parser)]
#[command(name = "skyai")]
#[command(version, about = "AI-assisted weather dashboard for the terminal")]
struct Cli {
    /// Latitude to show instead of looking the position up
    #[arg(long, allow_hyphen_values = true, requires = "longitude")]
    latitude: Option<f64>,

    /// Longitude to show instead of looking the position up
    #[arg(long, allow_hyphen_values = true, requires = "latitude")]
    longitude: Option<f64>,

    /// Config file (default: <config dir>/skyai/config.toml)
    #[arg(long, env = "SKYAI_CONFIG")]
    config: Option<PathBuf>,

    /// Refresh every `weather.refresh_minutes` until Ctrl-C
    #[arg(long)]
    watch: bool,

    /// Print the snapshot as JSON instead of the rendered view
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = skyai_core::init() {
        eprintln!("{e:#}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let (config, _) = Config::load_validated(cli.config.as_deref())?;

    if !config.gemini.is_configured() {
        tracing::warn!("No Gemini API key configured, showing simulated data");
    }

    let locator = match (cli.latitude, cli.longitude) {
        (Some(lat), Some(lon)) => SystemLocator::Fixed(FixedLocation(Coordinates::new(lat, lon))),
        _ => build_locator(&config)?,
    };
    let dashboard = Dashboard::from_config(&config)?;

    dashboard.mount(&locator).await;
    print_snapshot(&dashboard.snapshot(), cli.json)?;

    if !cli.watch {
        dashboard.unmount();
        return Ok(());
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let Some(period) = config.weather.refresh_interval() else {
        tracing::info!("Automatic refresh disabled, waiting for Ctrl-C");
        let _ = shutdown.await;
        dashboard.unmount();
        return Ok(());
    };

    let mut ticker = tokio::time::interval(period);
    // the first tick fires immediately
    ticker.tick().await;
    tracing::info!("Watching, refreshing every {} min", period.as_secs() / 60);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match dashboard.refresh().await {
                    LoadOutcome::Completed => print_snapshot(&dashboard.snapshot(), cli.json)?,
                    other => tracing::debug!("Refresh skipped: {:?}", other),
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    dashboard.unmount();
    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot, json: bool) -> Result<(), AppError> {
    if json {
        let text = serde_json::to_string_pretty(snapshot)
            .map_err(|e| AppError::Other(anyhow::Error::new(e)))?;
        println!("{text}");
    } else {
        let today = chrono::Local::now().date_naive();
        println!("{}", render(snapshot, today));
    }
    Ok(())
}
