//! OneFix CLI - acquire one qualifying fix from a simulated GPS source.
//!
//! This binary demonstrates the acquisition session end to end: it builds
//! a scripted location source whose accuracy improves fix by fix (a GPS
//! warm-up), starts a session against it, and prints the outcome. The
//! permission and provider preconditions can be forced to fail with flags
//! to exercise the short-circuit paths.

mod error;

use std::time::Duration;

use clap::Parser;
use tracing::debug;

use onefix::acquisition::{
    AcquisitionOutcome, AcquisitionRequest, AcquisitionSession, PositionSample,
};
use onefix::platform::{ScriptedSource, ScriptedUpdate, StaticPermissions, StaticProviders};

use error::CliError;

#[derive(Parser)]
#[command(name = "onefix")]
#[command(about = "Acquire a single fresh, accurate location fix", long_about = None)]
#[command(version = onefix::VERSION)]
struct Args {
    /// Maximum fix age in minutes
    #[arg(long, default_value = "0")]
    max_age_minutes: u32,

    /// Maximum accuracy radius in meters
    #[arg(long, default_value = "19")]
    accuracy_meters: f32,

    /// Provider poll interval in milliseconds
    #[arg(long, default_value = "3000")]
    poll_interval_ms: u64,

    /// Fastest provider interval in milliseconds
    #[arg(long, default_value = "1000")]
    fastest_interval_ms: u64,

    /// Cancel the acquisition after this many seconds without a fix
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Simulate denied location permission
    #[arg(long)]
    deny_permission: bool,

    /// Simulate a disabled GPS provider
    #[arg(long)]
    disable_gps: bool,

    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

/// Simulated GPS warm-up over Hamburg: accuracy tightens fix by fix.
fn warmup_script() -> Vec<ScriptedUpdate> {
    const LAT: f64 = 53.630278;
    const LON: f64 = 9.988333;

    [120.0, 64.0, 35.0, 18.0, 9.0]
        .into_iter()
        .enumerate()
        .map(|(i, accuracy)| {
            ScriptedUpdate::after(
                Duration::from_millis(300),
                PositionSample::new(LAT + 0.0001 * i as f64, LON, accuracy),
            )
        })
        .collect()
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        e.exit();
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let default_level = if args.verbose { "debug" } else { "warn" };
    onefix::logging::init_console_logging(default_level).map_err(CliError::LoggingInit)?;

    let request = AcquisitionRequest::default()
        .with_max_age_minutes(args.max_age_minutes)
        .with_max_accuracy_meters(args.accuracy_meters)
        .with_poll_interval(Duration::from_millis(args.poll_interval_ms))
        .with_fastest_interval(Duration::from_millis(args.fastest_interval_ms));

    let permissions = StaticPermissions {
        fine: !args.deny_permission,
        coarse: !args.deny_permission,
    };
    let providers = if args.disable_gps {
        StaticProviders::gps_disabled()
    } else {
        StaticProviders::all_enabled()
    };
    let source = ScriptedSource::new(warmup_script());

    let (session, waiter) = AcquisitionSession::new(request)?;
    session.start(&permissions, &providers, &source);

    if let Some(secs) = args.timeout_secs {
        let watchdog = session.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            debug!(timeout_secs = secs, "timeout elapsed, cancelling session");
            watchdog.cancel();
        });
    }

    match waiter.outcome().await {
        AcquisitionOutcome::Success(sample) => {
            println!(
                "lat: {:.6} lon: {:.6} (±{:.0} m)",
                sample.latitude, sample.longitude, sample.accuracy_meters
            );
            Ok(())
        }
        AcquisitionOutcome::Failure(reason) => Err(CliError::Acquisition(reason)),
        AcquisitionOutcome::Cancelled => match args.timeout_secs {
            Some(secs) => Err(CliError::TimedOut { secs }),
            None => {
                println!("cancelled");
                Ok(())
            }
        },
    }
}
