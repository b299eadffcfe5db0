//! temperx - TEMPerX temperature reporter.
//!
//! Reads every attached TEMPerHUM/TEMPerX sensor once, prints the
//! calibrated temperature of each and sends it to StatsD as
//! `<prefix>.<index>.temperature`.

use anyhow::{Context, Result};
use clap::Parser;
use temperx_core::TEMPER_X;
use temperx_hid::{HidApiTransport, scan};
use temperx_metrics::{MetricSink, NoopSink, StatsdSink};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(format!("temperx={level}").parse()?),
        )
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), "Starting temperx");

    // Load configuration
    let file_config = match config::config_path(&cli) {
        Some(path) => {
            debug!(?path, "Trying to read configuration");
            config::load_config(&path)?
        }
        None => config::Config::default(),
    };
    let calibration = config::resolve_calibration(&cli, &file_config);
    debug!(
        tf = calibration.temperature_factor,
        to = calibration.temperature_offset,
        hf = calibration.humidity_factor,
        ho = calibration.humidity_offset,
        "Using factors and offsets"
    );

    // Metrics are optional; readings are still printed without them
    let mut sink: Box<dyn MetricSink> = match StatsdSink::connect(&cli.host, &cli.prefix) {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            warn!(host = %cli.host, error = %e, "statsd unavailable, metrics disabled");
            Box::new(NoopSink)
        }
    };

    let mut transport = HidApiTransport::new().context("Failed to initialise HID access")?;
    let summary = scan(&mut transport, &TEMPER_X, &calibration, sink.as_mut())
        .context("Failed to scan HID devices")?;

    for reading in &summary.readings {
        println!("ID: {}, Temperature: {}", reading.index, reading.calibrated);
    }

    if summary.matched == 0 {
        info!(devices = summary.enumerated, "No {} sensor found", TEMPER_X.name);
    } else if !summary.failures.is_empty() {
        warn!(
            failed = summary.failures.len(),
            matched = summary.matched,
            "Some sensors could not be read"
        );
    }

    Ok(())
}
