//! Command line arguments.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "temperx", version)]
#[command(about = "Read TEMPerHUM/TEMPerX USB sensors")]
#[command(
    long_about = "Show temperature and humidity as measured by TEMPerHUM/TEMPerX USB devices (ID 413d:2107)"
)]
pub struct Cli {
    /// statsd prefix
    #[arg(long, default_value = "temperx")]
    pub prefix: String,

    /// statsd host
    #[arg(long, default_value = "127.0.0.1:8125")]
    pub host: String,

    /// Factor for temperature [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    pub tf: Option<f64>,

    /// Offset for temperature [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub to: Option<f64>,

    /// Factor for humidity [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    pub hf: Option<f64>,

    /// Offset for humidity [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub ho: Option<f64>,

    /// Configuration file [default: ~/.temperx.toml]
    #[arg(short, long)]
    pub conf: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
