//! Command line configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;

use crate::controller::{BucketPolicy, ControllerConfig, DEFAULT_TRIGGER_RATIO};

/// Scroll through the product roadmap in your terminal
#[derive(Debug, Clone, Parser)]
#[command(name = "roadmap-tui", version, about)]
pub struct Cli {
    /// Activation line as a fraction of the viewport height
    #[arg(long, default_value_t = DEFAULT_TRIGGER_RATIO)]
    pub trigger_ratio: f64,

    /// How scroll progress is divided into phases
    #[arg(long, value_enum, default_value_t = BucketPolicy::Skewed)]
    pub buckets: BucketPolicy,

    /// Height of the roadmap section, in screens
    #[arg(long, default_value_t = 3)]
    pub section_screens: u16,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 33)]
    pub tick_rate_ms: u64,

    /// Write tracing output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase tracing verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Validated runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub controller: ControllerConfig,
    pub section_screens: u16,
    pub tick_rate: Duration,
    pub log_file: Option<PathBuf>,
    pub verbose: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            section_screens: 3,
            tick_rate: Duration::from_millis(33),
            log_file: None,
            verbose: 0,
        }
    }
}

impl Config {
    /// Tracing filter derived from the verbosity count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        if !(0.0..=1.0).contains(&cli.trigger_ratio) {
            bail!(
                "--trigger-ratio must be between 0 and 1, got {}",
                cli.trigger_ratio
            );
        }
        if cli.section_screens == 0 {
            bail!("--section-screens must be at least 1");
        }
        if cli.tick_rate_ms == 0 {
            bail!("--tick-rate-ms must be at least 1");
        }

        Ok(Self {
            controller: ControllerConfig {
                trigger_ratio: cli.trigger_ratio,
                bucket_policy: cli.buckets,
            },
            section_screens: cli.section_screens,
            tick_rate: Duration::from_millis(cli.tick_rate_ms),
            log_file: cli.log_file,
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let cli = Cli::try_parse_from(std::iter::once("roadmap-tui").chain(args.iter().copied()))?;
        Config::try_from(cli)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_exact_buckets_and_verbosity() {
        let config = parse(&["--buckets", "exact", "-vv"]).unwrap();
        assert_eq!(config.controller.bucket_policy, BucketPolicy::Exact);
        assert_eq!(config.log_level(), "trace");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse(&["--trigger-ratio", "1.5"]).is_err());
        assert!(parse(&["--section-screens", "0"]).is_err());
        assert!(parse(&["--tick-rate-ms", "0"]).is_err());
        assert!(parse(&["--buckets", "sideways"]).is_err());
    }
}
