//! Command-line interface for the workload exporter.
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Resolving flags and defaults into an [`ExportConfig`]
//! - Subcommand selection (export, version, completion)
//!
//! The pipeline itself never sees a flag; it consumes the resolved
//! configuration produced here.

pub mod completion;

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};

use crate::config::{ExportConfig, TimeRange};
use crate::error::{ConfigError, Result};

/// Workload Exporter - cluster diagnostics in a single archive
#[derive(Parser, Debug)]
#[command(
    name = "workload-exporter",
    version,
    about = "Export cluster workload diagnostics into a portable archive",
    long_about = "Exports statement and transaction statistics, contention events, node \
topology, schemas, and zone configurations from a CockroachDB cluster into a single zip \
archive for offline analysis."
)]
pub struct CliArgs {
    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for the workload exporter
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export cluster workload
    Export(ExportArgs),

    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}

/// Flags for the export subcommand
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Connection URL
    ///
    /// Format: postgresql://[username[:password]@]host[:port][/database][?options]
    #[arg(short = 'c', long, value_name = "URL")]
    pub connection_url: String,

    /// Output file
    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        default_value = "workload-export.zip"
    )]
    pub output_file: PathBuf,

    /// Start of the export window (RFC 3339), default six hours ago
    #[arg(short = 's', long, value_name = "TIME")]
    pub start: Option<String>,

    /// End of the export window (RFC 3339), default one hour from now
    #[arg(short = 'e', long, value_name = "TIME")]
    pub end: Option<String>,
}

impl ExportArgs {
    /// Resolve the flags into an export configuration.
    ///
    /// The window defaults to the last six hours, extended one hour into
    /// the future so statistics still being aggregated are covered.
    pub fn into_config(self) -> Result<ExportConfig> {
        let now = Utc::now();

        let start = match &self.start {
            Some(value) => parse_rfc3339("start", value)?,
            None => now - Duration::hours(6),
        };
        let end = match &self.end {
            Some(value) => parse_rfc3339("end", value)?,
            None => now + Duration::hours(1),
        };

        if start > end {
            return Err(ConfigError::InvalidTimeRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            }
            .into());
        }

        Ok(ExportConfig {
            connection_string: self.connection_url,
            output_file: self.output_file,
            time_range: TimeRange { start, end },
        })
    }
}

fn parse_rfc3339(field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            ConfigError::InvalidTimestamp {
                field: field.to_string(),
                message: e.to_string(),
            }
            .into()
        })
}
