//! Workload Exporter
//!
//! Exports workload diagnostics from a CockroachDB cluster - statement and
//! transaction statistics, contention events, node topology, schemas, and
//! zone configurations - into a single zip archive for offline analysis.
//!
//! # Usage
//!
//! ```bash
//! workload-exporter export \
//!     --connection-url postgresql://root@localhost:26257/defaultdb \
//!     --output-file workload-export.zip
//! ```

use clap::Parser;
use tracing::{info, Level};

use workload_exporter::cli::{completion, CliArgs, Commands, ExportArgs};
use workload_exporter::error::Result;
use workload_exporter::export::Exporter;
use workload_exporter::VERSION;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// Parses command-line arguments, initializes logging, and dispatches to
/// the selected subcommand.
async fn run() -> Result<()> {
    let cli = CliArgs::parse();
    initialize_logging(&cli);

    match cli.command {
        Commands::Version => {
            println!("workload-exporter {}", VERSION);
            Ok(())
        }
        Commands::Completion { shell } => completion::generate_completion(&shell),
        Commands::Export(args) => run_export(args).await,
    }
}

/// Run the export pipeline once and close the session on every outcome.
async fn run_export(args: ExportArgs) -> Result<()> {
    let config = args.into_config()?;

    let exporter = Exporter::connect(config).await?;
    let outcome = exporter.run().await;
    exporter.close().await;

    let report = outcome?;
    info!(
        "archived {} files in {:.2?}",
        report.files_archived, report.elapsed
    );
    Ok(())
}

/// Initialize logging system based on verbosity level
fn initialize_logging(cli: &CliArgs) {
    let level = if cli.very_verbose {
        Level::TRACE
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}
