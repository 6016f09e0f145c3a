//! Workload Exporter Library
//!
//! This library provides the core functionality for exporting workload
//! diagnostics from a CockroachDB cluster into a single portable archive.
//! It can be used standalone to embed the export pipeline into other tools.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Export configuration and the fixed table lists
//! - `connection`: Cluster connection management and redaction
//! - `error`: Error types and handling
//! - `export`: The export pipeline and its stages
//! - `utils`: Time helpers
//!
//! # Example
//!
//! ```no_run
//! use workload_exporter::config::{ExportConfig, TimeRange};
//! use workload_exporter::export::Exporter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExportConfig {
//!         connection_string: "postgresql://root@localhost:26257/defaultdb".to_string(),
//!         output_file: "workload-export.zip".into(),
//!         time_range: TimeRange {
//!             start: chrono::Utc::now() - chrono::Duration::hours(6),
//!             end: chrono::Utc::now(),
//!         },
//!     };
//!
//!     let exporter = Exporter::connect(config).await?;
//!     let outcome = exporter.run().await;
//!     exporter.close().await;
//!
//!     let report = outcome?;
//!     println!("archived {} files", report.files_archived);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod export;
pub mod utils;

// Re-export commonly used types
pub use config::{ExportConfig, TableSpec, TimeRange};
pub use connection::ClusterClient;
pub use error::{ExporterError, Result};
pub use export::{ExportReport, Exporter, Metadata};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
