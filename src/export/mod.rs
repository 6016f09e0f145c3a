//! The export pipeline.
//!
//! This module orchestrates a single forward-only export run:
//!
//! 1. **Metadata collector** — cluster version and the two statistics
//!    intervals ([`metadata`])
//! 2. **Database enumerator** — non-system databases ([`databases`])
//! 3. **Schema dumper** — CREATE statements per database ([`schema`])
//! 4. **Zone config dumper** — zone configuration SQL ([`zones`])
//! 5. **Table exporter** — fixed system tables as CSV ([`tables`])
//! 6. **Manifest writer** — `metadata.json` ([`metadata`])
//! 7. **Archiver** — staging directory into a zip file ([`archive`])
//!
//! Every stage writes into a shared staging directory that is created
//! before any output and removed, best effort, on every exit path. There
//! is no resumption point: a failure in any stage aborts the rest of the
//! run.

pub mod archive;
pub mod databases;
pub mod metadata;
pub mod schema;
pub mod tables;
pub mod zones;

pub use metadata::Metadata;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{ExportConfig, EXPORT_TABLES};
use crate::connection::ClusterClient;
use crate::error::{ExportError, Result};

/// Result of a completed export run.
#[derive(Debug)]
pub struct ExportReport {
    /// Path of the archive that was written.
    pub output_file: PathBuf,

    /// Number of files packaged into the archive.
    pub files_archived: usize,

    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}

/// Drives the export pipeline over a single cluster session.
pub struct Exporter {
    config: ExportConfig,
    client: ClusterClient,
}

impl Exporter {
    /// Connect to the cluster and build an exporter.
    pub async fn connect(config: ExportConfig) -> Result<Self> {
        let client = ClusterClient::connect(&config.connection_string).await?;
        Ok(Self { config, client })
    }

    /// Run every stage in order and produce the output archive.
    ///
    /// The staging directory is removed before returning, on success and
    /// failure alike; removal failures are logged, not escalated.
    pub async fn run(&self) -> Result<ExportReport> {
        let started = Instant::now();
        info!("starting export");
        info!(
            "using time range: {} - {}",
            self.config.time_range.start, self.config.time_range.end
        );

        let staging = tempfile::Builder::new()
            .prefix("workload-export-")
            .tempdir()
            .map_err(|e| ExportError::Staging(e.to_string()))?;
        debug!("created staging directory at '{}'", staging.path().display());

        let outcome = self.run_stages(staging.path()).await;

        let staging_path = staging.path().to_path_buf();
        if let Err(e) = staging.close() {
            warn!(
                "failed to remove staging directory '{}': {}",
                staging_path.display(),
                e
            );
        }

        let files_archived = outcome?;
        info!(
            "export completed successfully: {}",
            self.config.output_file.display()
        );

        Ok(ExportReport {
            output_file: self.config.output_file.clone(),
            files_archived,
            elapsed: started.elapsed(),
        })
    }

    async fn run_stages(&self, staging: &Path) -> Result<usize> {
        info!("collecting cluster metadata");
        let facts = metadata::collect_cluster_facts(&self.client).await?;

        info!("exporting database schemas");
        let databases = databases::user_databases(&self.client).await?;
        for database in &databases {
            info!("  exporting database {}", database);
            schema::dump_database_schema(&self.client, database, staging).await?;
        }

        info!("exporting all zone configurations");
        zones::dump_zone_configurations(&self.client, staging).await?;

        info!("starting table export");
        for table in EXPORT_TABLES {
            info!("  exporting table '{}'", table.qualified_name());
            tables::export_table(&self.client, table, &self.config.time_range, staging).await?;
        }
        info!("finished table export");

        let manifest = Metadata::new(&self.config, self.client.redacted_url(), facts);
        metadata::write_manifest(&manifest, staging).await?;

        info!(
            "creating archive at '{}'",
            self.config.output_file.display()
        );
        archive::write_archive(staging, &self.config.output_file).await
    }

    /// Close the underlying session.
    pub async fn close(self) {
        self.client.close().await;
    }
}
