//! Zone configuration dump.

use std::path::Path;

use tracing::debug;

use crate::connection::ClusterClient;
use crate::error::{ExportError, Result};

/// File name of the zone configuration dump inside the archive.
pub const ZONE_CONFIG_FILE: &str = "zone_configurations.txt";

/// Dump the raw zone configuration SQL for all zones.
///
/// NULL rows are filtered out server-side; a cluster with no zone
/// configurations produces an empty file, not an error.
pub async fn dump_zone_configurations(client: &ClusterClient, staging: &Path) -> Result<()> {
    let configs = client
        .query_string_column(
            "WITH z AS (SHOW ALL ZONE CONFIGURATIONS) \
             SELECT raw_config_sql FROM z WHERE raw_config_sql IS NOT NULL",
        )
        .await
        .map_err(|e| ExportError::ZoneConfigs(e.to_string()))?;

    let path = staging.join(ZONE_CONFIG_FILE);
    tokio::fs::write(&path, configs.join("\n"))
        .await
        .map_err(|e| ExportError::ZoneConfigs(e.to_string()))?;

    debug!("wrote {} zone configurations", configs.len());
    Ok(())
}
