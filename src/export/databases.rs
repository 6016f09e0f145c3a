//! Database enumeration.

use crate::config::SYSTEM_DATABASES;
use crate::connection::ClusterClient;
use crate::error::{ExportError, Result};

/// List the cluster's databases, excluding the fixed system set.
///
/// Order is whatever the server reports; an empty result is valid and
/// simply means no schema files get written.
pub async fn user_databases(client: &ClusterClient) -> Result<Vec<String>> {
    let names = client
        .query_string_column("SELECT database_name FROM [SHOW DATABASES]")
        .await
        .map_err(|e| ExportError::DatabaseList(e.to_string()))?;
    Ok(filter_user_databases(names))
}

/// Drop the system databases, preserving the order of the rest.
///
/// Matching is case-sensitive and exact.
pub fn filter_user_databases(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| !SYSTEM_DATABASES.contains(&name.as_str()))
        .collect()
}
