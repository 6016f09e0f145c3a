//! Schema dumps.
//!
//! For each user database the active database context is switched and all
//! CREATE statements are written, newline-joined, to
//! `<database>.schema.txt`. A failure on any database aborts the whole
//! export; there is no partial-database skip policy.

use std::path::Path;

use tracing::debug;

use crate::connection::ClusterClient;
use crate::error::{ExportError, Result};

/// Dump all CREATE statements of one database into the staging directory.
pub async fn dump_database_schema(
    client: &ClusterClient,
    database: &str,
    staging: &Path,
) -> Result<()> {
    let creates = create_statements(client, database).await?;

    let path = staging.join(schema_file_name(database));
    tokio::fs::write(&path, creates.join("\n"))
        .await
        .map_err(|e| ExportError::SchemaDump {
            database: database.to_string(),
            message: e.to_string(),
        })?;

    debug!(
        "wrote {} create statements for database '{}'",
        creates.len(),
        database
    );
    Ok(())
}

/// Fetch the CREATE statements of every table in `database`.
async fn create_statements(client: &ClusterClient, database: &str) -> Result<Vec<String>> {
    let wrap = |e: tokio_postgres::Error| ExportError::SchemaDump {
        database: database.to_string(),
        message: e.to_string(),
    };

    client
        .execute_simple(&format!("USE {database}"))
        .await
        .map_err(wrap)?;

    let creates = client
        .query_string_column("SELECT create_statement FROM [SHOW CREATE ALL TABLES]")
        .await
        .map_err(wrap)?;
    Ok(creates)
}

/// File name for a database's schema dump.
pub fn schema_file_name(database: &str) -> String {
    format!("{database}.schema.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_file_name() {
        assert_eq!(schema_file_name("movr"), "movr.schema.txt");
    }
}
