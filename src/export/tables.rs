//! Table export.
//!
//! Each configured system table becomes one CSV file: a header line built
//! from a zero-row schema probe, followed by the server's CSV COPY output
//! streamed directly into the file. Time-columned tables are filtered to
//! the export window, rounded to whole hours.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::config::{TableSpec, TimeRange};
use crate::connection::ClusterClient;
use crate::error::{ExportError, Result};
use crate::utils::time::{end_of_hour, floor_to_hour, sql_timestamp};

/// Export one table to `<database>.<table>.csv` in the staging directory.
///
/// A table with no rows in the window yields a header-only file, which is
/// valid output.
pub async fn export_table(
    client: &ClusterClient,
    table: &TableSpec,
    range: &TimeRange,
    staging: &Path,
) -> Result<()> {
    let wrap = |message: String| ExportError::TableExport {
        table: table.qualified_name(),
        message,
    };

    let columns = client
        .table_columns(table.database, table.name)
        .await
        .map_err(|e| wrap(e.to_string()))?;

    let path = staging.join(table.file_name());
    let file = File::create(&path).await.map_err(|e| wrap(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(header_line(&columns).as_bytes())
        .await
        .map_err(|e| wrap(e.to_string()))?;

    let query = copy_query(table, range);
    let bytes_copied = client
        .copy_csv(&query, &mut writer)
        .await
        .map_err(|e| wrap(e.to_string()))?;

    writer.flush().await.map_err(|e| wrap(e.to_string()))?;

    debug!(
        "wrote {} data bytes for table '{}'",
        bytes_copied,
        table.qualified_name()
    );
    Ok(())
}

/// Comma-joined column names plus a trailing newline.
///
/// Names are emitted as-is, without CSV quoting. A column name containing
/// a comma would produce a misaligned header; none of the exported system
/// tables have one.
fn header_line(columns: &[String]) -> String {
    format!("{}\n", columns.join(","))
}

/// Build the CSV COPY query for one table.
///
/// Tables with a time column get a BETWEEN filter over the export window:
/// the start is floored to the top of its hour, the end raised to the last
/// second of its hour, both rendered as plain timestamps without timezone
/// suffix. Tables without a time column are copied whole.
fn copy_query(table: &TableSpec, range: &TimeRange) -> String {
    let filter = match table.time_column {
        Some(column) => format!(
            " WHERE {} BETWEEN '{}' AND '{}'",
            column,
            sql_timestamp(floor_to_hour(range.start)),
            sql_timestamp(end_of_hour(range.end)),
        ),
        None => String::new(),
    };

    format!(
        "COPY (SELECT * FROM {}.{}{}) TO STDOUT WITH CSV",
        table.database, table.name, filter
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn sample_range() -> TimeRange {
        TimeRange {
            start: Utc.with_ymd_and_hms(2025, 4, 18, 7, 45, 30).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 4, 18, 13, 12, 5).unwrap(),
        }
    }

    #[test]
    fn test_copy_query_with_time_column() {
        let table = TableSpec {
            database: "crdb_internal",
            name: "statement_statistics",
            time_column: Some("aggregated_ts"),
        };

        let query = copy_query(&table, &sample_range());
        assert_eq!(
            query,
            "COPY (SELECT * FROM crdb_internal.statement_statistics \
             WHERE aggregated_ts BETWEEN '2025-04-18 07:00:00' AND '2025-04-18 13:59:59') \
             TO STDOUT WITH CSV"
        );
    }

    #[test]
    fn test_copy_query_without_time_column_has_no_filter() {
        let table = TableSpec {
            database: "crdb_internal",
            name: "gossip_nodes",
            time_column: None,
        };

        let query = copy_query(&table, &sample_range());
        assert_eq!(
            query,
            "COPY (SELECT * FROM crdb_internal.gossip_nodes) TO STDOUT WITH CSV"
        );
    }

    #[test]
    fn test_header_line() {
        let columns = vec!["aggregated_ts".to_string(), "fingerprint_id".to_string()];
        assert_eq!(header_line(&columns), "aggregated_ts,fingerprint_id\n");
    }

    #[test]
    fn test_header_only_file_is_valid_csv() {
        let columns = vec!["node_id".to_string(), "network".to_string()];
        let content = header_line(&columns);

        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("node_id,network"));
        assert_eq!(lines.next(), None);
    }
}
