//! Configuration for the export pipeline.
//!
//! The pipeline consumes a fully resolved [`ExportConfig`]; flag parsing and
//! defaulting happen in the `cli` module. The fixed table and system-database
//! lists live here as immutable data rather than process-wide state.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resolved export configuration. Immutable once the export starts.
///
/// Serializes with PascalCase keys so the manifest echo keeps the field
/// shape downstream analysis tooling expects (`ConnectionString`,
/// `OutputFile`, `TimeRange`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportConfig {
    /// Connection URL for the cluster.
    pub connection_string: String,

    /// Path of the zip archive to produce.
    pub output_file: PathBuf,

    /// Time window applied to time-columned tables.
    pub time_range: TimeRange,
}

/// Start and end of the export window.
///
/// The raw values are kept as given; whole-hour rounding is applied at
/// filter time by the table exporter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One system table to export, with the column used for time filtering
/// when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Database the table lives in.
    pub database: &'static str,

    /// Table name.
    pub name: &'static str,

    /// Timestamp column the export window filters on, if any.
    pub time_column: Option<&'static str>,
}

impl TableSpec {
    /// `database.table`, as used in queries and error context.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.database, self.name)
    }

    /// Name of the CSV file this table is exported to.
    pub fn file_name(&self) -> String {
        format!("{}.{}.csv", self.database, self.name)
    }
}

/// System tables exported on every run.
pub const EXPORT_TABLES: &[TableSpec] = &[
    TableSpec {
        database: "crdb_internal",
        name: "statement_statistics",
        time_column: Some("aggregated_ts"),
    },
    TableSpec {
        database: "crdb_internal",
        name: "transaction_statistics",
        time_column: Some("aggregated_ts"),
    },
    TableSpec {
        database: "crdb_internal",
        name: "transaction_contention_events",
        time_column: Some("collection_ts"),
    },
    TableSpec {
        database: "crdb_internal",
        name: "gossip_nodes",
        time_column: None,
    },
];

/// Databases that ship with the cluster, excluded from the schema dump.
pub const SYSTEM_DATABASES: &[&str] = &["system", "crdb_internal", "postgres"];

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_export_tables_are_well_formed() {
        assert!(!EXPORT_TABLES.is_empty());
        for table in EXPORT_TABLES {
            assert!(!table.database.is_empty());
            assert!(!table.name.is_empty());
        }
    }

    #[test]
    fn test_table_spec_names() {
        let table = TableSpec {
            database: "crdb_internal",
            name: "statement_statistics",
            time_column: Some("aggregated_ts"),
        };
        assert_eq!(table.qualified_name(), "crdb_internal.statement_statistics");
        assert_eq!(table.file_name(), "crdb_internal.statement_statistics.csv");
    }

    #[test]
    fn test_config_serializes_with_pascal_case_keys() {
        let config = ExportConfig {
            connection_string: "postgresql://user@localhost:26257/defaultdb".to_string(),
            output_file: PathBuf::from("test.zip"),
            time_range: TimeRange {
                start: Utc.with_ymd_and_hms(2025, 4, 18, 7, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2025, 4, 18, 13, 0, 0).unwrap(),
            },
        };

        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("ConnectionString").is_some());
        assert!(json.get("OutputFile").is_some());
        assert!(json["TimeRange"].get("Start").is_some());
        assert!(json["TimeRange"].get("End").is_some());
    }

    #[test]
    fn test_time_range_spans_expected_duration() {
        let start = Utc.with_ymd_and_hms(2025, 4, 18, 7, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 4, 18, 13, 0, 0).unwrap();
        let range = TimeRange { start, end };

        assert!(range.start < range.end);
        assert_eq!((range.end - range.start).num_hours(), 6);
    }
}
