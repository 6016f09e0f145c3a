use std::{fmt, io};

use crate::error::postgres::format_postgres_error;

/// Crate-wide `Result` type using [`ExporterError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Top-level error type for exporter operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum ExporterError {
    /// Connection-related errors.
    Connection(ConnectionError),

    /// Errors raised by an export pipeline stage.
    Export(ExportError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// PostgreSQL driver errors.
    Postgres(tokio_postgres::Error),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// The connection string is not a valid URL.
    InvalidUrl(String),

    /// TLS connector setup failed.
    Tls(String),
}

/// Errors raised by the export pipeline, carrying enough context to name
/// the stage and object that failed.
#[derive(Debug)]
pub enum ExportError {
    /// Could not read the cluster version.
    ClusterVersion(String),

    /// Could not read a named cluster setting.
    ClusterSetting { name: String, message: String },

    /// Could not list the cluster's databases.
    DatabaseList(String),

    /// Schema dump failed for one database.
    SchemaDump { database: String, message: String },

    /// Zone configuration dump failed.
    ZoneConfigs(String),

    /// Table export failed for one table.
    TableExport { table: String, message: String },

    /// Manifest serialization or write failed.
    Manifest(String),

    /// Archive creation failed.
    Archive(String),

    /// Staging directory could not be created.
    Staging(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// A time flag could not be parsed as RFC 3339.
    InvalidTimestamp { field: String, message: String },

    /// The time range is inverted.
    InvalidTimeRange { start: String, end: String },

    /// Unsupported shell for completion generation.
    UnsupportedShell(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ExporterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExporterError::Connection(e) => write!(f, "Connection error: {e}"),
            ExporterError::Export(e) => write!(f, "{e}"),
            ExporterError::Config(e) => write!(f, "Configuration error: {e}"),
            ExporterError::Io(e) => write!(f, "I/O error: {e}"),
            ExporterError::Postgres(e) => write!(f, "{}", format_postgres_error(e)),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::InvalidUrl(msg) => {
                write!(f, "Failed to parse connection string: {msg}")
            }
            ConnectionError::Tls(msg) => write!(f, "TLS setup failed: {msg}"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::ClusterVersion(msg) => {
                write!(f, "Failed to get cluster version: {msg}")
            }
            ExportError::ClusterSetting { name, message } => {
                write!(f, "Failed to get cluster setting {name}: {message}")
            }
            ExportError::DatabaseList(msg) => write!(f, "Failed to list databases: {msg}"),
            ExportError::SchemaDump { database, message } => {
                write!(f, "Failed to export schema for database {database}: {message}")
            }
            ExportError::ZoneConfigs(msg) => {
                write!(f, "Failed to export zone configurations: {msg}")
            }
            ExportError::TableExport { table, message } => {
                write!(f, "Failed to export data for table {table}: {message}")
            }
            ExportError::Manifest(msg) => write!(f, "Failed to write metadata file: {msg}"),
            ExportError::Archive(msg) => write!(f, "Failed to create archive: {msg}"),
            ExportError::Staging(msg) => {
                write!(f, "Failed to create staging directory: {msg}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimestamp { field, message } => {
                write!(f, "Invalid {field} time: {message}")
            }
            ConfigError::InvalidTimeRange { start, end } => {
                write!(f, "Start time {start} is after end time {end}")
            }
            ConfigError::UnsupportedShell(shell) => {
                write!(f, "Unsupported shell: {shell}. Supported shells: bash, zsh, fish")
            }
        }
    }
}

impl std::error::Error for ExporterError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ExportError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to ExporterError ========================= */

impl From<io::Error> for ExporterError {
    fn from(err: io::Error) -> Self {
        ExporterError::Io(err)
    }
}

impl From<tokio_postgres::Error> for ExporterError {
    fn from(err: tokio_postgres::Error) -> Self {
        ExporterError::Postgres(err)
    }
}

impl From<ConnectionError> for ExporterError {
    fn from(err: ConnectionError) -> Self {
        ExporterError::Connection(err)
    }
}

impl From<ExportError> for ExporterError {
    fn from(err: ExportError) -> Self {
        ExporterError::Export(err)
    }
}

impl From<ConfigError> for ExporterError {
    fn from(err: ConfigError) -> Self {
        ExporterError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_names_the_setting() {
        let err = ExportError::ClusterSetting {
            name: "sql.stats.flush.interval".to_string(),
            message: "connection reset".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sql.stats.flush.interval"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn test_export_error_names_the_table() {
        let err = ExportError::TableExport {
            table: "crdb_internal.statement_statistics".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("crdb_internal.statement_statistics"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: ExporterError = io_err.into();
        assert!(matches!(err, ExporterError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
