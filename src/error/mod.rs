//! Error handling for the workload exporter.
//!
//! This module provides the error types used across the crate:
//! - A single top-level [`ExporterError`] wrapping more specific kinds
//! - Stage-aware export errors that name the failing table/database/setting
//! - Driver error formatting with SQLSTATE-aware detail
//!
//! # Example
//!
//! ```rust,no_run
//! use workload_exporter::error::{ExporterError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     // Fallible operations across the crate return this Result alias
//!     Ok(())
//! }
//! ```

pub mod kinds;
pub mod postgres;

// Re-export commonly used types
pub use kinds::{ConfigError, ConnectionError, ExportError, ExporterError, Result};
pub use postgres::format_postgres_error;
