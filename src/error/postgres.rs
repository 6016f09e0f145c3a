//! PostgreSQL driver error formatting.
//!
//! Uses the driver's typed `DbError` where available to surface the server
//! message, detail, and hint, and rewrites the most common SQLSTATE codes
//! into plainer language. Intended to be used by the parent module's
//! `Display` implementation for `ExporterError::Postgres`.

/// Format a driver error into a single diagnostic line.
pub fn format_postgres_error(error: &tokio_postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let code = db_error.code();
    let mut message = db_error.message().to_string();

    if let Some(detail) = db_error.detail() {
        if !detail.trim().is_empty() {
            message.push_str(&format!(" (detail: {detail})"));
        }
    }

    if let Some(hint) = db_error.hint() {
        if !hint.trim().is_empty() {
            message.push_str(&format!(" (hint: {hint})"));
        }
    }

    match code.code() {
        "28000" | "28P01" => format!("authentication failed: {message}"),
        "3D000" => format!("database does not exist: {message}"),
        "42P01" => format!("relation does not exist: {message}"),
        "42501" => format!("insufficient privilege: {message}"),
        "22007" => format!("invalid datetime format: {message}"),
        "57014" => format!("query canceled: {message}"),
        _ => format!("{message} (code: {})", code.code()),
    }
}
