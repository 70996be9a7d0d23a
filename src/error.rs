use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, AuditError>;

/// Error type covering the different failure cases that can occur while the
/// tool enumerates accounts, joins provider records, or writes the export.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the authentication provider has no usable session, either
    /// at startup or because the session was lost mid-run.
    #[error("session unavailable: {0}")]
    SessionUnavailable(String),

    /// Raised when a lookup failed or returned no record for one account.
    /// Scoped to that account; the export continues without it.
    #[error("lookup failed for account {account}: {reason}")]
    AccountLookup { account: String, reason: String },

    /// Errors bubbled up from the tabular export writer. Treated as
    /// unrecoverable because continuing would risk silent data loss.
    #[error("export write error: {0}")]
    SinkWrite(#[from] csv::Error),

    /// Raised when an unrecoverable failure stopped the run. The partial
    /// export file remains valid with `written` complete rows.
    #[error("export aborted after {written} rows: {source}")]
    Aborted {
        written: u64,
        #[source]
        source: Box<AuditError>,
    },

    /// Raised when the user provides a snapshot path that does not exist.
    #[error("snapshot file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when an interactive prompt receives an unrecognised choice.
    #[error("invalid selection '{0}'")]
    InvalidSelection(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl AuditError {
    /// Whether this error must stop the whole run. Per-account lookup
    /// failures are the only recoverable class.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AuditError::AccountLookup { .. })
    }

    /// Rewraps a lookup failure so it carries the identifier of the account
    /// it occurred for. Session loss is a run-level condition and passes
    /// through untouched.
    pub fn scoped_to(self, account: &str) -> AuditError {
        match self {
            error @ AuditError::SessionUnavailable(_) => error,
            error => AuditError::AccountLookup {
                account: account.to_string(),
                reason: error.to_string(),
            },
        }
    }
}
