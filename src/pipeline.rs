//! Pipeline driver: sequences account enumeration, record joining, license
//! filtering, and the streaming CSV sink as a single forward-only pass.

use std::path::PathBuf;

use tracing::{error, info, instrument, warn};

use crate::error::{AuditError, Result};
use crate::filter;
use crate::io::csv_export::CsvExportSink;
use crate::join::RecordJoiner;
use crate::model::{AccountDescriptor, FilterMode, MailboxCategory};
use crate::provider::{AccountSource, IdentityLookup, SessionProvider, UsageLookup};

/// Explicit run configuration, passed to the driver instead of process-wide
/// state.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub category: MailboxCategory,
    pub filter: FilterMode,
    pub output_dir: PathBuf,
}

/// Lifecycle of one export run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Streaming,
    Completed,
    Aborted,
}

/// Outcome summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Accounts pulled from the source, whatever their outcome.
    pub processed: u64,
    /// Rows written to the export file.
    pub exported: u64,
    /// Accounts rejected by the license filter.
    pub filtered: u64,
    /// Accounts skipped because a lookup failed for them.
    pub failed: u64,
    pub output_path: PathBuf,
}

/// Single-pass export driver over the four collaborator traits.
///
/// Accounts are processed one at a time in provider order: each descriptor is
/// enriched, filtered, and appended before the next one is pulled. Per-account
/// lookup failures are logged and skipped; session loss and sink write
/// failures abort the run, leaving a valid partial file behind.
pub struct Pipeline<'a> {
    session: &'a dyn SessionProvider,
    accounts: &'a dyn AccountSource,
    joiner: RecordJoiner<'a>,
    config: ExportConfig,
    state: DriverState,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        session: &'a dyn SessionProvider,
        accounts: &'a dyn AccountSource,
        identity: &'a dyn IdentityLookup,
        usage: &'a dyn UsageLookup,
        config: ExportConfig,
    ) -> Self {
        Self {
            session,
            accounts,
            joiner: RecordJoiner::new(identity, usage),
            config,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Runs the export to completion. Returns the run summary, or
    /// [`AuditError::Aborted`] carrying the number of rows already durable
    /// when an unrecoverable failure stopped the stream.
    #[instrument(
        level = "info",
        skip_all,
        fields(category = ?self.config.category, filter = ?self.config.filter)
    )]
    pub fn run(&mut self) -> Result<RunReport> {
        if !self.session.ensure_session_active()? {
            return Err(AuditError::SessionUnavailable(
                "authentication provider reports no active session".to_string(),
            ));
        }

        let mut sink = CsvExportSink::create(&self.config.output_dir)?;
        info!(path = %sink.path().display(), "export file opened");
        self.state = DriverState::Streaming;

        match self.stream(&mut sink) {
            Ok((processed, filtered, failed)) => {
                let exported = sink.rows_written();
                let output_path = sink.finish()?;
                self.state = DriverState::Completed;
                info!(
                    processed,
                    exported,
                    filtered,
                    failed,
                    path = %output_path.display(),
                    "export complete"
                );
                Ok(RunReport {
                    processed,
                    exported,
                    filtered,
                    failed,
                    output_path,
                })
            }
            Err(source) => {
                let written = sink.rows_written();
                self.state = DriverState::Aborted;
                error!(%source, written, "export aborted; partial file retained");
                Err(AuditError::Aborted {
                    written,
                    source: Box::new(source),
                })
            }
        }
    }

    fn stream(&self, sink: &mut CsvExportSink) -> Result<(u64, u64, u64)> {
        let mut processed = 0u64;
        let mut filtered = 0u64;
        let mut failed = 0u64;

        for item in self.accounts.list_accounts(self.config.category)? {
            let outcome = self.process(item, sink);
            processed += 1;
            match outcome {
                Ok(true) => {}
                Ok(false) => filtered += 1,
                Err(fatal) if fatal.is_fatal() => return Err(fatal),
                Err(skipped) => {
                    warn!(%skipped, "skipping account");
                    failed += 1;
                }
            }
            info!(processed, "accounts processed");
        }

        Ok((processed, filtered, failed))
    }

    /// Handles one element: enrich, filter, append. Returns whether the
    /// account made it into the export.
    fn process(
        &self,
        item: Result<AccountDescriptor>,
        sink: &mut CsvExportSink,
    ) -> Result<bool> {
        let descriptor = item?;
        let enriched = self.joiner.enrich(descriptor)?;
        if !filter::admits(self.config.filter, &enriched.identity) {
            return Ok(false);
        }
        let record = RecordJoiner::normalize(&enriched);
        sink.append(&record)?;
        Ok(true)
    }
}
