use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{COLUMNS, NormalizedRecord};

/// Append-only CSV sink for the export.
///
/// The header row is written exactly once when the sink is created, and each
/// appended record is flushed to disk immediately, so an interrupted run
/// still leaves a valid file containing the header and every completed row.
/// The underlying writer flushes again when the sink is dropped, covering
/// early exits.
pub struct CsvExportSink {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: u64,
}

impl CsvExportSink {
    /// Opens a fresh export file in `dir` (created if missing) under a
    /// timestamped, collision-resistant name and writes the header row.
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(export_file_name(Local::now()));
        let file = File::create(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(COLUMNS)?;
        writer.flush()?;
        Ok(Self {
            writer,
            path,
            rows: 0,
        })
    }

    /// Appends one record as a single row and flushes it to durable storage.
    pub fn append(&mut self, record: &NormalizedRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far (the header is not counted).
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes and releases the file handle, returning the export path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}

/// Builds the export filename from the local timestamp plus a random suffix
/// so repeated runs within the same second cannot collide.
pub fn export_file_name(now: DateTime<Local>) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
    format!("mailbox-report_{}_{suffix}.csv", now.format("%Y%m%d-%H%M%S"))
}
