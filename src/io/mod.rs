pub mod csv_export;
pub mod snapshot;
