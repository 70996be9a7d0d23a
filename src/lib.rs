//! Core library for the mailbox-audit command line application.
//!
//! The library exposes the data-join and streaming-export pipeline that powers
//! the command-line interface as well as the integration tests. The modules
//! are structured to keep responsibilities narrow and composable: collaborator
//! traits live in [`provider`], the domain records in [`model`], the
//! enrichment and normalization logic in [`join`], the license predicate in
//! [`filter`], IO adapters under [`io`], and the run orchestration in
//! [`pipeline`].

pub mod error;
pub mod filter;
pub mod io;
pub mod join;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use error::{AuditError, Result};
pub use pipeline::{DriverState, ExportConfig, Pipeline, RunReport};
