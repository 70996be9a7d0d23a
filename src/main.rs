use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mailbox_audit::io::snapshot::TenantSnapshot;
use mailbox_audit::model::{FilterMode, MailboxCategory};
use mailbox_audit::{AuditError, ExportConfig, Pipeline, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;

    if !cli.snapshot.exists() {
        return Err(AuditError::MissingInput(cli.snapshot));
    }
    let snapshot = TenantSnapshot::from_file(&cli.snapshot)?;

    let category = match cli.mailbox_type {
        Some(choice) => choice.into(),
        None => prompt_category()?,
    };
    let filter = match cli.filter {
        Some(choice) => choice.into(),
        None => prompt_filter()?,
    };

    let config = ExportConfig {
        category,
        filter,
        output_dir: cli.output_dir,
    };
    let mut pipeline = Pipeline::new(&snapshot, &snapshot, &snapshot, &snapshot, config);
    let report = pipeline.run()?;

    println!(
        "Exported {} of {} mailboxes to {}",
        report.exported,
        report.processed,
        report.output_path.display()
    );
    if report.failed > 0 {
        println!("{} account(s) skipped because a lookup failed", report.failed);
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| AuditError::Logging(error.to_string()))
}

fn prompt_category() -> Result<MailboxCategory> {
    let choice = prompt(
        "Which mailboxes should be exported?\n  1) Shared mailboxes\n  2) User mailboxes\n  3) All mailboxes\n> ",
    )?;
    match choice.as_str() {
        "1" => Ok(MailboxCategory::Shared),
        "2" => Ok(MailboxCategory::User),
        "3" => Ok(MailboxCategory::All),
        other => Err(AuditError::InvalidSelection(other.to_string())),
    }
}

fn prompt_filter() -> Result<FilterMode> {
    let choice = prompt(
        "Which accounts should be included?\n  1) All mailboxes\n  2) Licensed mailboxes only\n> ",
    )?;
    match choice.as_str() {
        "1" => Ok(FilterMode::AllMailboxes),
        "2" => Ok(FilterMode::LicensedOnly),
        other => Err(AuditError::InvalidSelection(other.to_string())),
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export mailbox licensing, storage, and forwarding data to CSV."
)]
struct Cli {
    /// Tenant snapshot file (JSON) holding accounts, identities, and usage.
    #[arg(long)]
    snapshot: PathBuf,

    /// Directory the timestamped export file is written to.
    #[arg(long, default_value = "reports")]
    output_dir: PathBuf,

    /// Mailbox category to export; prompted for interactively when omitted.
    #[arg(long, value_enum)]
    mailbox_type: Option<CategoryChoice>,

    /// License filter to apply; prompted for interactively when omitted.
    #[arg(long, value_enum)]
    filter: Option<FilterChoice>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CategoryChoice {
    Shared,
    User,
    All,
}

impl From<CategoryChoice> for MailboxCategory {
    fn from(choice: CategoryChoice) -> Self {
        match choice {
            CategoryChoice::Shared => MailboxCategory::Shared,
            CategoryChoice::User => MailboxCategory::User,
            CategoryChoice::All => MailboxCategory::All,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FilterChoice {
    All,
    LicensedOnly,
}

impl From<FilterChoice> for FilterMode {
    fn from(choice: FilterChoice) -> Self {
        match choice {
            FilterChoice::All => FilterMode::AllMailboxes,
            FilterChoice::LicensedOnly => FilterMode::LicensedOnly,
        }
    }
}
