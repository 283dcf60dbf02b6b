//! `folio` — import the corpus CSV tables into a SQLite database.
//!
//! # Usage
//!
//! ```
//! folio --data data --db database/corpus.db
//! folio --db out.db --overwrite --dedupe-appearances
//! ```
//!
//! Exit code 0 on success; 1 on any validation or load failure. The
//! summary goes to stdout, findings and diagnostics to stderr.

mod report;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use folio_core::{
  finding::has_rejects,
  validate::{self, DuplicatePolicy, Options},
};
use folio_store_sqlite::SqliteStore;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Import corpus CSV tables into SQLite")]
struct Args {
  /// Directory containing the nine source CSV files.
  #[arg(long, value_name = "DIR", env = "FOLIO_DATA", default_value = "data")]
  data: PathBuf,

  /// Output path for the SQLite database.
  #[arg(
    long,
    value_name = "FILE",
    env = "FOLIO_DB",
    default_value = "database/corpus.db"
  )]
  db: PathBuf,

  /// Replace an existing database file instead of refusing to run.
  #[arg(long)]
  overwrite: bool,

  /// Drop duplicate appearance rows with a warning instead of failing.
  #[arg(long)]
  dedupe_appearances: bool,

  /// Accept role/gender values regardless of letter case.
  #[arg(long)]
  ignore_enum_case: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{e:#}");
      ExitCode::FAILURE
    }
  }
}

// ─── Pipeline ─────────────────────────────────────────────────────────────────

fn run(args: &Args) -> anyhow::Result<()> {
  // Reading.
  let (mut ds, mut findings) =
    folio_csv::read_dataset(&args.data).with_context(|| {
      format!("reading CSV tables from {}", args.data.display())
    })?;
  info!(rows = ds.total_rows(), "parsed input tables");

  // Validating.
  let options = Options {
    duplicate_appearances:  if args.dedupe_appearances {
      DuplicatePolicy::DedupeAndWarn
    } else {
      DuplicatePolicy::Reject
    },
    case_insensitive_enums: args.ignore_enum_case,
  };
  findings.extend(validate::validate(&ds, &options));

  report::print_findings(&findings);
  if has_rejects(&findings) {
    let errors = findings.iter().filter(|f| f.is_reject()).count();
    anyhow::bail!("validation failed with {errors} error(s)");
  }

  if args.ignore_enum_case {
    validate::canonicalize_enum_case(&mut ds);
  }
  if args.dedupe_appearances {
    let removed = validate::dedupe_appearances(&mut ds);
    if removed > 0 {
      info!(removed, "dropped duplicate appearance rows");
    }
  }

  // Loading.
  let summary = SqliteStore::build(&args.db, args.overwrite, &ds)
    .with_context(|| format!("building database at {}", args.db.display()))?;

  report::print_summary(&args.db, &summary);
  Ok(())
}
