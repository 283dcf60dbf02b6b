//! Human-readable output: summary on stdout, findings on stderr.

use std::path::Path;

use folio_core::finding::{Finding, Severity};
use folio_store_sqlite::LoadSummary;

/// Per-table row counts and the grand total, after a successful load.
pub fn print_summary(db: &Path, summary: &LoadSummary) {
  for (table, count) in &summary.counts {
    println!("  {:<24} {:>6} rows", table.name(), count);
  }
  println!(
    "Done. {} total rows imported into {}",
    summary.total,
    db.display()
  );
}

/// Every finding, rejects before warnings, one per line on stderr.
pub fn print_findings(findings: &[Finding]) {
  for finding in findings.iter().filter(|f| f.severity == Severity::Reject) {
    eprintln!("error: {finding}");
  }
  for finding in findings.iter().filter(|f| f.severity == Severity::Warn) {
    eprintln!("warning: {finding}");
  }
}
