use std::collections::BTreeMap;
use std::io::{self, Write};

use serde_json::{json, Value};

use crate::processor::{FileOutcome, RunReport};

/// Write one line per processed file followed by a summary
pub fn write_report<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    for (name, outcome) in &report.outcomes {
        match outcome {
            FileOutcome::Updated { slug } => {
                writeln!(out, "[{}] {} -> {}", outcome.kind(), name, slug)?
            }
            FileOutcome::Skipped(reason) => {
                writeln!(out, "[{}] {}: {}", outcome.kind(), name, reason)?
            }
            FileOutcome::Failed(err) => writeln!(out, "[{}] {}: {}", outcome.kind(), name, err)?,
        }
    }

    summarize(out, report)
}

/// Summarize outcome counts and skip reasons
pub fn summarize<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    let counts = report.counts();

    writeln!(out)?;
    writeln!(out, "=== Summary: {} ===", report.dir.display())?;
    if report.dry_run {
        writeln!(out, "(dry run, nothing written)")?;
    }
    writeln!(
        out,
        "{} updated, {} skipped, {} failed",
        counts.updated, counts.skipped, counts.failed
    )?;

    let mut reasons: BTreeMap<String, usize> = BTreeMap::new();
    for (_, outcome) in &report.outcomes {
        if let FileOutcome::Skipped(reason) = outcome {
            *reasons.entry(reason.to_string()).or_insert(0) += 1;
        }
    }
    for (reason, count) in reasons {
        writeln!(out, "  {} x {}", count, reason)?;
    }

    if !report.excluded.is_empty() {
        writeln!(out, "excluded: {}", report.excluded.join(", "))?;
    }

    Ok(())
}

pub fn print_report(report: &RunReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report)
}

/// Machine-readable form of the report
pub fn report_json(report: &RunReport) -> Value {
    let counts = report.counts();
    let files: Vec<Value> = report
        .outcomes
        .iter()
        .map(|(name, outcome)| match outcome {
            FileOutcome::Updated { slug } => {
                json!({ "file": name, "status": outcome.kind(), "slug": slug })
            }
            FileOutcome::Skipped(reason) => {
                json!({ "file": name, "status": outcome.kind(), "reason": reason.to_string() })
            }
            FileOutcome::Failed(err) => {
                json!({ "file": name, "status": outcome.kind(), "error": err.to_string() })
            }
        })
        .collect();

    json!({
        "dir": report.dir.display().to_string(),
        "dry_run": report.dry_run,
        "files": files,
        "excluded": report.excluded,
        "counts": {
            "updated": counts.updated,
            "skipped": counts.skipped,
            "failed": counts.failed,
        },
    })
}
