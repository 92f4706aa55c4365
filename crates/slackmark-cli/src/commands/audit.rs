use anyhow::{bail, Result};
use slackmark_anonymizer::audit::audit;
use slackmark_anonymizer::{AuditReport, Severity};
use std::path::Path;

pub fn handle(directory: &Path, json: bool) -> Result<()> {
    let report = audit(directory)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(directory, &report);
    }

    if report.has_errors() {
        bail!("Audit found credentials that must not be shared");
    }
    Ok(())
}

fn print_report(directory: &Path, report: &AuditReport) {
    println!("Audit of {}:", directory.display());
    for finding in &report.findings {
        let mark = match finding.severity {
            Severity::Ok => "✓",
            Severity::Warning => "!",
            Severity::Error => "✗",
        };
        println!("  {} [{}] {}", mark, finding.check, finding.message);
    }

    println!(
        "\n{} errors, {} warnings",
        report.count(Severity::Error),
        report.count(Severity::Warning)
    );
}
