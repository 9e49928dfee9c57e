//! Shared output formatting for lint results.

use anyhow::Result;
use dockerlint_core::{AnalysisReport, Finding, Severity};
use serde::Serialize;
use std::path::PathBuf;

use crate::OutputFormat;

/// Renders analysis reports to the output text for the given format.
///
/// Pure over its inputs: rendering the same reports twice yields the
/// same text.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render(reports: &[(Option<PathBuf>, AnalysisReport)], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => render_json(reports),
        OutputFormat::Compact => Ok(render_compact(reports)),
    }
}

/// Renders and writes to stdout.
///
/// # Errors
///
/// Returns an error when rendering fails.
pub fn print(reports: &[(Option<PathBuf>, AnalysisReport)], format: OutputFormat) -> Result<()> {
    print!("{}", render(reports, format)?);
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn push_finding(out: &mut String, finding: &Finding) {
    out.push_str(&format!(
        "  {}: [{}] {} ({}): {}\n",
        finding.line,
        severity_indicator(finding.severity),
        finding.rule,
        finding.code,
        finding.message,
    ));
    if let Some(suggestion) = &finding.suggestion {
        out.push_str(&format!("     = help: {}\n", suggestion.message));
    }
}

fn render_text(reports: &[(Option<PathBuf>, AnalysisReport)]) -> String {
    let mut out = String::new();
    let mut errors = 0;
    let mut warnings = 0;
    let mut infos = 0;

    for (path, report) in reports {
        if let Some(path) = path {
            out.push_str(&format!("{}:\n", path.display()));
        }

        // Errors first, then warnings, then informational notes.
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            for finding in report.by_severity(severity) {
                push_finding(&mut out, finding);
            }
        }

        let (e, w, i) = report.count_by_severity();
        errors += e;
        warnings += w;
        infos += i;

        if !report.findings.is_empty() {
            out.push('\n');
        }
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    out.push_str(&format!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m\n",
        summary_color,
        errors,
        warnings,
        infos,
        reports.len()
    ));

    out
}

/// JSON payload for one analyzed file.
#[derive(Serialize)]
struct FileReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a PathBuf>,
    status: dockerlint_core::Status,
    rules_run: usize,
    findings: &'a [Finding],
}

fn render_json(reports: &[(Option<PathBuf>, AnalysisReport)]) -> Result<String> {
    let payload: Vec<FileReport<'_>> = reports
        .iter()
        .map(|(path, report)| FileReport {
            path: path.as_ref(),
            status: report.overall_status(),
            rules_run: report.rules_run,
            findings: &report.findings,
        })
        .collect();

    let mut json = serde_json::to_string_pretty(&payload)?;
    json.push('\n');
    Ok(json)
}

fn render_compact(reports: &[(Option<PathBuf>, AnalysisReport)]) -> String {
    let mut out = String::new();
    for (path, report) in reports {
        for finding in &report.findings {
            match path {
                Some(path) => out.push_str(&format!("{}:{finding}\n", path.display())),
                None => out.push_str(&format!("{finding}\n")),
            }
        }
    }
    out
}
