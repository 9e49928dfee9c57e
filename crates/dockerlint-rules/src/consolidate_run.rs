//! Rule for consolidating consecutive package-manager RUN layers.
//!
//! # Rationale
//!
//! `RUN apt-get update` followed by `RUN apt-get install` in a separate
//! layer is the classic stale-index bug: the update layer is cached
//! independently of the install. Related install steps belong in one
//! RUN joined with `&&`.
//!
//! Detection is a textual heuristic over known package managers; an
//! install spelled through a wrapper script is a false negative.

use crate::shell;
use dockerlint_core::{Dockerfile, Finding, Opcode, Rule, Severity, SourceContext, Suggestion};

/// Rule code for consolidate-run.
pub const CODE: &str = "DL004";

/// Rule name for consolidate-run.
pub const NAME: &str = "consolidate-run";

/// Flags runs of consecutive package-manager RUN instructions.
#[derive(Debug, Clone, Default)]
pub struct ConsolidateRun;

impl ConsolidateRun {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ConsolidateRun {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags consecutive package-manager RUN instructions that should be one layer"
    }

    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut previous_was_install = false;
        let mut group_reported = false;

        for instruction in &file.instructions {
            if instruction.opcode != Opcode::Run {
                previous_was_install = false;
                group_reported = false;
                continue;
            }

            let is_install = shell::commands(&instruction.arguments)
                .iter()
                .any(|c| shell::is_package_manager(c));

            // One finding per group, at the second member.
            if is_install && previous_was_install && !group_reported {
                findings.push(
                    Finding::new(
                        CODE,
                        NAME,
                        Severity::Warning,
                        instruction.line,
                        "consecutive package-manager RUN instructions create separate layers",
                    )
                    .with_suggestion(Suggestion::new(
                        "merge related install steps into one RUN joined with `&&`",
                    )),
                );
                group_reported = true;
            }

            if !is_install {
                group_reported = false;
            }
            previous_was_install = is_install;
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockerlint_core::{parse, MemoryFileSystem};

    fn check_source(source: &str) -> Vec<Finding> {
        let file = parse(source).expect("failed to parse");
        let fs = MemoryFileSystem::new();
        let ctx = SourceContext::from_stdin(source, &fs);
        ConsolidateRun::new().check(&ctx, &file)
    }

    #[test]
    fn flags_update_then_install_layers() {
        let source = "FROM debian:12-slim\n\
                      RUN apt-get update\n\
                      RUN apt-get install -y curl\n";
        let findings = check_source(source);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 3);
    }

    #[test]
    fn accepts_single_consolidated_run() {
        let source = "FROM debian:12-slim\n\
                      RUN apt-get update && apt-get install -y curl\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn group_of_three_reports_once() {
        let source = "FROM debian:12-slim\n\
                      RUN apt-get update\n\
                      RUN apt-get install -y curl\n\
                      RUN apt-get install -y git\n";
        assert_eq!(check_source(source).len(), 1);
    }

    #[test]
    fn separate_groups_report_separately() {
        let source = "FROM debian:12-slim\n\
                      RUN apt-get update\n\
                      RUN apt-get install -y curl\n\
                      WORKDIR /app\n\
                      RUN pip install flask\n\
                      RUN pip install gunicorn\n";
        let findings = check_source(source);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line, 3);
        assert_eq!(findings[1].line, 6);
    }

    #[test]
    fn non_install_runs_are_ignored() {
        let source = "FROM debian:12-slim\n\
                      RUN echo one\n\
                      RUN echo two\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn install_after_non_install_run_is_fine() {
        let source = "FROM debian:12-slim\n\
                      RUN apt-get update && apt-get install -y curl\n\
                      RUN mkdir /app\n\
                      RUN pip install flask\n";
        assert!(check_source(source).is_empty());
    }
}
