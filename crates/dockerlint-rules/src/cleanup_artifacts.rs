//! Rule for same-layer cleanup of downloaded artifacts.
//!
//! # Rationale
//!
//! Layers are additive: a file downloaded in one RUN and removed in a
//! later RUN still occupies space in the earlier layer. The removal only
//! helps when it happens in the same RUN as the download.
//!
//! Matching is by artifact basename over known download and extraction
//! tools; renamed or indirectly removed artifacts are false negatives.

use crate::shell;
use dockerlint_core::{Dockerfile, Finding, Opcode, Rule, Severity, SourceContext, Suggestion};

/// Rule code for cleanup-artifacts.
pub const CODE: &str = "DL005";

/// Rule name for cleanup-artifacts.
pub const NAME: &str = "cleanup-artifacts";

/// Flags artifacts downloaded in one RUN and removed in a later RUN.
#[derive(Debug, Clone, Default)]
pub struct CleanupArtifacts;

impl CleanupArtifacts {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for CleanupArtifacts {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags artifact removal in a later layer than the download"
    }

    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        // One pass building (line, artifact) download records, then a
        // lookup per removal; both sides stay linear in instruction count.
        let mut downloads: Vec<(usize, String)> = Vec::new();
        let mut findings = Vec::new();

        for instruction in file.by_opcode(&Opcode::Run) {
            let commands = shell::commands(&instruction.arguments);

            let mut downloaded_here: Vec<String> = Vec::new();
            for command in &commands {
                downloaded_here.extend(shell::downloaded_artifacts(command));
            }

            for command in &commands {
                for removed in shell::removed_files(command) {
                    // Removal in the same RUN as the download is the
                    // good pattern.
                    if downloaded_here.contains(&removed) {
                        continue;
                    }
                    if let Some((download_line, _)) =
                        downloads.iter().find(|(_, name)| *name == removed)
                    {
                        findings.push(
                            Finding::new(
                                CODE,
                                NAME,
                                Severity::Warning,
                                instruction.line,
                                format!(
                                    "`{removed}` is removed here but was downloaded at line \
                                     {download_line}; the earlier layer keeps its full size"
                                ),
                            )
                            .with_suggestion(Suggestion::new(
                                "download, use and remove the artifact in a single RUN",
                            )),
                        );
                    }
                }
            }

            for name in downloaded_here {
                downloads.push((instruction.line, name));
            }
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
        CleanupArtifacts::new().check(&ctx, &file)
    }

    #[test]
    fn flags_removal_in_later_layer() {
        let source = "FROM debian:12-slim\n\
                      RUN wget https://example.com/tool-1.2.tar.gz\n\
                      RUN tar -xzf tool-1.2.tar.gz -C /opt\n\
                      RUN rm tool-1.2.tar.gz\n";
        let findings = check_source(source);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 4);
        assert!(findings[0].message.contains("line 2"));
    }

    #[test]
    fn accepts_same_layer_cleanup() {
        let source = "FROM debian:12-slim\n\
                      RUN wget https://example.com/tool-1.2.tar.gz && \\\n\
                      \x20   tar -xzf tool-1.2.tar.gz -C /opt && \\\n\
                      \x20   rm tool-1.2.tar.gz\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn accepts_download_without_removal() {
        let source = "FROM debian:12-slim\n\
                      RUN curl -o app.tar.gz https://example.com/app\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn unrelated_removal_not_flagged() {
        let source = "FROM debian:12-slim\n\
                      RUN wget https://example.com/tool.tar.gz\n\
                      RUN rm /tmp/other.txt\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn matches_across_different_paths() {
        let source = "FROM debian:12-slim\n\
                      RUN curl -o /tmp/pkg.tar.gz https://example.com/pkg\n\
                      RUN rm -f /tmp/pkg.tar.gz\n";
        let findings = check_source(source);
        assert_eq!(findings.len(), 1);
    }
}
