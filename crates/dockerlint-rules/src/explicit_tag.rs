//! Rule requiring an explicit tag or digest on base images.
//!
//! # Rationale
//!
//! `FROM image` and `FROM image:latest` both float: the build picks up
//! whatever `latest` points at today, so rebuilds are not reproducible
//! and base-image changes arrive unreviewed.
//!
//! References to earlier named build stages, `scratch`, and
//! variable-expanded image names are never flagged.

use dockerlint_core::{
    parse_from, Dockerfile, Finding, Opcode, Rule, Severity, SourceContext, Suggestion,
};

/// Rule code for explicit-tag.
pub const CODE: &str = "DL001";

/// Rule name for explicit-tag.
pub const NAME: &str = "explicit-tag";

/// Requires every `FROM` to pin a tag or digest, and forbids `latest`.
#[derive(Debug, Clone, Default)]
pub struct ExplicitTag;

impl ExplicitTag {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ExplicitTag {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires an explicit, non-latest tag or digest on FROM images"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut stages: Vec<String> = Vec::new();

        for instruction in file.by_opcode(&Opcode::From) {
            let Some(details) = parse_from(instruction) else {
                continue;
            };

            if let Some(stage) = &details.stage {
                stages.push(stage.to_ascii_lowercase());
            }

            let image = &details.image;
            if image.is_variable()
                || image.name.eq_ignore_ascii_case("scratch")
                || stages.contains(&image.name.to_ascii_lowercase())
            {
                continue;
            }

            if image.digest.is_some() {
                continue;
            }

            match image.tag.as_deref() {
                None => findings.push(
                    Finding::new(
                        CODE,
                        NAME,
                        Severity::Error,
                        instruction.line,
                        format!("base image `{}` has no tag and defaults to latest", image.name),
                    )
                    .with_suggestion(Suggestion::new(format!(
                        "pin a version, e.g. `{}:<version>`",
                        image.name
                    ))),
                ),
                Some("latest") => findings.push(
                    Finding::new(
                        CODE,
                        NAME,
                        Severity::Error,
                        instruction.line,
                        format!("base image `{}` uses the floating latest tag", image.name),
                    )
                    .with_suggestion(Suggestion::new(format!(
                        "pin a version, e.g. `{}:<version>`",
                        image.name
                    ))),
                ),
                Some(_) => {}
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
        ExplicitTag::new().check(&ctx, &file)
    }

    #[test]
    fn flags_missing_tag() {
        let findings = check_source("FROM ubuntu\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, CODE);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn flags_trailing_colon_as_missing_tag() {
        let findings = check_source("FROM ubuntu:\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("no tag"));
    }

    #[test]
    fn flags_latest_tag_exactly_once() {
        let findings = check_source("FROM ubuntu:latest\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("latest"));
    }

    #[test]
    fn accepts_pinned_tag() {
        assert!(check_source("FROM python:3.9-slim\n").is_empty());
    }

    #[test]
    fn accepts_digest_pin() {
        assert!(check_source("FROM alpine@sha256:abc123\n").is_empty());
    }

    #[test]
    fn skips_scratch() {
        assert!(check_source("FROM scratch\n").is_empty());
    }

    #[test]
    fn skips_stage_references() {
        let source = "FROM rust:1.75 AS builder\nFROM builder\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn skips_variable_images() {
        assert!(check_source("ARG BASE\nFROM ${BASE}\n").is_empty());
    }

    #[test]
    fn flags_each_untagged_stage() {
        let source = "FROM node AS build\nFROM nginx\n";
        let findings = check_source(source);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[1].line, 2);
    }
}
