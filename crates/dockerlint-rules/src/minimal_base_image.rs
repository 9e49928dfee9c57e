//! Rule preferring slim base-image variants.
//!
//! # Rationale
//!
//! Full distribution images ship compilers, package indexes and docs the
//! container never uses; slim and alpine variants cut image size and
//! attack surface.
//!
//! The check is opt-in by denylist: only repositories explicitly listed
//! are flagged, so unknown or in-house base images never produce noise.
//!
//! # Configuration
//!
//! - `denylist`: repository names to flag (defaults from `[linter]`
//!   `denylist_base_images`)

use dockerlint_core::{
    parse_from, Dockerfile, Finding, Opcode, Rule, Severity, SourceContext, Suggestion,
};

/// Rule code for minimal-base-image.
pub const CODE: &str = "DL002";

/// Rule name for minimal-base-image.
pub const NAME: &str = "minimal-base-image";

/// Tag substrings that mark an image as already minimal.
const SLIM_MARKERS: &[&str] = &["slim", "alpine", "distroless"];

/// Flags denylisted full-variant base images without a slim tag.
#[derive(Debug, Clone, Default)]
pub struct MinimalBaseImage {
    /// Repositories to flag.
    pub denylist: Vec<String>,
}

impl MinimalBaseImage {
    /// Creates a new rule with an empty denylist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the denylisted repositories.
    #[must_use]
    pub fn denylist(mut self, denylist: Vec<String>) -> Self {
        self.denylist = denylist;
        self
    }
}

impl Rule for MinimalBaseImage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Prefers slim/alpine variants for denylisted full base images"
    }

    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        let mut findings = Vec::new();

        for instruction in file.by_opcode(&Opcode::From) {
            let Some(details) = parse_from(instruction) else {
                continue;
            };

            let image = &details.image;
            if image.is_variable() {
                continue;
            }

            let repository = image.repository().to_ascii_lowercase();
            if !self.denylist.iter().any(|d| d.eq_ignore_ascii_case(&repository)) {
                continue;
            }

            let is_slim = image
                .tag
                .as_deref()
                .is_some_and(|tag| SLIM_MARKERS.iter().any(|m| tag.contains(m)));
            if is_slim {
                continue;
            }

            findings.push(
                Finding::new(
                    CODE,
                    NAME,
                    Severity::Warning,
                    instruction.line,
                    format!("base image `{}` is a full variant", image.name),
                )
                .with_suggestion(Suggestion::new(format!(
                    "use a minimal variant such as `{repository}:<version>-slim` or an alpine image"
                ))),
            );
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockerlint_core::{parse, MemoryFileSystem};

    fn check_with_denylist(source: &str, denylist: &[&str]) -> Vec<Finding> {
        let file = parse(source).expect("failed to parse");
        let fs = MemoryFileSystem::new();
        let ctx = SourceContext::from_stdin(source, &fs);
        MinimalBaseImage::new()
            .denylist(denylist.iter().map(ToString::to_string).collect())
            .check(&ctx, &file)
    }

    #[test]
    fn flags_denylisted_full_image() {
        let findings = check_with_denylist("FROM ubuntu:22.04\n", &["ubuntu"]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn flags_untagged_denylisted_image() {
        let findings = check_with_denylist("FROM python\n", &["python"]);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn accepts_slim_variant() {
        assert!(check_with_denylist("FROM python:3.9-slim\n", &["python"]).is_empty());
    }

    #[test]
    fn accepts_alpine_variant() {
        assert!(check_with_denylist("FROM node:20-alpine\n", &["node"]).is_empty());
    }

    #[test]
    fn unknown_images_never_flagged() {
        assert!(check_with_denylist("FROM internal/base:1.0\n", &["ubuntu"]).is_empty());
        assert!(check_with_denylist("FROM ubuntu:22.04\n", &[]).is_empty());
    }

    #[test]
    fn matches_repository_behind_namespace() {
        let findings = check_with_denylist("FROM library/ubuntu:22.04\n", &["ubuntu"]);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn denylist_match_is_case_insensitive() {
        let findings = check_with_denylist("FROM Ubuntu:22.04\n", &["ubuntu"]);
        assert_eq!(findings.len(), 1);
    }
}
