//! Rule checking the comment coverage of a Dockerfile.
//!
//! # Rationale
//!
//! A Dockerfile is configuration other people maintain; a comment above
//! an instruction explaining *why* beats rediscovering it from the shell
//! incantation. This check is informational only.
//!
//! # Configuration
//!
//! - `threshold`: minimum documented fraction in `[0, 1]` (default 0.5,
//!   from `[linter] documentation_threshold`)

use dockerlint_core::{Dockerfile, Finding, Rule, Severity, SourceContext, Suggestion};

/// Rule code for documented.
pub const CODE: &str = "DL009";

/// Rule name for documented.
pub const NAME: &str = "documented";

/// Reports when too few instructions carry a preceding comment.
#[derive(Debug, Clone)]
pub struct Documented {
    /// Minimum documented fraction.
    pub threshold: f64,
}

impl Default for Documented {
    fn default() -> Self {
        Self::new()
    }
}

impl Documented {
    /// Creates a new rule with the default threshold.
    #[must_use]
    pub fn new() -> Self {
        Self { threshold: 0.5 }
    }

    /// Sets the minimum documented fraction.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Rule for Documented {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Reports when comment coverage falls below the configured threshold"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    #[allow(clippy::cast_precision_loss)]
    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        if file.is_empty() {
            return Vec::new();
        }

        let total = file.instructions.len();
        let documented = file.instructions.iter().filter(|i| i.documented).count();
        let fraction = documented as f64 / total as f64;

        if fraction >= self.threshold {
            return Vec::new();
        }

        vec![Finding::new(
            CODE,
            NAME,
            Severity::Info,
            1,
            format!(
                "{documented} of {total} instructions are documented ({:.0}%, threshold {:.0}%)",
                fraction * 100.0,
                self.threshold * 100.0
            ),
        )
        .with_suggestion(Suggestion::new(
            "add a short comment above non-obvious instructions",
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockerlint_core::{parse, MemoryFileSystem};

    fn check_with_threshold(source: &str, threshold: f64) -> Vec<Finding> {
        let file = parse(source).expect("failed to parse");
        let fs = MemoryFileSystem::new();
        let ctx = SourceContext::from_stdin(source, &fs);
        Documented::new().threshold(threshold).check(&ctx, &file)
    }

    #[test]
    fn reports_low_coverage_once_at_line_one() {
        let source = "FROM alpine:3.19\nRUN true\nCMD [\"app\"]\n";
        let findings = check_with_threshold(source, 0.5);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].severity, Severity::Info);
        assert!(findings[0].message.contains("0 of 3"));
    }

    #[test]
    fn accepts_coverage_at_threshold() {
        let source = "# base\nFROM alpine:3.19\n# run it\nCMD [\"app\"]\n";
        assert!(check_with_threshold(source, 1.0).is_empty());
    }

    #[test]
    fn accepts_partial_coverage_above_threshold() {
        let source = "# base\nFROM alpine:3.19\nRUN true\n";
        assert!(check_with_threshold(source, 0.5).is_empty());
    }

    #[test]
    fn empty_file_is_exempt() {
        assert!(check_with_threshold("", 0.5).is_empty());
    }

    #[test]
    fn zero_threshold_never_reports() {
        let source = "FROM alpine:3.19\n";
        assert!(check_with_threshold(source, 0.0).is_empty());
    }
}
