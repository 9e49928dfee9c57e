//! Rule against copying the whole build context.
//!
//! # Rationale
//!
//! `COPY . /app` drags in everything the context holds, including files
//! the image does not need, and invalidates the layer on any change.
//! Copying named paths keeps layers small and cache-friendly.

use dockerlint_core::{Dockerfile, Finding, Opcode, Rule, Severity, SourceContext, Suggestion};

/// Rule code for specific-copy.
pub const CODE: &str = "DL006";

/// Rule name for specific-copy.
pub const NAME: &str = "specific-copy";

/// Flags COPY instructions whose source is the entire context.
#[derive(Debug, Clone, Default)]
pub struct SpecificCopy;

impl SpecificCopy {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SpecificCopy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags COPY with the whole build context as source"
    }

    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        let mut findings = Vec::new();

        for instruction in file.by_opcode(&Opcode::Copy) {
            // Stage-to-stage copies read from an image, not the context.
            if instruction.arguments.iter().any(|a| a.starts_with("--from")) {
                continue;
            }

            let source = instruction
                .arguments
                .iter()
                .find(|a| !a.starts_with("--"));
            if matches!(source.map(String::as_str), Some(".") | Some("./")) {
                findings.push(
                    Finding::new(
                        CODE,
                        NAME,
                        Severity::Warning,
                        instruction.line,
                        "COPY copies the whole build context",
                    )
                    .with_suggestion(Suggestion::new(
                        "name the files or directories the image actually needs",
                    )),
                );
            }
        }

        findings
    }
}
