//! Rule checking for a build-time self-test.
//!
//! # Rationale
//!
//! Running the test suite inside the build fails the image before it can
//! ship broken. The check looks for a RUN invoking a known test runner
//! before the final `CMD`/`ENTRYPOINT`, and reports informationally when
//! none is found.
//!
//! Test runners invoked through project-specific scripts are false
//! negatives; the runner table is a heuristic, not a complete detector.

use crate::shell;
use dockerlint_core::{Dockerfile, Finding, Opcode, Rule, Severity, SourceContext, Suggestion};

/// Rule code for has-test-step.
pub const CODE: &str = "DL011";

/// Rule name for has-test-step.
pub const NAME: &str = "has-test-step";

/// Reports when no RUN resembles a test-runner invocation.
#[derive(Debug, Clone, Default)]
pub struct HasTestStep;

impl HasTestStep {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for HasTestStep {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Reports when the build has no test-runner RUN step"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        if file.is_empty() {
            return Vec::new();
        }

        let boundary = file
            .instructions
            .iter()
            .rposition(|i| matches!(i.opcode, Opcode::Cmd | Opcode::Entrypoint))
            .unwrap_or(file.instructions.len());

        let has_test = file.instructions[..boundary]
            .iter()
            .filter(|i| i.opcode == Opcode::Run)
            .any(|i| {
                shell::commands(&i.arguments)
                    .iter()
                    .any(|c| shell::is_test_runner(c))
            });

        if has_test {
            return Vec::new();
        }

        let line = file
            .instructions
            .get(boundary)
            .or_else(|| file.instructions.last())
            .map_or(1, |i| i.line);

        vec![Finding::new(
            CODE,
            NAME,
            Severity::Info,
            line,
            "no test step found before the final CMD/ENTRYPOINT",
        )
        .with_suggestion(Suggestion::new(
            "run the test suite during the build, e.g. `RUN cargo test`",
        ))]
    }
}
