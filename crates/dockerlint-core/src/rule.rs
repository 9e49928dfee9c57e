//! Rule trait for defining lint checks.

use crate::context::SourceContext;
use crate::instruction::Dockerfile;
use crate::types::{Finding, Severity};

/// An independent lint check over the full instruction sequence.
///
/// Rules are pure functions of the parsed [`Dockerfile`]: they receive
/// the whole sequence by shared reference (several checks need
/// cross-instruction context such as ordering), return their own
/// findings, and never observe another rule's output. That independence
/// is a contract, not an accident - it is what allows the engine to run
/// rules in any order, or concurrently, without coordination.
///
/// # Example
///
/// ```ignore
/// use dockerlint_core::{Dockerfile, Finding, Rule, Severity, SourceContext};
///
/// pub struct NoAddInstruction;
///
/// impl Rule for NoAddInstruction {
///     fn name(&self) -> &'static str { "no-add" }
///     fn code(&self) -> &'static str { "DL900" }
///
///     fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
///         file.by_opcode(&Opcode::Add)
///             .map(|i| Finding::new(self.code(), self.name(), Severity::Warning,
///                                   i.line, "prefer COPY over ADD"))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "explicit-tag").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for findings from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks the instruction sequence and returns any findings.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Where the Dockerfile came from and the filesystem collaborator
    /// * `file` - The parsed instruction sequence, read-only
    fn check(&self, ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MemoryFileSystem;
    use crate::instruction::{Instruction, Opcode};

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
            file.instructions
                .iter()
                .map(|i| {
                    Finding::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        i.line,
                        "test finding",
                    )
                })
                .collect()
        }
    }

    #[test]
    fn rule_trait_defaults() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Warning);
    }

    #[test]
    fn rule_check_sees_full_sequence() {
        let fs = MemoryFileSystem::new();
        let ctx = SourceContext::from_stdin("", &fs);
        let file = Dockerfile {
            instructions: vec![
                Instruction::new(Opcode::From, vec!["alpine".into()], 1),
                Instruction::new(Opcode::Run, vec!["true".into()], 2),
            ],
            warnings: Vec::new(),
        };
        assert_eq!(TestRule.check(&ctx, &file).len(), 2);
    }
}
