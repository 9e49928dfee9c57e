//! Rule engine orchestrating lint execution.

use crate::config::Config;
use crate::context::SourceContext;
use crate::instruction::Dockerfile;
use crate::rule::{Rule, RuleBox};
use crate::types::{AnalysisReport, Finding, Severity};

use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// Builder for configuring an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Registers a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Registers multiple boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// The rule engine: a registry of independent checks dispatched over a
/// shared read-only instruction sequence.
///
/// Use [`Engine::builder()`] to construct an instance.
///
/// Rules run in registration order and never see each other's findings,
/// so the result is deterministic and the contract would equally permit
/// concurrent execution. A rule that panics is isolated: the panic is
/// converted into a single error finding tagged with the rule's id, and
/// the remaining rules still run.
pub struct Engine {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Engine {
    /// Creates a new builder for configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs all registered rules against the parsed Dockerfile.
    ///
    /// Parse-time warnings carried on the [`Dockerfile`] are merged into
    /// the report, subject to the same enable/severity configuration as
    /// rule findings.
    pub fn run(&self, ctx: &SourceContext<'_>, file: &Dockerfile) -> AnalysisReport {
        info!(
            rules = self.rules.len(),
            instructions = file.instructions.len(),
            "starting analysis"
        );

        let mut report = AnalysisReport::new();

        for warning in &file.warnings {
            if self.config.is_rule_enabled(&warning.rule) {
                let mut finding = warning.clone();
                if let Some(severity) = self.config.rule_severity(&finding.rule) {
                    finding.severity = severity;
                }
                report.findings.push(finding);
            }
        }

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!(rule = rule.name(), "skipping disabled rule");
                continue;
            }

            let findings = self.run_isolated(rule.as_ref(), ctx, file);
            let findings = self.apply_severity_override(rule.name(), findings);
            report.findings.extend(findings);
            report.rules_run += 1;
        }

        // Deterministic output: line order, then rule code.
        report
            .findings
            .sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.code.cmp(&b.code)));

        info!(
            findings = report.findings.len(),
            status = %report.overall_status(),
            "analysis complete"
        );

        report
    }

    /// Runs one rule, converting a panic into a single error finding so
    /// a defect in one check cannot mask results from the others.
    fn run_isolated(
        &self,
        rule: &dyn Rule,
        ctx: &SourceContext<'_>,
        file: &Dockerfile,
    ) -> Vec<Finding> {
        match catch_unwind(AssertUnwindSafe(|| rule.check(ctx, file))) {
            Ok(findings) => findings,
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                warn!(rule = rule.name(), detail, "rule panicked; isolating");
                vec![Finding::new(
                    rule.code(),
                    rule.name(),
                    Severity::Error,
                    1,
                    format!("internal rule fault: {detail}"),
                )]
            }
        }
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(&self, rule_name: &str, mut findings: Vec<Finding>) -> Vec<Finding> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for f in &mut findings {
                f.severity = severity;
            }
        }
        findings
    }
}

/// Extracts a printable message from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
