//! Rule for dependency-install ordering relative to whole-context copies.
//!
//! # Rationale
//!
//! `COPY . .` before a dependency install invalidates the install layer
//! on every source change. Copying only the manifest first (e.g.
//! `package.json`, `Cargo.toml`) keeps the dependency layer cached.

use crate::shell;
use dockerlint_core::{Dockerfile, Finding, Opcode, Rule, Severity, SourceContext, Suggestion};

/// Rule code for layer-caching-order.
pub const CODE: &str = "DL003";

/// Rule name for layer-caching-order.
pub const NAME: &str = "layer-caching-order";

/// Flags a whole-context COPY that precedes a dependency-install RUN.
#[derive(Debug, Clone, Default)]
pub struct LayerCachingOrder;

impl LayerCachingOrder {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Returns true for a COPY of the whole build context.
fn is_whole_context_copy(instruction: &dockerlint_core::Instruction) -> bool {
    if instruction.arguments.iter().any(|a| a.starts_with("--from")) {
        return false;
    }
    let source = instruction
        .arguments
        .iter()
        .find(|a| !a.starts_with("--"));
    matches!(source.map(String::as_str), Some(".") | Some("./"))
}

impl Rule for LayerCachingOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags COPY of the whole context before a dependency-install RUN"
    }

    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        // Single pass: remember the first whole-context COPY, then look
        // for a later install RUN.
        let mut whole_copy: Option<&dockerlint_core::Instruction> = None;

        for instruction in &file.instructions {
            match instruction.opcode {
                Opcode::Copy if whole_copy.is_none() => {
                    if is_whole_context_copy(instruction) {
                        whole_copy = Some(instruction);
                    }
                }
                Opcode::Run => {
                    let Some(copy) = whole_copy else { continue };
                    let installs = shell::commands(&instruction.arguments)
                        .iter()
                        .any(|c| shell::is_package_manager(c));
                    if installs {
                        return vec![Finding::new(
                            CODE,
                            NAME,
                            Severity::Warning,
                            copy.line,
                            format!(
                                "whole-context COPY defeats layer caching for the \
                                 dependency install at line {}",
                                instruction.line
                            ),
                        )
                        .with_suggestion(Suggestion::new(
                            "copy only the dependency manifest first, install, then copy the rest",
                        ))];
                    }
                }
                _ => {}
            }
        }

        Vec::new()
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
        LayerCachingOrder::new().check(&ctx, &file)
    }

    #[test]
    fn flags_copy_all_before_install() {
        let source = "FROM node:20-alpine\nCOPY . /app\nRUN npm install\n";
        let findings = check_source(source);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
        assert!(findings[0].message.contains("line 3"));
    }

    #[test]
    fn accepts_manifest_first_order() {
        let source = "FROM node:20-alpine\n\
                      COPY package.json /app/\n\
                      RUN npm install\n\
                      COPY . /app\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn accepts_copy_all_without_later_install() {
        let source = "FROM node:20-alpine\nCOPY . /app\nRUN node build.js\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn stage_copy_is_not_a_context_copy() {
        let source = "FROM rust:1.75 AS builder\n\
                      FROM debian:12-slim\n\
                      COPY --from=builder . /app\n\
                      RUN apt-get update\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn reports_once_for_multiple_installs() {
        let source = "FROM node:20-alpine\n\
                      COPY . /app\n\
                      RUN npm install\n\
                      RUN pip install flask\n";
        assert_eq!(check_source(source).len(), 1);
    }
}
