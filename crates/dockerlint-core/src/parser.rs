//! Line-oriented Dockerfile parser.
//!
//! Converts raw build-file text into an ordered [`Dockerfile`] of typed
//! instructions. Line continuations (`\` at end of line) are merged into
//! one logical instruction recorded at the first physical line. Comments
//! and blank lines are skipped and never become instructions, but a
//! comment directly above an instruction marks it as documented.
//!
//! Unknown directives are tolerated: they parse as [`Opcode::Unknown`]
//! and produce a warning-level finding instead of a hard failure, so the
//! parser keeps working as the directive set evolves.

use crate::instruction::{Dockerfile, Instruction, Opcode};
use crate::types::{Finding, Severity};
use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

/// Rule code attached to parse-time warnings.
pub const UNKNOWN_INSTRUCTION_CODE: &str = "DL000";

/// Rule name attached to parse-time warnings.
pub const UNKNOWN_INSTRUCTION_NAME: &str = "unknown-instruction";

/// Errors produced when the input is malformed.
///
/// Parse errors abort the analysis; there is nothing to retry since the
/// input is static text.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// The file ends while a line continuation is still open.
    #[error("unterminated line continuation starting at line {line}")]
    #[diagnostic(
        code(dockerlint::parse::unterminated_continuation),
        help("remove the trailing `\\` or add the continued line")
    )]
    UnterminatedContinuation {
        /// First physical line of the unfinished instruction.
        line: usize,
    },

    /// A logical line contains no directive keyword.
    #[error("instruction at line {line} has no directive keyword")]
    #[diagnostic(
        code(dockerlint::parse::empty_instruction),
        help("every instruction must start with a directive such as FROM or RUN")
    )]
    EmptyInstruction {
        /// Line of the empty instruction.
        line: usize,
    },
}

/// Parses Dockerfile text into an instruction sequence.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the offending line when a line
/// continuation is left open at end of input or a logical line has no
/// directive keyword.
pub fn parse(source: &str) -> Result<Dockerfile, ParseError> {
    let mut file = Dockerfile::default();

    let mut buffer = String::new();
    let mut start_line = 0usize;
    let mut continuing = false;
    let mut preceded_by_comment = false;

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = raw_line.trim();

        if !continuing {
            if trimmed.is_empty() {
                preceded_by_comment = false;
                continue;
            }
            if trimmed.starts_with('#') {
                preceded_by_comment = true;
                continue;
            }
            start_line = line_number;
        } else if trimmed.starts_with('#') {
            // Comments are legal between continued lines and are dropped.
            continue;
        }

        let (content, has_continuation) = match trimmed.strip_suffix('\\') {
            Some(rest) => (rest.trim_end(), true),
            None => (trimmed, false),
        };

        if !buffer.is_empty() && !content.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(content);

        if has_continuation {
            continuing = true;
            continue;
        }

        finish_instruction(&mut file, &buffer, start_line, preceded_by_comment)?;
        buffer.clear();
        continuing = false;
        preceded_by_comment = false;
    }

    if continuing {
        return Err(ParseError::UnterminatedContinuation { line: start_line });
    }

    debug!(
        instructions = file.instructions.len(),
        warnings = file.warnings.len(),
        "parsed dockerfile"
    );

    Ok(file)
}

/// Tokenizes one complete logical line into an [`Instruction`].
fn finish_instruction(
    file: &mut Dockerfile,
    logical_line: &str,
    line: usize,
    documented: bool,
) -> Result<(), ParseError> {
    let mut tokens = logical_line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Err(ParseError::EmptyInstruction { line });
    };

    let opcode = Opcode::parse(keyword);
    if opcode.is_unknown() {
        file.warnings.push(Finding::new(
            UNKNOWN_INSTRUCTION_CODE,
            UNKNOWN_INSTRUCTION_NAME,
            Severity::Warning,
            line,
            format!("unknown instruction `{keyword}`"),
        ));
    }

    let arguments = tokens.map(ToString::to_string).collect();
    file.instructions
        .push(Instruction::new(opcode, arguments, line).with_documented(documented));

    Ok(())
}
