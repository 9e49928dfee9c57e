//! Instruction model for parsed Dockerfiles.

use crate::types::Finding;
use serde::{Deserialize, Serialize};

/// Dockerfile instruction keyword.
///
/// Keywords are matched case-insensitively. Directives that are not part
/// of the known set are preserved as [`Opcode::Unknown`] so that rules can
/// still see them and the parser can tolerate directive evolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Opcode {
    /// `FROM` - base image for a build stage.
    From,
    /// `RUN` - execute a command in a new layer.
    Run,
    /// `CMD` - default command for the container.
    Cmd,
    /// `LABEL` - image metadata.
    Label,
    /// `EXPOSE` - documented listening port.
    Expose,
    /// `ENV` - environment variable.
    Env,
    /// `ADD` - copy files with extraction/URL support.
    Add,
    /// `COPY` - copy files from the build context or a stage.
    Copy,
    /// `ENTRYPOINT` - container entry point.
    Entrypoint,
    /// `VOLUME` - mount point declaration.
    Volume,
    /// `USER` - user for subsequent instructions and runtime.
    User,
    /// `WORKDIR` - working directory.
    Workdir,
    /// `ARG` - build-time variable.
    Arg,
    /// `ONBUILD` - deferred trigger instruction.
    Onbuild,
    /// `STOPSIGNAL` - container stop signal.
    Stopsignal,
    /// `HEALTHCHECK` - container health probe.
    Healthcheck,
    /// `SHELL` - default shell for shell-form commands.
    Shell,
    /// `MAINTAINER` - deprecated author field.
    Maintainer,
    /// Any directive outside the known set, with its raw spelling.
    Unknown(String),
}

impl Opcode {
    /// Parses a directive keyword, case-insensitively.
    #[must_use]
    pub fn parse(keyword: &str) -> Self {
        match keyword.to_ascii_uppercase().as_str() {
            "FROM" => Self::From,
            "RUN" => Self::Run,
            "CMD" => Self::Cmd,
            "LABEL" => Self::Label,
            "EXPOSE" => Self::Expose,
            "ENV" => Self::Env,
            "ADD" => Self::Add,
            "COPY" => Self::Copy,
            "ENTRYPOINT" => Self::Entrypoint,
            "VOLUME" => Self::Volume,
            "USER" => Self::User,
            "WORKDIR" => Self::Workdir,
            "ARG" => Self::Arg,
            "ONBUILD" => Self::Onbuild,
            "STOPSIGNAL" => Self::Stopsignal,
            "HEALTHCHECK" => Self::Healthcheck,
            "SHELL" => Self::Shell,
            "MAINTAINER" => Self::Maintainer,
            _ => Self::Unknown(keyword.to_string()),
        }
    }

    /// Returns true for directives outside the known set.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::From => write!(f, "FROM"),
            Self::Run => write!(f, "RUN"),
            Self::Cmd => write!(f, "CMD"),
            Self::Label => write!(f, "LABEL"),
            Self::Expose => write!(f, "EXPOSE"),
            Self::Env => write!(f, "ENV"),
            Self::Add => write!(f, "ADD"),
            Self::Copy => write!(f, "COPY"),
            Self::Entrypoint => write!(f, "ENTRYPOINT"),
            Self::Volume => write!(f, "VOLUME"),
            Self::User => write!(f, "USER"),
            Self::Workdir => write!(f, "WORKDIR"),
            Self::Arg => write!(f, "ARG"),
            Self::Onbuild => write!(f, "ONBUILD"),
            Self::Stopsignal => write!(f, "STOPSIGNAL"),
            Self::Healthcheck => write!(f, "HEALTHCHECK"),
            Self::Shell => write!(f, "SHELL"),
            Self::Maintainer => write!(f, "MAINTAINER"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// One logical build step parsed from the Dockerfile.
///
/// Immutable once parsed; rules receive instructions by shared reference
/// and may not mutate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The directive keyword.
    pub opcode: Opcode,
    /// Whitespace-delimited arguments following the keyword.
    pub arguments: Vec<String>,
    /// First physical line of the instruction (1-indexed). For
    /// continuation-merged instructions this is the line the keyword
    /// appears on.
    pub line: usize,
    /// Whether a comment line immediately precedes this instruction.
    pub documented: bool,
}

impl Instruction {
    /// Creates a new instruction.
    #[must_use]
    pub fn new(opcode: Opcode, arguments: Vec<String>, line: usize) -> Self {
        Self {
            opcode,
            arguments,
            line,
            documented: false,
        }
    }

    /// Marks this instruction as documented by a preceding comment.
    #[must_use]
    pub fn with_documented(mut self, documented: bool) -> Self {
        self.documented = documented;
        self
    }
}

/// A parsed Dockerfile: the ordered instruction sequence plus any
/// warnings produced during parsing (unknown directives).
///
/// Instruction order is document order and is semantically significant;
/// several rules depend on relative positions.
#[derive(Debug, Clone, Default)]
pub struct Dockerfile {
    /// Instructions in document order.
    pub instructions: Vec<Instruction>,
    /// Parse-time warnings, already shaped as findings.
    pub warnings: Vec<Finding>,
}

impl Dockerfile {
    /// Returns instructions with the given opcode, in document order.
    pub fn by_opcode<'a>(&'a self, opcode: &'a Opcode) -> impl Iterator<Item = &'a Instruction> {
        self.instructions
            .iter()
            .filter(move |i| &i.opcode == opcode)
    }

    /// Returns the last instruction with the given opcode, if any.
    ///
    /// Several directives are last-wins at runtime (e.g. `USER`, `CMD`),
    /// so rules usually evaluate the final occurrence.
    #[must_use]
    pub fn last_of(&self, opcode: &Opcode) -> Option<&Instruction> {
        self.instructions.iter().rev().find(|i| &i.opcode == opcode)
    }

    /// Returns true if the file contains no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
