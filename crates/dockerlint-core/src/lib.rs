//! # dockerlint-core
//!
//! Core framework for Dockerfile linting.
//!
//! This crate provides the foundational types for building Dockerfile
//! lint tools:
//!
//! - [`parse`] for turning raw build-file text into a [`Dockerfile`]
//! - [`Rule`] trait for independent checks over the instruction sequence
//! - [`Engine`] for orchestrating rule execution with fault isolation
//! - [`Finding`] and [`AnalysisReport`] for representing results
//!
//! ## Example
//!
//! ```ignore
//! use dockerlint_core::{parse, Engine, OsFileSystem, SourceContext};
//!
//! let file = parse(&content)?;
//! let fs = OsFileSystem;
//! let ctx = SourceContext::new(path, &content, &fs);
//! let engine = Engine::builder().rules(my_rules).build();
//! let report = engine.run(&ctx, &file);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod engine;
mod image;
mod instruction;
mod parser;
mod rule;
mod types;

pub use config::{Config, ConfigError, LinterConfig, RuleConfig};
pub use context::{FileSystem, MemoryFileSystem, OsFileSystem, SourceContext};
pub use engine::{Engine, EngineBuilder};
pub use image::{parse_from, FromDetails, ImageRef};
pub use instruction::{Dockerfile, Instruction, Opcode};
pub use parser::{parse, ParseError, UNKNOWN_INSTRUCTION_CODE, UNKNOWN_INSTRUCTION_NAME};
pub use rule::{Rule, RuleBox};
pub use types::{AnalysisReport, Finding, Severity, Status, Suggestion};
