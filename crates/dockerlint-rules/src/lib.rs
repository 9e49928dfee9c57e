//! # dockerlint-rules
//!
//! Built-in best-practice rules for dockerlint.
//!
//! One rule per documented guideline, each an independent check over the
//! full instruction sequence.
//!
//! ## Available Rules
//!
//! | Code | Name | Severity | Description |
//! |------|------|----------|-------------|
//! | DL001 | `explicit-tag` | error | Requires a non-latest tag or digest on FROM images |
//! | DL002 | `minimal-base-image` | warning | Prefers slim variants for denylisted base images |
//! | DL003 | `layer-caching-order` | warning | Whole-context COPY before a dependency install |
//! | DL004 | `consolidate-run` | warning | Consecutive package-manager RUN layers |
//! | DL005 | `cleanup-artifacts` | warning | Artifact removed in a later layer than its download |
//! | DL006 | `specific-copy` | warning | COPY with the whole context as source |
//! | DL007 | `non-root-user` | error | Missing or root-effective USER |
//! | DL008 | `env-no-secrets` | error | Literal secret values in ENV |
//! | DL009 | `documented` | info | Comment coverage below threshold |
//! | DL010 | `dockerignore-present` | warning | No .dockerignore next to the build file |
//! | DL011 | `has-test-step` | info | No test-runner RUN before the final CMD/ENTRYPOINT |
//!
//! ## Usage
//!
//! ```ignore
//! use dockerlint_core::Engine;
//! use dockerlint_rules::recommended_rules;
//!
//! let engine = Engine::builder().rules(recommended_rules()).build();
//! let report = engine.run(&ctx, &dockerfile);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cleanup_artifacts;
mod consolidate_run;
mod documented;
mod dockerignore_present;
mod env_no_secrets;
mod explicit_tag;
mod has_test_step;
mod layer_caching_order;
mod minimal_base_image;
mod non_root_user;
mod presets;
mod shell;
mod specific_copy;

pub use cleanup_artifacts::CleanupArtifacts;
pub use consolidate_run::ConsolidateRun;
pub use documented::Documented;
pub use dockerignore_present::DockerignorePresent;
pub use env_no_secrets::EnvNoSecrets;
pub use explicit_tag::ExplicitTag;
pub use has_test_step::HasTestStep;
pub use layer_caching_order::LayerCachingOrder;
pub use minimal_base_image::MinimalBaseImage;
pub use non_root_user::NonRootUser;
pub use presets::{all_rules, configured_rules, minimal_rules, recommended_rules, Preset};
pub use specific_copy::SpecificCopy;

/// Re-export core types for convenience.
pub use dockerlint_core::{Finding, Rule, Severity};
