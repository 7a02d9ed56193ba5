//! Lint, fix and session logic for the markdownlint tool server
//!
//! # Architecture
//!
//! ```text
//! [ tool dispatch (mdlint-mcp) ]
//!        |
//!        +--> selection::resolve_files --> mdlint-git / mdlint-fs
//!        +--> Linter::lint / Linter::fix
//!        |        |
//!        |        +--> prerequisites::check_prerequisites
//!        |        +--> ProcessRunner (npx markdownlint-cli2 ...)
//!        |        +--> parser::parse_output
//!        +--> DeclinedIssues::filter
//! ```
//!
//! The external linter is only ever reached through [`ProcessRunner`], so
//! everything above it can be exercised without Node.js installed.

pub mod config;
pub mod error;
pub mod fixer;
pub mod issue;
pub mod linter;
pub mod parser;
pub mod prerequisites;
pub mod process;
pub mod selection;
pub mod session;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigInit, find_existing_config, init_config};
pub use error::{Error, Result};
pub use fixer::FixResult;
pub use issue::{AUTO_FIXABLE_RULES, LintIssue, is_auto_fixable};
pub use linter::{LintResult, Linter};
pub use parser::parse_output;
pub use prerequisites::{PrerequisiteError, Prerequisites, check_prerequisites};
pub use process::{ExecOutput, Invocation, ProcessRunner, TokioProcessRunner};
pub use selection::{Scope, resolve_files};
pub use session::{DeclinedIssues, DeclinedKey, FilteredIssues};
pub use settings::LinterSettings;
