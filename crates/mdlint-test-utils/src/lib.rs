//! Shared test utilities for the mdlint workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] - git repository fixtures built with `git2`
//! - [`workspace`] - [`MarkdownWorkspace`] builder for markdown trees
//! - [`fake_linter`] - [`FakeMarkdownlint`], an in-process stand-in for
//!   `npx markdownlint-cli2`

pub mod fake_linter;
pub mod git;
pub mod workspace;

pub use fake_linter::FakeMarkdownlint;
pub use workspace::MarkdownWorkspace;
