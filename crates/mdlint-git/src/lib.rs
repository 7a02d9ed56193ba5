//! Git change discovery for the markdownlint tool server
//!
//! Answers a single question for file selection: which markdown files in
//! the working tree are staged, modified or untracked right now.

pub mod changes;
pub mod error;

pub use changes::changed_markdown_files;
pub use error::{Error, Result};
