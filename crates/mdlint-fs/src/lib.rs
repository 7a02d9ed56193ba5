//! Filesystem helpers for the markdownlint tool server
//!
//! Provides forward-slash path normalization, markdown tree enumeration
//! and create-only writes for configuration files.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod scan;

pub use constants::{EXCLUDED_DIRS, MARKDOWN_EXTENSIONS};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use scan::markdown_files;
