//! Starter markdownlint configuration

use std::path::Path;

use mdlint_fs::NormalizedPath;

use crate::error::Result;

/// Config filenames recognised by markdownlint-cli2, in lookup order.
pub const CONFIG_CANDIDATES: &[&str] = &[
    ".markdownlint.jsonc",
    ".markdownlint.json",
    ".markdownlint.yaml",
    ".markdownlint.yml",
    ".markdownlintrc",
];

/// File written by [`init_config`].
pub const CANONICAL_CONFIG: &str = ".markdownlint.jsonc";

/// Default rule set written by [`init_config`].
pub const STARTER_CONFIG: &str = r#"// markdownlint starter config v1
// Rules: https://github.com/DavidAnson/markdownlint/blob/main/doc/Rules.md
{
  // Enable every rule, then relax the noisy ones below
  "default": true,

  // Line length: prose wraps freely, code and tables are exempt
  "MD013": {
    "line_length": 120,
    "code_blocks": false,
    "tables": false
  },

  // Repeated headings are fine under different parents (changelogs)
  "MD024": {
    "siblings_only": true
  },

  // Allow the inline HTML commonly found in READMEs
  "MD033": {
    "allowed_elements": ["br", "details", "summary", "img", "kbd", "sup", "sub"]
  },

  // Files may start with front matter or a badge line
  "MD041": false
}
"#;

/// Outcome of [`init_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigInit {
    Created { path: NormalizedPath },
    Existing { path: NormalizedPath },
}

impl ConfigInit {
    pub fn created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    pub fn path(&self) -> &NormalizedPath {
        match self {
            Self::Created { path } | Self::Existing { path } => path,
        }
    }
}

/// First existing config file in `dir`, by [`CONFIG_CANDIDATES`] order.
pub fn find_existing_config(dir: &Path) -> Option<NormalizedPath> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .map(NormalizedPath::new)
}

/// Write [`STARTER_CONFIG`] unless any candidate config already exists.
///
/// Existing files are never replaced. A config that appears between the
/// lookup and the write is reported as existing.
pub fn init_config(dir: &Path) -> Result<ConfigInit> {
    if let Some(path) = find_existing_config(dir) {
        tracing::info!(path = %path, "Markdownlint config already present");
        return Ok(ConfigInit::Existing { path });
    }

    let path = NormalizedPath::new(dir.join(CANONICAL_CONFIG));
    match mdlint_fs::io::write_new_text(&path, STARTER_CONFIG) {
        Ok(()) => {
            tracing::info!(path = %path, "Created starter markdownlint config");
            Ok(ConfigInit::Created { path })
        }
        Err(mdlint_fs::Error::AlreadyExists { .. }) => Ok(ConfigInit::Existing { path }),
        Err(e) => Err(e.into()),
    }
}
