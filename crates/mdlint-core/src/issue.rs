//! Lint issue data model

use serde::{Deserialize, Serialize};

/// Rules that `markdownlint-cli2 --fix` can correct mechanically.
///
/// Asserted rather than queried from the linter: if a linter upgrade
/// changes its fixable set, this list has to be updated by hand.
pub const AUTO_FIXABLE_RULES: &[&str] = &[
    "MD003", "MD004", "MD005", "MD007", "MD009", "MD010", "MD012", "MD022", "MD023", "MD027",
    "MD030", "MD031", "MD032", "MD034", "MD037", "MD038", "MD039", "MD044", "MD047", "MD049",
    "MD050", "MD051", "MD053", "MD054",
];

/// Whether the external fixer can correct `rule_id` on its own.
pub fn is_auto_fixable(rule_id: &str) -> bool {
    AUTO_FIXABLE_RULES.contains(&rule_id)
}

/// A single rule violation reported by the linter.
///
/// Built fresh from every parse of linter output and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintIssue {
    /// File path exactly as the linter reported it
    pub file: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column; 1 when the linter omits it
    pub column: u32,
    /// Rule code, e.g. `MD009`
    pub rule_id: String,
    /// `<rule-name>: <description>`
    pub rule_description: String,
    /// Bracketed detail when present, otherwise the description
    pub message: String,
    /// Membership of `rule_id` in [`AUTO_FIXABLE_RULES`]
    pub fixable: bool,
}

impl LintIssue {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        column: u32,
        rule_id: impl Into<String>,
        rule_name: &str,
        description: &str,
        detail: Option<&str>,
    ) -> Self {
        let rule_id = rule_id.into();
        let fixable = is_auto_fixable(&rule_id);
        Self {
            file: file.into(),
            line,
            column,
            rule_description: format!("{}: {}", rule_name, description),
            message: detail.unwrap_or(description).to_string(),
            rule_id,
            fixable,
        }
    }
}
