//! Parser for markdownlint-cli2 text diagnostics
//!
//! One diagnostic per line:
//!
//! ```text
//! <file>:<line>[:<column>] [error|warning] <MDnnn>/<rule-name> <description> [<detail>]
//! ```
//!
//! | Group | Field | Required |
//! |---|---|---|
//! | 1 | file (shortest prefix that still lets the rest match) | yes |
//! | 2 | line | yes |
//! | 3 | column | no, defaults to 1 |
//! | 4 | rule code | yes |
//! | 5 | rule name (may carry `/alias` suffixes) | yes |
//! | 6 | description | yes |
//! | 7 | detail inside the trailing `[...]` | no |
//!
//! Banner and summary lines (`markdownlint-cli2 v0.x`, `Linting: 2 file(s)`,
//! `Summary: 3 error(s)`) never match and are ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::issue::LintIssue;

static DIAGNOSTIC_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(.+?):(\d+)(?::(\d+))?\s+(?:(?:error|warning)\s+)?(MD\d+)/(\S+)\s+(.+?)(?:\s+\[(.+)\])?$",
    )
    .unwrap()
});

/// Parse combined linter output into issues, preserving output order.
pub fn parse_output(output: &str) -> Vec<LintIssue> {
    output.lines().filter_map(parse_line).collect()
}

/// Parse one diagnostic line; `None` for anything that is not a diagnostic.
pub fn parse_line(line: &str) -> Option<LintIssue> {
    let line = line.trim_end_matches('\r');
    let caps = DIAGNOSTIC_LINE.captures(line)?;

    let line_number = caps[2].parse().ok()?;
    let column = match caps.get(3) {
        Some(col) => col.as_str().parse().ok()?,
        None => 1,
    };

    Some(LintIssue::new(
        &caps[1],
        line_number,
        column,
        &caps[4],
        &caps[5],
        &caps[6],
        caps.get(7).map(|m| m.as_str()),
    ))
}
