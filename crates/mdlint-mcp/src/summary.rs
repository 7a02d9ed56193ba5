//! Human-readable summaries for lint and fix responses

use mdlint_core::LintIssue;

pub const NO_FILES_TO_CHECK: &str = "No markdown files to check.";
pub const NO_FILES_TO_FIX: &str = "No markdown files to fix.";
pub const ALL_PASS: &str = "All markdown files pass linting.";
pub const ALL_PASS_AFTER_FIX: &str = "All markdown files now pass linting.";
pub const ASSISTED_FIX_OFFER: &str =
    "Autofix is not available for these issues, but I can fix them myself. Would you like that?";

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Issues grouped by file, files in order of first appearance.
fn group_by_file(issues: &[LintIssue]) -> Vec<(&str, Vec<&LintIssue>)> {
    let mut groups: Vec<(&str, Vec<&LintIssue>)> = Vec::new();
    for issue in issues {
        match groups.iter_mut().find(|(file, _)| *file == issue.file) {
            Some((_, group)) => group.push(issue),
            None => groups.push((issue.file.as_str(), vec![issue])),
        }
    }
    groups
}

pub fn lint_summary(issues: &[LintIssue], auto_fixable_count: usize) -> String {
    if issues.is_empty() {
        return ALL_PASS.to_string();
    }

    let groups = group_by_file(issues);
    let mut lines = vec![
        format!(
            "Found {} in {}:",
            plural(issues.len(), "issue"),
            plural(groups.len(), "file")
        ),
        String::new(),
    ];

    for (file, file_issues) in groups {
        lines.push(format!("**{}**", file));
        for issue in file_issues {
            lines.push(format!(
                "- Line {}: {} - {}",
                issue.line, issue.rule_id, issue.message
            ));
        }
        lines.push(String::new());
    }

    if auto_fixable_count > 0 {
        let verb = if auto_fixable_count == 1 { "is" } else { "are" };
        lines.push(format!(
            "{} {} auto-fixable.",
            plural(auto_fixable_count, "issue"),
            verb
        ));
    }

    lines.join("\n")
}

pub fn fix_summary(fixed_count: i64, remaining: &[LintIssue], assisted_fix_available: bool) -> String {
    let mut lines = Vec::new();

    if fixed_count > 0 {
        let noun = if fixed_count == 1 { "issue" } else { "issues" };
        lines.push(format!("Auto-fixed {} {}.", fixed_count, noun));
    }

    if remaining.is_empty() {
        lines.push(ALL_PASS_AFTER_FIX.to_string());
    } else {
        lines.push(String::new());
        lines.push(format!("{} remaining:", plural(remaining.len(), "issue")));
        for issue in remaining {
            lines.push(format!(
                "- {}:{}: {} - {}",
                issue.file, issue.line, issue.rule_id, issue.message
            ));
        }
        if assisted_fix_available {
            lines.push(String::new());
            lines.push(ASSISTED_FIX_OFFER.to_string());
        }
    }

    lines.join("\n")
}
