//! In-process stand-in for `npx markdownlint-cli2`.
//!
//! Implements three rules with the real tool's output format:
//!
//! | Rule  | Name                | Fixable |
//! |-------|---------------------|---------|
//! | MD001 | heading-increment   | no      |
//! | MD009 | no-trailing-spaces  | yes     |
//! | MD012 | no-multiple-blanks  | yes     |
//!
//! Diagnostics go to stderr, a banner to stdout, and the exit code is 1
//! when anything was reported. `--fix` rewrites files on disk and then
//! reports what is left, like the real tool.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use mdlint_core::{ExecOutput, Invocation, ProcessRunner};
use parking_lot::Mutex;

/// Fake launcher + linter that records every invocation.
pub struct FakeMarkdownlint {
    launcher_available: bool,
    calls: Mutex<Vec<Invocation>>,
}

impl Default for FakeMarkdownlint {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeMarkdownlint {
    pub fn new() -> Self {
        Self {
            launcher_available: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A runner on a machine without Node.js: every spawn exits 127.
    pub fn without_npx() -> Self {
        Self {
            launcher_available: false,
            ..Self::new()
        }
    }

    /// Every invocation, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    /// Invocations other than the `--version` probe.
    pub fn linter_calls(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|call| !is_version_probe(call))
            .collect()
    }

    /// Number of `--fix` invocations.
    pub fn fix_calls(&self) -> usize {
        self.linter_calls()
            .iter()
            .filter(|call| call.args.iter().any(|arg| arg == "--fix"))
            .count()
    }
}

fn is_version_probe(invocation: &Invocation) -> bool {
    invocation.args.first().map(String::as_str) == Some("--version")
}

fn not_found(invocation: &Invocation) -> ExecOutput {
    ExecOutput {
        stdout: String::new(),
        stderr: format!(
            "failed to run {}: No such file or directory (os error 2)",
            invocation.program
        ),
        exit_code: 127,
    }
}

#[async_trait]
impl ProcessRunner for FakeMarkdownlint {
    async fn run(&self, invocation: &Invocation) -> ExecOutput {
        self.calls.lock().push(invocation.clone());

        if !self.launcher_available {
            return not_found(invocation);
        }
        if is_version_probe(invocation) {
            return ExecOutput {
                stdout: "10.8.2\n".to_string(),
                ..ExecOutput::default()
            };
        }

        let cwd = invocation.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut fix = false;
        let mut files = Vec::new();
        // First argument is the linter package
        for arg in invocation.args.iter().skip(1) {
            if arg == "--fix" {
                fix = true;
            } else {
                files.push(arg.as_str());
            }
        }

        let mut diagnostics = Vec::new();
        for file in &files {
            let path = cwd.join(file);
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            let content = if fix {
                let fixed = fix_text(&content);
                if fixed != content {
                    fs::write(&path, &fixed)
                        .unwrap_or_else(|e| panic!("FakeMarkdownlint: failed to write {file}: {e}"));
                }
                fixed
            } else {
                content
            };
            diagnostics.extend(lint_text(file, &content));
        }

        ExecOutput {
            stdout: format!(
                "markdownlint-cli2 v0.17.2 (markdownlint v0.37.4)\nFinding: {}\nLinting: {} file(s)\nSummary: {} error(s)\n",
                files.join(" "),
                files.len(),
                diagnostics.len()
            ),
            stderr: diagnostics.iter().map(|d| format!("{d}\n")).collect(),
            exit_code: if diagnostics.is_empty() { 0 } else { 1 },
        }
    }
}

/// Trailing whitespace count, ignoring the two-space line break.
fn trailing_whitespace(line: &str) -> (usize, usize) {
    let kept = line.trim_end_matches([' ', '\t']).len();
    (kept, line.len() - kept)
}

fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|c| *c == '#').count();
    let rest = &line[level..];
    ((1..=6).contains(&level) && (rest.is_empty() || rest.starts_with(' '))).then_some(level)
}

/// Diagnostics for `content`, formatted as markdownlint-cli2 prints them.
pub fn lint_text(file: &str, content: &str) -> Vec<String> {
    let mut diagnostics = Vec::new();
    let mut previous_level: Option<usize> = None;
    let mut blank_run = 0;
    let mut in_fence = false;

    for (idx, line) in content.lines().enumerate() {
        let number = idx + 1;

        let (kept, trailing) = trailing_whitespace(line);
        if trailing > 0 && trailing != 2 {
            diagnostics.push(format!(
                "{file}:{number}:{} MD009/no-trailing-spaces Trailing spaces [Expected: 0 or 2; Actual: {trailing}]",
                kept + 1
            ));
        }

        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run >= 2 {
                diagnostics.push(format!(
                    "{file}:{number} MD012/no-multiple-blanks Multiple consecutive blank lines [Expected: 1; Actual: {blank_run}]"
                ));
            }
            continue;
        }
        blank_run = 0;

        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(level) = heading_level(line) {
            if let Some(previous) = previous_level
                && level > previous + 1
            {
                diagnostics.push(format!(
                    "{file}:{number} MD001/heading-increment Heading levels should only increment by one level at a time [Expected: h{}; Actual: h{level}]",
                    previous + 1
                ));
            }
            previous_level = Some(level);
        }
    }

    diagnostics
}

/// Apply the MD009 and MD012 fixes.
pub fn fix_text(content: &str) -> String {
    let mut lines = Vec::new();
    let mut blank_run = 0;

    for line in content.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run < 2 {
                lines.push(String::new());
            }
            continue;
        }
        blank_run = 0;

        let (kept, trailing) = trailing_whitespace(line);
        if trailing == 2 {
            lines.push(line.to_string());
        } else {
            lines.push(line[..kept].to_string());
        }
    }

    let mut fixed = lines.join("\n");
    if content.ends_with('\n') {
        fixed.push('\n');
    }
    fixed
}
