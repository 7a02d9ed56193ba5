//! Session-scoped declined issues
//!
//! A declined issue stays hidden from lint and fix responses until the
//! set is cleared or the process exits. Nothing is persisted.

use std::collections::HashSet;
use std::fmt;

use parking_lot::Mutex;

use crate::issue::LintIssue;

/// Identity of an issue for suppression: `file:line:ruleId`.
///
/// Column, message and description are deliberately not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclinedKey(String);

impl DeclinedKey {
    pub fn new(file: &str, line: u64, rule_id: &str) -> Self {
        Self(format!("{}:{}:{}", file, line, rule_id))
    }

    pub fn for_issue(issue: &LintIssue) -> Self {
        Self::new(&issue.file, u64::from(issue.line), &issue.rule_id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclinedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DeclinedKey> for String {
    fn from(key: DeclinedKey) -> Self {
        key.0
    }
}

/// An issue list with declined entries removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredIssues {
    pub visible: Vec<LintIssue>,
    /// Count before filtering
    pub total: usize,
    /// `total - visible.len()`
    pub hidden: usize,
}

#[derive(Debug, Default)]
struct Declined {
    order: Vec<DeclinedKey>,
    members: HashSet<DeclinedKey>,
}

/// The process-wide declined set.
///
/// Every operation takes the lock once and releases it before returning,
/// so concurrent tool calls see each mutation as a single step.
#[derive(Debug, Default)]
pub struct DeclinedIssues {
    inner: Mutex<Declined>,
}

impl DeclinedIssues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. Returns the set size afterwards.
    pub fn decline(&self, key: DeclinedKey) -> usize {
        let mut inner = self.inner.lock();
        if inner.members.insert(key.clone()) {
            tracing::info!(key = %key, "Declined issue");
            inner.order.push(key);
        }
        inner.order.len()
    }

    /// Snapshot of the keys in insertion order.
    pub fn list(&self) -> Vec<DeclinedKey> {
        self.inner.lock().order.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &DeclinedKey) -> bool {
        self.inner.lock().members.contains(key)
    }

    /// Empty the set. Returns how many keys it held.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let previous = inner.order.len();
        inner.order.clear();
        inner.members.clear();
        tracing::info!(cleared = previous, "Cleared declined issues");
        previous
    }

    /// Drop every issue whose key is declined. Never mutates the set.
    pub fn filter(&self, issues: Vec<LintIssue>) -> FilteredIssues {
        let total = issues.len();
        let visible: Vec<LintIssue> = {
            let inner = self.inner.lock();
            if inner.members.is_empty() {
                issues
            } else {
                issues
                    .into_iter()
                    .filter(|issue| !inner.members.contains(&DeclinedKey::for_issue(issue)))
                    .collect()
            }
        };
        let hidden = total - visible.len();
        FilteredIssues {
            visible,
            total,
            hidden,
        }
    }
}
