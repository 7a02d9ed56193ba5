//! Scripted process runner for unit tests

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::process::{ExecOutput, Invocation, ProcessRunner};

/// Replays canned outputs in order and records every invocation.
///
/// `npx --version` is answered from `launcher_exit` without consuming a
/// scripted output, so tests only script the linter calls they care about.
pub(crate) struct ScriptedRunner {
    launcher_exit: i32,
    outputs: Mutex<VecDeque<ExecOutput>>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub(crate) fn new(outputs: Vec<ExecOutput>) -> Self {
        Self {
            launcher_exit: 0,
            outputs: Mutex::new(outputs.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn without_launcher() -> Self {
        Self {
            launcher_exit: 127,
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    pub(crate) fn linter_calls(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|call| call.args.first().map(String::as_str) != Some("--version"))
            .collect()
    }
}

pub(crate) fn output(exit_code: i32, stdout: &str, stderr: &str) -> ExecOutput {
    ExecOutput {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        exit_code,
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, invocation: &Invocation) -> ExecOutput {
        self.calls.lock().push(invocation.clone());
        if invocation.args.first().map(String::as_str) == Some("--version") {
            return output(self.launcher_exit, "10.8.2\n", "");
        }
        self.outputs
            .lock()
            .pop_front()
            .unwrap_or_else(|| output(0, "", ""))
    }
}
