//! External process execution
//!
//! The narrow boundary between this crate and every subprocess it runs:
//! `(program, args, cwd, timeout) -> (stdout, stderr, exit code)`.
//! Runners never fail; spawn errors and timeouts are folded into the
//! exit code so callers classify every outcome the same way.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

/// Exit code reported when the process was killed by a signal.
pub const EXIT_SIGNALED: i32 = 1;
/// Exit code reported when the process did not finish within its timeout.
pub const EXIT_TIMED_OUT: i32 = 124;
/// Exit code reported when the program exists but cannot be executed.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
/// Exit code reported when the program cannot be found.
pub const EXIT_NOT_FOUND: i32 = 127;

/// A single command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `program arg1 arg2 ...`, for logs and error messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished (or abandoned) process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    fn spawn_failure(invocation: &Invocation, err: &std::io::Error) -> Self {
        let exit_code = match err.kind() {
            ErrorKind::NotFound => EXIT_NOT_FOUND,
            ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
            _ => EXIT_SIGNALED,
        };
        Self {
            stdout: String::new(),
            stderr: format!("failed to run {}: {}", invocation.program, err),
            exit_code,
        }
    }

    fn timed_out(invocation: &Invocation, limit: Duration) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!(
                "{} timed out after {}s",
                invocation.command_line(),
                limit.as_secs()
            ),
            exit_code: EXIT_TIMED_OUT,
        }
    }
}

/// Runs external commands.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> ExecOutput;
}

/// [`ProcessRunner`] backed by `tokio::process`.
///
/// Output is fully buffered. On timeout the child is killed (it is spawned
/// with `kill_on_drop`) and whatever it printed is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, invocation: &Invocation) -> ExecOutput {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!(command = %invocation.command_line(), "Spawning process");

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!(program = %invocation.program, error = %e, "Spawn failed");
                return ExecOutput::spawn_failure(invocation, &e);
            }
        };

        let wait = child.wait_with_output();
        let result = match invocation.timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        command = %invocation.command_line(),
                        timeout_secs = limit.as_secs(),
                        "Process timed out"
                    );
                    return ExecOutput::timed_out(invocation, limit);
                }
            },
            None => wait.await,
        };

        match result {
            Ok(output) => ExecOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code().unwrap_or(EXIT_SIGNALED),
            },
            Err(e) => ExecOutput::spawn_failure(invocation, &e),
        }
    }
}
