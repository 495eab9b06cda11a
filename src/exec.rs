//! Process execution boundary for package-manager commands.
//!
//! All adapter shell-outs go through the [`Executor`] trait so that tests can
//! substitute a scripted implementation and never spawn real processes.

use anyhow::{Context, Result, bail};
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Command executor abstraction (for testing or real system calls).
pub trait Executor: Send + Sync {
    /// Run a command and return its output. Fails if the command exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exits non-zero.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command, allowing failure (returns the result without bailing).
    ///
    /// # Errors
    ///
    /// Returns an error only if the command cannot be spawned at all.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes via [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let result = self.run_unchecked(program, args)?;
        if !result.success {
            bail!(
                "{program} failed (exit {}): {}",
                result.code.unwrap_or(-1),
                result.stderr.trim()
            );
        }
        Ok(result)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Scripted executor shared by adapter unit tests.
///
/// Returns a canned result for every invocation and records each call as a
/// `(program, args)` pair so tests can assert exact command lines.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use anyhow::{Result, bail};

    use super::{ExecResult, Executor};

    #[derive(Debug, Default)]
    pub struct ScriptedExecutor {
        succeed: bool,
        on_path: bool,
        stdout: String,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ScriptedExecutor {
        /// Every command succeeds with the given stdout.
        pub fn ok(stdout: &str) -> Self {
            Self {
                succeed: true,
                on_path: true,
                stdout: stdout.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Every command exits non-zero with empty output.
        pub fn fail() -> Self {
            Self {
                succeed: false,
                on_path: true,
                stdout: String::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// No program resolves on PATH; commands would still succeed if run.
        pub fn missing_tool() -> Self {
            Self {
                on_path: false,
                ..Self::ok("")
            }
        }

        pub fn recorded_calls(&self) -> Vec<(String, Vec<String>)> {
            self.calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }

        fn record(&self, program: &str, args: &[&str]) {
            self.calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push((
                    program.to_string(),
                    args.iter().map(|s| (*s).to_string()).collect(),
                ));
        }
    }

    impl Executor for ScriptedExecutor {
        fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
            self.record(program, args);
            if !self.succeed {
                bail!("{program} failed (exit 1): simulated failure");
            }
            Ok(ExecResult {
                stdout: self.stdout.clone(),
                stderr: String::new(),
                success: true,
                code: Some(0),
            })
        }

        fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
            self.record(program, args);
            Ok(ExecResult {
                stdout: self.stdout.clone(),
                stderr: String::new(),
                success: self.succeed,
                code: Some(i32::from(!self.succeed)),
            })
        }

        fn which(&self, _: &str) -> bool {
            self.on_path
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Helper: run a simple echo command cross-platform.
    fn echo_result(msg: &str) -> Result<ExecResult> {
        #[cfg(windows)]
        {
            SystemExecutor.run("cmd", &["/C", "echo", msg])
        }
        #[cfg(not(windows))]
        {
            SystemExecutor.run("echo", &[msg])
        }
    }

    #[test]
    fn run_echo() {
        let result = echo_result("hello").unwrap();
        assert!(result.success, "echo command should succeed");
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn run_failure() {
        #[cfg(windows)]
        let result = SystemExecutor.run("cmd", &["/C", "exit", "1"]);
        #[cfg(not(windows))]
        let result = SystemExecutor.run("false", &[]);
        assert!(result.is_err(), "non-zero exit should produce an error");
    }

    #[test]
    fn run_unchecked_failure() {
        #[cfg(windows)]
        let result = SystemExecutor.run_unchecked("cmd", &["/C", "exit", "1"]).unwrap();
        #[cfg(not(windows))]
        let result = SystemExecutor.run_unchecked("false", &[]).unwrap();
        assert!(!result.success, "non-zero exit should set success=false");
    }

    #[test]
    fn run_unchecked_missing_program_is_error() {
        let result = SystemExecutor.run_unchecked("this-program-does-not-exist-12345", &[]);
        assert!(result.is_err(), "spawn failure should be an error");
    }

    #[test]
    fn which_missing_program() {
        assert!(
            !SystemExecutor.which("this-program-does-not-exist-12345"),
            "non-existent program should not be found"
        );
    }

    #[test]
    fn scripted_executor_records_calls() {
        let exec = testing::ScriptedExecutor::ok("out");
        exec.run("brew", &["install", "jq"]).unwrap();
        let calls = exec.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "brew");
        assert_eq!(calls[0].1, vec!["install", "jq"]);
    }
}
