use async_trait::async_trait;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command as TokioCommand;
use tokio::sync::watch;

use crate::tasks::types::Invocation;

#[cfg(unix)]
const SIGINT: i32 = 2;

/// How a started command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failed(i32),
    /// Ctrl+C arrived while the command was running
    Interrupted,
}

/// Abstraction for command execution to enable testing without real commands
#[async_trait]
pub trait CommandRunner {
    /// Run a command to completion.
    ///
    /// Returns `Err` only when the program could not be started.
    async fn run(&self, invocation: &Invocation) -> io::Result<RunStatus>;
}

/// Runs commands as child processes sharing this process's stdio
pub struct RealCommandRunner {
    interrupts: watch::Receiver<bool>,
}

impl RealCommandRunner {
    /// Create a runner that listens for Ctrl+C for the rest of the run.
    ///
    /// Must be called inside a tokio runtime. Installing the listener once
    /// means an interrupt that lands between two steps is still seen.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(true);
            }
        });
        Self::with_interrupts(rx)
    }

    /// Create a runner driven by an existing interrupt flag
    pub fn with_interrupts(interrupts: watch::Receiver<bool>) -> Self {
        Self { interrupts }
    }

    fn interrupted(&self) -> bool {
        *self.interrupts.borrow()
    }
}

#[async_trait]
impl CommandRunner for RealCommandRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<RunStatus> {
        if self.interrupted() {
            return Ok(RunStatus::Interrupted);
        }

        let mut child = TokioCommand::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        let mut interrupts = self.interrupts.clone();
        let status = tokio::select! {
            status = child.wait() => status?,
            Ok(()) = interrupts.changed() => {
                // The child shares our process group and got the signal too
                tracing::warn!(command = %invocation.redacted(), "interrupt received, waiting for command to exit");
                let _ = child.wait().await;
                return Ok(RunStatus::Interrupted);
            }
        };

        // The child may exit on the same SIGINT before the listener wakes up
        if self.interrupted() {
            return Ok(RunStatus::Interrupted);
        }
        Ok(status_from_exit(status))
    }
}

fn status_from_exit(status: ExitStatus) -> RunStatus {
    if status.success() {
        return RunStatus::Success;
    }
    match status.code() {
        Some(code) => RunStatus::Failed(code),
        None if killed_by_interrupt(status) => RunStatus::Interrupted,
        None => RunStatus::Failed(signal_exit_code(status)),
    }
}

#[cfg(unix)]
fn killed_by_interrupt(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: ExitStatus) -> bool {
    false
}

#[cfg(unix)]
fn signal_exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|sig| 128 + sig).unwrap_or(1)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: ExitStatus) -> i32 {
    1
}

/// Accepts every command without running it; the dispatcher's echo is the output
pub struct DryRunCommandRunner;

#[async_trait]
impl CommandRunner for DryRunCommandRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<RunStatus> {
        tracing::debug!(command = %invocation.redacted(), "dry run, not executed");
        Ok(RunStatus::Success)
    }
}

/// Test runner that records command lines and answers from a script
#[cfg(test)]
pub struct ScriptedCommandRunner {
    responses: std::collections::HashMap<String, ScriptedResponse>,
    issued: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub enum ScriptedResponse {
    Exit(i32),
    NotFound,
    Interrupt,
}

#[cfg(test)]
impl ScriptedCommandRunner {
    /// Every command succeeds unless scripted otherwise
    pub fn new() -> Self {
        Self {
            responses: std::collections::HashMap::new(),
            issued: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Script the response for an exact command line
    pub fn respond(mut self, command_line: &str, response: ScriptedResponse) -> Self {
        self.responses.insert(command_line.to_string(), response);
        self
    }

    /// Command lines issued so far, secrets included
    pub fn issued(&self) -> Vec<String> {
        self.issued.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandRunner for ScriptedCommandRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<RunStatus> {
        let line = invocation.to_string();
        self.issued.lock().unwrap().push(line.clone());
        match self.responses.get(&line) {
            None | Some(ScriptedResponse::Exit(0)) => Ok(RunStatus::Success),
            Some(ScriptedResponse::Exit(code)) => Ok(RunStatus::Failed(*code)),
            Some(ScriptedResponse::NotFound) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: command not found", invocation.program),
            )),
            Some(ScriptedResponse::Interrupt) => Ok(RunStatus::Interrupted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_real_runner_reports_success() {
        let status = RealCommandRunner::new()
            .run(&Invocation::new("true", Vec::<String>::new()))
            .await
            .unwrap();
        assert_eq!(status, RunStatus::Success);
    }

    #[tokio::test]
    async fn test_real_runner_propagates_exit_code() {
        let status = RealCommandRunner::new()
            .run(&Invocation::new("sh", ["-c", "exit 3"]))
            .await
            .unwrap();
        assert_eq!(status, RunStatus::Failed(3));
    }

    #[tokio::test]
    async fn test_real_runner_missing_program() {
        let result = RealCommandRunner::new()
            .run(&Invocation::new(
                "openrecall-db-no-such-program",
                Vec::<String>::new(),
            ))
            .await;
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_killed_by_sigint_is_interrupted() {
        // Every run, regardless of which side of the race wins
        for _ in 0..10 {
            let status = RealCommandRunner::new()
                .run(&Invocation::new("sh", ["-c", "kill -INT $$; sleep 1"]))
                .await
                .unwrap();
            assert_eq!(status, RunStatus::Interrupted);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_other_signals_keep_shell_exit_code() {
        let status = RealCommandRunner::new()
            .run(&Invocation::new("sh", ["-c", "kill -TERM $$; sleep 1"]))
            .await
            .unwrap();
        assert_eq!(status, RunStatus::Failed(143));
    }

    #[tokio::test]
    async fn test_interrupt_between_steps_skips_next_command() {
        let (tx, rx) = watch::channel(false);
        let runner = RealCommandRunner::with_interrupts(rx);
        tx.send(true).unwrap();

        let status = runner
            .run(&Invocation::new("sh", ["-c", "exit 0"]))
            .await
            .unwrap();
        assert_eq!(status, RunStatus::Interrupted);
    }

    #[tokio::test]
    async fn test_interrupt_during_command_is_reported() {
        let (tx, rx) = watch::channel(false);
        let runner = RealCommandRunner::with_interrupts(rx);
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            let _ = tx.send(true);
        });

        let status = runner
            .run(&Invocation::new("sh", ["-c", "sleep 0.3; exit 1"]))
            .await
            .unwrap();
        assert_eq!(status, RunStatus::Interrupted);
    }

    #[tokio::test]
    async fn test_dry_run_never_fails() {
        let status = DryRunCommandRunner
            .run(&Invocation::new("docker", ["rmi", "openrecall-db"]))
            .await
            .unwrap();
        assert_eq!(status, RunStatus::Success);
    }

    #[tokio::test]
    async fn test_scripted_runner_records_lines() {
        let runner = ScriptedCommandRunner::new()
            .respond("docker stop db", ScriptedResponse::Exit(1));
        let status = runner
            .run(&Invocation::new("docker", ["stop", "db"]))
            .await
            .unwrap();
        assert_eq!(status, RunStatus::Failed(1));
        assert_eq!(runner.issued(), vec!["docker stop db"]);
    }
}
