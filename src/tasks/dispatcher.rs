use super::error::{TaskError, TaskResult};
use super::plan::steps_for;
use super::types::{FailurePolicy, Step, Target};
use crate::config::TaskConfig;
use crate::display::{Terminal, format_status, format_target_header};
use crate::system::{CommandRunner, RunStatus};

/// Runs target recipes one step at a time through a command runner
pub struct TaskDispatcher<R: CommandRunner> {
    runner: R,
    config: TaskConfig,
    terminal: Terminal,
}

impl<R: CommandRunner> TaskDispatcher<R> {
    pub fn new(runner: R, config: TaskConfig) -> Self {
        Self::with_terminal(runner, config, Terminal::new())
    }

    pub fn with_terminal(runner: R, config: TaskConfig, terminal: Terminal) -> Self {
        Self {
            runner,
            config,
            terminal,
        }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run targets in order, stopping at the first propagated failure
    pub async fn run_targets(&self, targets: &[Target]) -> TaskResult<()> {
        for &target in targets {
            self.run_target(target).await?;
        }
        Ok(())
    }

    pub async fn run_target(&self, target: Target) -> TaskResult<()> {
        let steps = steps_for(target, &self.config);
        println!(
            "{}",
            self.terminal.header_line(&format_target_header(
                target.name(),
                steps.len(),
                chrono::Local::now()
            ))
        );
        tracing::info!(%target, steps = steps.len(), "running target");

        self.run_steps(&steps).await?;

        tracing::info!(%target, "target finished");
        Ok(())
    }

    /// Execute steps sequentially honoring each step's failure policy
    pub async fn run_steps(&self, steps: &[Step]) -> TaskResult<()> {
        for step in steps {
            self.run_step(step).await?;
        }
        Ok(())
    }

    async fn run_step(&self, step: &Step) -> TaskResult<()> {
        let echoed = step.invocation.redacted();
        println!("{}", self.terminal.command_line(&echoed));

        let (description, error) = match self.runner.run(&step.invocation).await {
            Ok(RunStatus::Success) => {
                tracing::debug!(command = %echoed, "step succeeded");
                return Ok(());
            }
            // Never swallowed, even for best-effort steps
            Ok(RunStatus::Interrupted) => {
                return Err(TaskError::Interrupted { command: echoed });
            }
            Ok(status @ RunStatus::Failed(code)) => (
                format_status(status),
                TaskError::StepFailed {
                    command: echoed.clone(),
                    code,
                },
            ),
            Err(source) => (
                format!("could not start: {}", source),
                TaskError::Spawn {
                    program: step.invocation.program.clone(),
                    source,
                },
            ),
        };

        match step.policy {
            FailurePolicy::Propagate => {
                tracing::debug!(command = %echoed, "{}, stopping", description);
                Err(error)
            }
            FailurePolicy::Ignore => {
                tracing::warn!(command = %echoed, "{}, ignoring", description);
                println!(
                    "{}",
                    self.terminal
                        .ignored_line(&format!("{} {}", echoed, description))
                );
                Ok(())
            }
        }
    }
}
