use std::path::PathBuf;
use thiserror::Error;

/// Exit code used when a program could not be started, matching POSIX shells
pub const EXIT_SPAWN_FAILED: i32 = 127;

/// Exit code used when the run was interrupted by Ctrl+C
pub const EXIT_INTERRUPTED: i32 = 130;

/// Exit code for usage and configuration problems
pub const EXIT_USAGE: i32 = 2;

/// Errors that stop a task run
#[derive(Debug, Error)]
pub enum TaskError {
    /// A step exited with a non-zero status
    #[error("`{command}` failed with exit code {code}")]
    StepFailed { command: String, code: i32 },

    /// A step's program could not be started
    #[error("could not run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Ctrl+C was received while a step was running
    #[error("interrupted while running `{command}`")]
    Interrupted { command: String },

    /// The environment file exists but could not be read
    #[error("failed to load environment file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// A target name that is not in the catalog
    #[error("unknown target '{0}' (expected one of: build, start, stop, delete, lint, test)")]
    UnknownTarget(String),
}

impl TaskError {
    /// Process exit code this error maps to
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskError::StepFailed { code, .. } => *code,
            TaskError::Spawn { .. } => EXIT_SPAWN_FAILED,
            TaskError::Interrupted { .. } => EXIT_INTERRUPTED,
            TaskError::EnvFile { .. } | TaskError::UnknownTarget(_) => EXIT_USAGE,
        }
    }
}

/// Result type alias for task operations
pub type TaskResult<T> = Result<T, TaskError>;
