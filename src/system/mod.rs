//! Process execution abstractions for running and testing targets

pub mod commands;

// Re-export commonly used traits
pub use commands::{CommandRunner, DryRunCommandRunner, RealCommandRunner, RunStatus};
