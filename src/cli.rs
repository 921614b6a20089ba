use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_ENV_FILE;
use crate::tasks::Target;

/// Build, start, stop and delete the OpenRecall database container, and run
/// the project's lint and test tools
#[derive(Debug, Parser)]
#[command(name = "openrecall-db", version)]
pub struct Cli {
    /// Targets to run, in order
    #[arg(required = true)]
    pub targets: Vec<Target>,

    /// Environment file with IMAGE_NAME, CONTAINER_NAME, DB_PORT, DB_PASSWORD,
    /// DB_NAME, CONTAINER_RUNTIME and DOCKERFILE overrides; skipped when
    /// missing. Single-quote values containing `$` to keep them literal
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Print the commands without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}
