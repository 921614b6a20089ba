mod cli;
mod config;
mod display;
mod system;
mod tasks;

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{TaskConfig, env_file};
use system::{CommandRunner, DryRunCommandRunner, RealCommandRunner};
use tasks::{TaskDispatcher, TaskResult, Target};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(async_main(cli)) {
        tracing::error!("{}", e);
        process::exit(e.exit_code());
    }
}

async fn async_main(cli: Cli) -> TaskResult<()> {
    env_file::load(&cli.env_file)?;
    let config = TaskConfig::from_env();
    tracing::debug!(
        runtime = %config.runtime,
        image = %config.image,
        container = %config.container,
        port = %config.port,
        database = %config.database,
        "task configuration"
    );

    if cli.dry_run {
        tracing::info!("dry run: commands are printed, not executed");
        run_with(DryRunCommandRunner, config, &cli.targets).await
    } else {
        run_with(RealCommandRunner::new(), config, &cli.targets).await
    }
}

async fn run_with<R: CommandRunner>(
    runner: R,
    config: TaskConfig,
    targets: &[Target],
) -> TaskResult<()> {
    TaskDispatcher::new(runner, config).run_targets(targets).await
}
