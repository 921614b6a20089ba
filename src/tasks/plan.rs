use super::types::{Invocation, Step, Target};
use crate::config::TaskConfig;

/// Port the database listens on inside the container
pub const DATABASE_CONTAINER_PORT: &str = "5432";

/// Directory handed to the test runner
pub const TEST_DIR: &str = "tests";

/// Package checked by the type-checker
pub const PACKAGE_DIR: &str = "openrecall";

/// Build the ordered steps for a target
pub fn steps_for(target: Target, config: &TaskConfig) -> Vec<Step> {
    let runtime = |args: Vec<String>| Invocation::new(config.runtime.as_str(), args);

    match target {
        Target::Build => vec![Step::propagate(runtime(vec![
            "build".into(),
            "-t".into(),
            config.image.clone(),
            "-f".into(),
            config.build_file.clone(),
            ".".into(),
        ]))],
        Target::Start => vec![Step::propagate(
            runtime(vec![
                "run".into(),
                "-d".into(),
                "--name".into(),
                config.container.clone(),
                "-p".into(),
                format!("{}:{}", config.port, DATABASE_CONTAINER_PORT),
                "-e".into(),
            ])
            .secret_arg(format!("POSTGRES_PASSWORD={}", config.password))
            .arg("-e")
            .arg(format!("POSTGRES_DB={}", config.database))
            .arg(config.image.as_str()),
        )],
        Target::Stop => vec![
            Step::propagate(runtime(vec!["stop".into(), config.container.clone()])),
            Step::propagate(runtime(vec!["rm".into(), config.container.clone()])),
        ],
        Target::Delete => vec![
            Step::ignore_failure(runtime(vec!["stop".into(), config.container.clone()])),
            Step::ignore_failure(runtime(vec!["rm".into(), config.container.clone()])),
            Step::ignore_failure(runtime(vec!["rmi".into(), config.image.clone()])),
        ],
        Target::Lint => vec![
            Step::propagate(Invocation::new("ruff", ["check", "."])),
            Step::propagate(Invocation::new("mypy", [PACKAGE_DIR])),
        ],
        Target::Test => vec![Step::propagate(Invocation::new("pytest", [TEST_DIR]))],
    }
}
