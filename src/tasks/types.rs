use std::fmt;
use std::str::FromStr;

use super::error::TaskError;

/// Named recipes the runner knows how to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Build,
    Start,
    Stop,
    Delete,
    Lint,
    Test,
}

impl Target {
    pub const ALL: [Target; 6] = [
        Target::Build,
        Target::Start,
        Target::Stop,
        Target::Delete,
        Target::Lint,
        Target::Test,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Target::Build => "build",
            Target::Start => "start",
            Target::Stop => "stop",
            Target::Delete => "delete",
            Target::Lint => "lint",
            Target::Test => "test",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Target::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| TaskError::UnknownTarget(s.to_string()))
    }
}

/// What to do when a step exits non-zero or cannot be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run and report the failure
    Propagate,
    /// Log the failure and continue with the next step
    Ignore,
}

/// A single external command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Indexes into `args` whose value is hidden when echoed
    secret_args: Vec<usize>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            secret_args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append an argument that must not appear in echoed or logged output
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret_args.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    /// Command line with secret arguments masked.
    ///
    /// A `KEY=value` argument keeps its key (`KEY=***`), anything else
    /// becomes `***`. Other arguments are never touched.
    pub fn redacted(&self) -> String {
        let mut line = self.program.clone();
        for (index, arg) in self.args.iter().enumerate() {
            line.push(' ');
            if self.secret_args.contains(&index) {
                match arg.split_once('=') {
                    Some((key, _)) => {
                        line.push_str(key);
                        line.push_str("=***");
                    }
                    None => line.push_str("***"),
                }
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Exact command line, secrets included
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One entry of a target's recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub invocation: Invocation,
    pub policy: FailurePolicy,
}

impl Step {
    pub fn propagate(invocation: Invocation) -> Self {
        Self {
            invocation,
            policy: FailurePolicy::Propagate,
        }
    }

    pub fn ignore_failure(invocation: Invocation) -> Self {
        Self {
            invocation,
            policy: FailurePolicy::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_parsing() {
        assert_eq!("build".parse::<Target>().unwrap(), Target::Build);
        assert_eq!("DELETE".parse::<Target>().unwrap(), Target::Delete);
        assert_eq!(" test ".parse::<Target>().unwrap(), Target::Test);
        assert!(matches!(
            "deploy".parse::<Target>(),
            Err(TaskError::UnknownTarget(name)) if name == "deploy"
        ));
    }

    #[test]
    fn test_target_names_round_trip() {
        for target in Target::ALL {
            assert_eq!(target.to_string().parse::<Target>().unwrap(), target);
        }
    }

    #[test]
    fn test_invocation_display_is_exact() {
        let inv = Invocation::new("docker", ["run", "-e"]).secret_arg("POSTGRES_PASSWORD=secret");
        assert_eq!(inv.to_string(), "docker run -e POSTGRES_PASSWORD=secret");
        assert_eq!(inv.redacted(), "docker run -e POSTGRES_PASSWORD=***");
    }

    #[test]
    fn test_redaction_leaves_other_arguments_alone() {
        let inv = Invocation::new("docker", ["run", "--name", "openrecall-db", "-e"])
            .secret_arg("POSTGRES_PASSWORD=openrecall")
            .arg("-e")
            .arg("POSTGRES_DB=openrecall")
            .arg("openrecall-db");
        assert_eq!(
            inv.redacted(),
            "docker run --name openrecall-db -e POSTGRES_PASSWORD=*** -e POSTGRES_DB=openrecall openrecall-db"
        );
    }

    #[test]
    fn test_secret_without_key_is_fully_masked() {
        let inv = Invocation::new("login", ["--password"]).secret_arg("hunter2");
        assert_eq!(inv.redacted(), "login --password ***");
    }

    #[test]
    fn test_no_secrets_redacts_nothing() {
        let inv = Invocation::new("docker", ["rm", "db"]);
        assert_eq!(inv.redacted(), inv.to_string());
    }
}
