use std::path::Path;

use crate::tasks::error::{TaskError, TaskResult};

/// Default environment file looked up in the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Load an optional environment file into the process environment.
///
/// Returns `Ok(false)` when the file does not exist. Variables already set in
/// the process environment keep their values. `$NAME` references in unquoted
/// and double-quoted values are expanded; single-quoted values are literal.
pub fn load(path: &Path) -> TaskResult<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded environment file");
            Ok(true)
        }
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "no environment file, using process environment");
            Ok(false)
        }
        Err(source) => Err(TaskError::EnvFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}
