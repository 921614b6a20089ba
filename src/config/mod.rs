//! Environment file loading and task parameters

pub mod env_file;
pub mod task_config;

// Re-export commonly used items
pub use env_file::DEFAULT_ENV_FILE;
pub use task_config::TaskConfig;
