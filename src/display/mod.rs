//! Display module for terminal output and formatting

pub mod formatter;
pub mod terminal;

// Re-export commonly used items
pub use formatter::{format_status, format_target_header};
pub use terminal::Terminal;
