use chrono::{DateTime, Local};

use crate::system::RunStatus;

/// Header text for a target, e.g. "start (3 steps) at 2025-09-14 16:00:03"
pub fn format_target_header(target: &str, step_count: usize, at: DateTime<Local>) -> String {
    let steps = if step_count == 1 { "step" } else { "steps" };
    format!(
        "{} ({} {}) at {}",
        target,
        step_count,
        steps,
        at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Short description of how a command ended
pub fn format_status(status: RunStatus) -> String {
    match status {
        RunStatus::Success => "ok".to_string(),
        RunStatus::Failed(code) => format!("exited with {}", code),
        RunStatus::Interrupted => "interrupted".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_target_header() {
        let at = Local.with_ymd_and_hms(2025, 9, 14, 16, 0, 3).unwrap();
        assert_eq!(
            format_target_header("delete", 3, at),
            "delete (3 steps) at 2025-09-14 16:00:03"
        );
        assert_eq!(
            format_target_header("build", 1, at),
            "build (1 step) at 2025-09-14 16:00:03"
        );
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(RunStatus::Success), "ok");
        assert_eq!(format_status(RunStatus::Failed(125)), "exited with 125");
        assert_eq!(format_status(RunStatus::Interrupted), "interrupted");
    }
}
