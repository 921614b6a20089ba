use console::Style;

/// Terminal styling for target headers and echoed commands
#[derive(Debug, Clone)]
pub struct Terminal {
    pub supports_color: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            supports_color: console::colors_enabled(),
        }
    }

    /// Terminal that never emits escape codes
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            supports_color: false,
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.supports_color {
            style
        } else {
            Style::new()
        }
    }

    /// Banner printed before a target's steps
    pub fn header_line(&self, text: &str) -> String {
        self.style(Style::new().bold().cyan())
            .apply_to(format!("==> {}", text))
            .to_string()
    }

    /// Command line echoed before it runs, like make does
    pub fn command_line(&self, line: &str) -> String {
        self.style(Style::new().dim()).apply_to(line).to_string()
    }

    /// Note printed when a best-effort step failed
    pub fn ignored_line(&self, text: &str) -> String {
        self.style(Style::new().yellow())
            .apply_to(format!("(ignored) {}", text))
            .to_string()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
