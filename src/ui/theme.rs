//! Visual theme and styling.

use console::Style;

/// Output theme for the terminal UI.
#[derive(Debug, Clone)]
pub struct OutputTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for echoed script borders.
    pub border: Style,
    /// Style for echoed script content.
    pub command: Style,
}

impl Default for OutputTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            header: Style::new().magenta().bold(),
            border: Style::new().yellow().dim(),
            command: Style::new().italic(),
        }
    }

    /// Create a theme without any styling.
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
            header: Style::new(),
            border: Style::new(),
            command: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(msg))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(msg))
    }

    /// Format a header.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Whether colored output should be used.
///
/// Respects `NO_COLOR` and whether stdout is a color-capable terminal.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::colors_enabled()
}
