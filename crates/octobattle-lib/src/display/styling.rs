//! Semantic text styling on top of `console`
//!
//! Colors are decided once, from the resolved color intent, and forced on
//! or off so rendered output does not depend on where it is written.

use console::Style;

const CHECKMARK: &str = "✓";
const CROSS: &str = "✗";
const ARROW: &str = "→";

/// Style manager for rendered command output
#[derive(Debug, Clone, Copy)]
pub struct StyleManager {
    color: bool,
}

impl StyleManager {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Never emits ANSI escapes
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style.force_styling(self.color).apply_to(text).to_string()
    }

    /// Style text with semantic success intent
    pub fn style_success(&self, text: &str) -> String {
        self.paint(Style::new().green(), text)
    }

    /// Style text with semantic error intent
    pub fn style_error(&self, text: &str) -> String {
        self.paint(Style::new().red(), text)
    }

    /// Style text with semantic warning intent
    pub fn style_warning(&self, text: &str) -> String {
        self.paint(Style::new().yellow(), text)
    }

    /// Style text with emphasis (bold)
    pub fn style_emphasis(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    /// Style text as subtle/muted
    pub fn style_subtle(&self, text: &str) -> String {
        self.paint(Style::new().dim(), text)
    }

    /// Format success message with symbol and styling
    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(CHECKMARK), message)
    }

    /// Format error message with symbol and styling
    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(CROSS), message)
    }

    /// Format working/progress message
    pub fn format_working(&self, message: &str) -> String {
        format!("{} {}", self.style_subtle(ARROW), message)
    }
}
