//! Theme for CLI output
//!
//! Centralizes the ANSI colors used by command output. Color is dropped
//! when stdout is not a terminal or `NO_COLOR` is set.

/// ANSI escape codes.
pub mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GRAY: &str = "\x1b[37m";
    pub const WHITE: &str = "\x1b[97m";
    pub const DARK_GRAY: &str = "\x1b[90m";
    pub const RESET: &str = "\x1b[0m";
}

/// Colors for CLI output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary text color (used for most content)
    pub text_primary: &'static str,
    /// Secondary/dimmed text color
    pub text_secondary: &'static str,
    pub accent: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    /// False renders everything as plain text
    pub color: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: ansi::GRAY,
            text_secondary: ansi::DARK_GRAY,
            accent: ansi::YELLOW,
            error: ansi::RED,
            success: ansi::GREEN,
            color: true,
        }
    }
}

impl Theme {
    /// Same palette with color disabled.
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, ansi::RESET)
        } else {
            text.to_string()
        }
    }

    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        self.paint(self.success, text)
    }
}

/// Whether stdout should get ANSI colors.
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// Theme for the current process.
pub fn current_theme() -> Theme {
    if color_enabled() {
        Theme::default()
    } else {
        Theme::plain()
    }
}
