//! Display styles for highlight groups
//!
//! A [`Theme`] maps group names such as `constant.string` to a terminal
//! [`Style`]. Lookups fall back along the dotted name, so a theme that only
//! styles `constant` still colors `constant.string` and `constant.number`.

use std::collections::HashMap;

use crate::syntax::Group;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Styles keyed by group name
#[derive(Debug, Clone)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    /// A theme with no styles; every group renders plain
    pub fn plain() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Set the style for a group name
    pub fn set(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    /// Style for a group name
    ///
    /// Tries the full name, then each shorter dotted prefix. Unknown names
    /// get the default style.
    pub fn style_for_name(&self, name: &str) -> Style {
        let mut key = name;
        loop {
            if let Some(style) = self.styles.get(key) {
                return *style;
            }
            match key.rfind('.') {
                Some(dot) => key = &key[..dot],
                None => return Style::default(),
            }
        }
    }

    /// Style for a group
    pub fn style_for(&self, group: Group) -> Style {
        if group.is_none() {
            return Style::default();
        }
        self.style_for_name(&group.name())
    }
}

impl Default for Theme {
    fn default() -> Self {
        let mut theme = Self::plain();
        theme.set("comment", Style::fg(Color::BrightBlack).with_italic());
        theme.set("constant", Style::fg(Color::BrightRed));
        theme.set("constant.string", Style::fg(Color::Green));
        theme.set("constant.number", Style::fg(Color::Cyan));
        theme.set("constant.specialChar", Style::fg(Color::BrightYellow));
        theme.set("identifier", Style::fg(Color::Blue));
        theme.set("statement", Style::fg(Color::Magenta).with_bold());
        theme.set("symbol", Style::fg(Color::BrightWhite));
        theme.set("preproc", Style::fg(Color::BrightMagenta));
        theme.set("type", Style::fg(Color::Yellow));
        theme.set("type.emphasis", Style::default().with_italic());
        theme.set("special", Style::fg(Color::BrightCyan));
        theme.set("underlined", Style::fg(Color::BrightBlue).with_underline());
        theme.set("todo", Style::fg(Color::Black).with_bg(Color::Yellow).with_bold());
        theme.set("code", Style::fg(Color::White));
        theme
    }
}
