//! Terminal output of highlighted lines using crossterm

use std::io::Write;

use crossterm::{
    queue,
    style::{
        Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Group, LineMatch};
use crate::theme::{Color, Style, Theme};

fn term_color(color: Color) -> Option<TermColor> {
    let mapped = match color {
        Color::Default => return None,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    };
    Some(mapped)
}

/// Switch the terminal from one style to another
fn apply_style<W: Write>(out: &mut W, from: Style, to: Style) -> Result<()> {
    if !from.is_default() {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    if let Some(fg) = term_color(to.fg) {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = term_color(to.bg) {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if to.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if to.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if to.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

/// Write one line with its group changes painted in theme colors
///
/// Tabs are expanded to `tab_width` stops. No escape sequences are written
/// for text in the default style, so a plain theme gives plain text. The
/// trailing newline is left to the caller.
pub fn render_line<W: Write>(
    out: &mut W,
    text: &str,
    matches: Option<&LineMatch>,
    theme: &Theme,
    tab_width: usize,
) -> Result<()> {
    let tab_width = tab_width.max(1);
    let mut current = Style::default();
    let mut group = Group::NONE;
    let mut run = String::new();
    let mut display_col = 0;

    for (col, ch) in text.chars().enumerate() {
        if let Some(&next) = matches.and_then(|m| m.get(&col)) {
            if next != group {
                group = next;
                let style = theme.style_for(group);
                if style != current {
                    if !run.is_empty() {
                        queue!(out, Print(&run))?;
                        run.clear();
                    }
                    apply_style(out, current, style)?;
                    current = style;
                }
            }
        }

        if ch == '\t' {
            let spaces = tab_width - display_col % tab_width;
            run.extend(std::iter::repeat(' ').take(spaces));
            display_col += spaces;
        } else {
            run.push(ch);
            display_col += ch.width().unwrap_or(1);
        }
    }

    if !run.is_empty() {
        queue!(out, Print(&run))?;
    }
    if !current.is_default() {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// Describe a line's group changes as `column:group` pairs
///
/// Used by `hilite --dump`.
pub fn describe_matches(matches: &LineMatch) -> String {
    matches
        .iter()
        .map(|(col, group)| format!("{}:{}", col, group))
        .collect::<Vec<_>>()
        .join(" ")
}
