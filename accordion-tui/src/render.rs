//! Draws accordion sections on the terminal.

use std::io::{self, Write};

use accordion::view::Section;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const EXPANDED: char = '▼';
const COLLAPSED: char = '▶';
const CONTENT_INDENT: usize = 4;

/// One line of screen output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    pub text: String,
    pub highlighted: bool,
}

/// Lay out `sections` as screen lines, clipping content regions that are
/// mid-slide.
pub fn layout(sections: &[Section], width: usize) -> Vec<ScreenLine> {
    let mut lines = Vec::new();
    for section in sections {
        let indicator = if section.expanded { EXPANDED } else { COLLAPSED };
        lines.push(ScreenLine {
            text: truncate(&format!("{} {}", indicator, section.title), width),
            highlighted: section.selected,
        });

        let indent = " ".repeat(CONTENT_INDENT);
        for line in section.lines.iter().take(section.visible_lines()) {
            lines.push(ScreenLine {
                text: truncate(&format!("{}{}", indent, line), width),
                highlighted: false,
            });
        }
    }
    lines
}

/// Draw the accordion and a status line.
pub fn draw(
    out: &mut impl Write,
    sections: &[Section],
    status: &str,
    (width, height): (u16, u16),
) -> io::Result<()> {
    let width = usize::from(width);
    let body_rows = usize::from(height.saturating_sub(1));

    queue!(out, Clear(ClearType::All))?;
    for (row, line) in layout(sections, width).iter().take(body_rows).enumerate() {
        queue!(out, MoveTo(0, row as u16))?;
        if line.highlighted {
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(&line.text),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, Print(&line.text))?;
        }
    }

    queue!(
        out,
        MoveTo(0, height.saturating_sub(1)),
        SetAttribute(Attribute::Dim),
        Print(truncate(status, width)),
        SetAttribute(Attribute::Reset)
    )?;
    out.flush()
}

/// Cut `text` to at most `width` terminal columns.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use accordion::config::HeadingLevel;

    use super::*;

    fn section(title: &str, expanded: bool, visible: f32, lines: &[&str]) -> Section {
        Section {
            index: 0,
            title: title.to_string(),
            title_id: "t".into(),
            content_id: "c".into(),
            heading: HeadingLevel::H2,
            expanded,
            selected: false,
            visible,
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_layout_hides_collapsed_content() {
        let lines = layout(
            &[
                section("Open", true, 1.0, &["a", "b"]),
                section("Closed", false, 0.0, &["c"]),
            ],
            80,
        );
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["▼ Open", "    a", "    b", "▶ Closed"]);
    }

    #[test]
    fn test_layout_clips_sliding_content() {
        let lines = layout(&[section("Half", true, 0.5, &["1", "2", "3", "4"])], 80);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_truncate_wide_chars() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("日本語", 4), "日本");
        assert_eq!(truncate("ok", 10), "ok");
    }
}
