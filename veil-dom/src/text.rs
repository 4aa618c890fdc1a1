use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::element::{Content, Direction, Element};

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

/// Flatten an element tree into plain text lines.
///
/// Columns stack their children, rows join them with a space, children are
/// visited in `order`. The focused element is prefixed with `›`. Every line is
/// truncated to `width` columns.
pub fn render_lines(root: &Element, width: usize, focused: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    render_into(root, focused, &mut lines);
    lines
        .into_iter()
        .map(|line| truncate_to_width(&line, width))
        .collect()
}

fn render_into(element: &Element, focused: Option<&str>, lines: &mut Vec<String>) {
    let marker = if focused == Some(element.id.as_str()) {
        "› "
    } else {
        ""
    };

    match &element.content {
        Content::None => {}
        Content::Text(text) => {
            for (i, line) in text.split('\n').enumerate() {
                let prefix = if i == 0 { marker } else { "" };
                lines.push(format!("{prefix}{line}"));
            }
        }
        Content::Children(_) => match element.direction {
            Direction::Column => {
                for child in element.ordered_children() {
                    render_into(child, focused, lines);
                }
            }
            Direction::Row => {
                let mut parts = Vec::new();
                for child in element.ordered_children() {
                    let mut child_lines = Vec::new();
                    render_into(child, focused, &mut child_lines);
                    parts.push(child_lines.join(" "));
                }
                let joined = parts
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                if !joined.is_empty() {
                    lines.push(joined);
                }
            }
        },
    }
}
