//! Layout calculations and text utilities for the TUI and the exported page.

use once_cell::sync::Lazy;
use ratatui::layout::{Alignment, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pre-computed padding strings to avoid repeated " ".repeat(n) allocations.
static PADDING: Lazy<Vec<String>> = Lazy::new(|| (0..=120).map(|n| " ".repeat(n)).collect());

#[inline]
fn get_padding(width: usize) -> &'static str {
    &PADDING[width.min(120)]
}

// Layout constants
pub const PREFIX: &str = " ";
pub const PREFIX_WIDTH: usize = 1;
pub const SEP: &str = " │ ";
pub const SEP_WIDTH: usize = 3;

/// Narrowest a column may get before its text is truncated
pub const COL_MIN_WIDTH: usize = 4;
/// Widest a column grows to fit its content
pub const COL_MAX_WIDTH: usize = 32;

/// Calculate the display width of text (accounting for Unicode).
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate text to a maximum display width.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

/// Truncate text with an ellipsis if it exceeds max width.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let truncated = truncate_to_width(text, max_width.saturating_sub(1));
    format!("{truncated}…")
}

/// Pad text to a specific width with given alignment, truncating with an ellipsis if too long.
pub fn pad_to_width(text: &str, width: usize, alignment: Alignment) -> String {
    let mut trimmed = truncate_with_ellipsis(text, width);
    let current = display_width(&trimmed);
    let pad = width.saturating_sub(current);
    match alignment {
        Alignment::Left => {
            trimmed.push_str(get_padding(pad));
            trimmed
        }
        Alignment::Right => format!("{}{}", get_padding(pad), trimmed),
        Alignment::Center => {
            let left = pad / 2;
            let right = pad.saturating_sub(left);
            format!("{}{}{}", get_padding(left), trimmed, get_padding(right))
        }
    }
}

/// Fit column widths to content, then shrink the widest columns until the row fits.
///
/// `content` holds, per column, the display widths of the header and every cell.
pub fn compute_column_widths(content: &[Vec<usize>], available_width: u16) -> Vec<usize> {
    let mut widths: Vec<usize> = content
        .iter()
        .map(|cells| {
            cells
                .iter()
                .copied()
                .max()
                .unwrap_or(0)
                .clamp(COL_MIN_WIDTH, COL_MAX_WIDTH)
        })
        .collect();

    let budget = (available_width as usize).saturating_sub(PREFIX_WIDTH);
    loop {
        if row_body_width(&widths) <= budget {
            break;
        }
        let Some((idx, widest)) = widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
        else {
            break;
        };
        if widest <= COL_MIN_WIDTH {
            break;
        }
        widths[idx] = widest - 1;
    }
    widths
}

/// Width of a row body (columns plus separators) for the given column widths
pub fn row_body_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * SEP_WIDTH
}

/// Calculate a centered popup rectangle within a container.
pub fn popup_rect(
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
    r: Rect,
) -> Rect {
    let max_width = r.width.saturating_sub(2).max(1);
    let max_height = r.height.saturating_sub(2).max(1);

    let target_width = (r.width.saturating_mul(percent_x) / 100).max(min_width);
    let target_height = (r.height.saturating_mul(percent_y) / 100).max(min_height);

    let width = target_width.min(max_width);
    let height = target_height.min(max_height);

    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}
