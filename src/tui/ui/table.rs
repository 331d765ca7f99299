//! Summary table rendering: header with sort markers, body rows, placeholder.

use super::layout::{
    compute_column_widths, display_width, pad_to_width, row_body_width, PREFIX, PREFIX_WIDTH, SEP,
};
use crate::data::table::{ColumnAlign, RenderedTable, TableBody};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

fn alignment(align: ColumnAlign) -> Alignment {
    match align {
        ColumnAlign::Left => Alignment::Left,
        ColumnAlign::Right => Alignment::Right,
        ColumnAlign::Center => Alignment::Center,
    }
}

/// Header text for a column, with the sort arrow on the active column
fn header_text(label: &str, sort: Option<crate::data::sorting::SortDirection>) -> String {
    match sort {
        Some(direction) => format!("{} {}", label, direction.arrow()),
        None => label.to_string(),
    }
}

/// Column widths for a rendered table inside `width` cells
pub fn table_column_widths(table: &RenderedTable, width: u16) -> Vec<usize> {
    let mut content: Vec<Vec<usize>> = table
        .header
        .iter()
        .map(|h| vec![display_width(&header_text(&h.label, h.sort))])
        .collect();

    if let TableBody::Rows(rows) = &table.body {
        for row in rows {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(column) = content.get_mut(idx) {
                    column.push(display_width(cell));
                }
            }
        }
    }

    compute_column_widths(&content, width)
}

/// Lines of a table, header first. `focused` highlights the keyboard column cursor.
pub fn table_lines(table: &RenderedTable, width: u16, focused: bool) -> Vec<Line<'static>> {
    let widths = table_column_widths(table, width);

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let cursor_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut header_spans: Vec<Span<'static>> = vec![Span::raw(PREFIX)];
    for (idx, cell) in table.header.iter().enumerate() {
        if idx > 0 {
            header_spans.push(Span::styled(SEP, sep_style));
        }
        let style = if focused && cell.focused {
            cursor_style
        } else {
            header_style
        };
        let text = pad_to_width(&header_text(&cell.label, cell.sort), widths[idx], alignment(cell.align));
        header_spans.push(Span::styled(text, style));
    }

    let body_width = row_body_width(&widths);
    let mut lines = vec![
        Line::from(header_spans),
        Line::from(Span::styled(
            format!("{}{}", PREFIX, "─".repeat(body_width)),
            sep_style,
        )),
    ];

    match &table.body {
        TableBody::Rows(rows) => {
            for row in rows {
                let mut spans: Vec<Span<'static>> = vec![Span::raw(PREFIX)];
                for (idx, cell) in row.iter().enumerate() {
                    let Some(&col_width) = widths.get(idx) else {
                        continue;
                    };
                    if idx > 0 {
                        spans.push(Span::styled(SEP, sep_style));
                    }
                    let align = table
                        .header
                        .get(idx)
                        .map(|h| alignment(h.align))
                        .unwrap_or(Alignment::Left);
                    spans.push(Span::raw(pad_to_width(cell, col_width, align)));
                }
                lines.push(Line::from(spans));
            }
        }
        TableBody::Placeholder { message, .. } => {
            // Spans the whole row body, widening to the message when there is room
            let span_width = body_width
                .max(display_width(message))
                .min((width as usize).saturating_sub(PREFIX_WIDTH));
            lines.push(Line::from(vec![
                Span::raw(PREFIX),
                Span::styled(
                    pad_to_width(message, span_width, Alignment::Center),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }

    lines
}

/// Rows a table occupies when drawn, excluding its border
pub fn table_height(table: &RenderedTable) -> u16 {
    // header + rule + body
    (table.row_count() + 2).min(u16::MAX as usize) as u16
}
