//! Menu rendering - project picker and assignee filter.

use super::layout::{popup_rect, truncate_with_ellipsis};
use crate::tui::{App, ModalState};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Visible window of `len` entries around `selected`
fn visible_range(len: usize, selected: usize, rows: usize) -> std::ops::Range<usize> {
    if rows == 0 || len <= rows {
        return 0..len;
    }
    let start = selected.saturating_sub(rows / 2).min(len - rows);
    start..start + rows
}

fn menu_lines(
    entries: &[&str],
    selected: usize,
    current: Option<usize>,
    rows: usize,
    width: usize,
) -> Vec<Line<'static>> {
    let active_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::White);
    let dim_style = Style::default().fg(Color::DarkGray);

    visible_range(entries.len(), selected, rows)
        .map(|idx| {
            let marker = if current == Some(idx) { "●" } else { "○" };
            let label = truncate_with_ellipsis(entries[idx], width.saturating_sub(5));
            let style = if idx == selected {
                active_style
            } else {
                text_style
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", marker),
                    if current == Some(idx) {
                        Style::default().fg(Color::Green)
                    } else {
                        dim_style
                    },
                ),
                Span::styled(format!("{} ", label), style),
            ])
        })
        .collect()
}

fn draw_menu(f: &mut Frame, title: &str, body: Vec<Line<'static>>, height: u16) {
    let area = popup_rect(40, 60, 36, height, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    lines.extend(body);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " j/k: move | Enter: select | Esc: cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White));

    f.render_widget(paragraph, area);
}

pub fn draw_project_picker(f: &mut Frame, app: &App) {
    let ModalState::ProjectPicker { selected } = app.modal else {
        return;
    };
    let rows = f.area().height.saturating_sub(10).max(3) as usize;

    let body = if app.report.projects().is_empty() {
        let message = match app.report.projects_error() {
            Some(err) => format!(" Could not load projects: {} (R to reload)", err),
            None if app.loading_projects => " Loading projects...".to_string(),
            None => " No projects".to_string(),
        };
        vec![Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        let names: Vec<&str> = app.report.projects().iter().map(|p| p.name.as_str()).collect();
        let current = app
            .report
            .selected_project()
            .and_then(|id| app.report.projects().iter().position(|p| p.id == id));
        menu_lines(&names, selected, current, rows, 40)
    };

    let height = (body.len() as u16).saturating_add(5);
    draw_menu(f, "Projects", body, height);
}

pub fn draw_assignee_menu(f: &mut Frame, app: &App) {
    let ModalState::AssigneeMenu { selected } = app.modal else {
        return;
    };
    let rows = f.area().height.saturating_sub(10).max(3) as usize;

    let entries = app.assignee_menu_entries();
    let filter_label = app.report.assignee_filter().label();
    let current = entries.iter().position(|e| *e == filter_label);
    let body = menu_lines(&entries, selected, current, rows, 40);

    let height = (body.len() as u16).saturating_add(5);
    draw_menu(f, "Assignee", body, height);
}
