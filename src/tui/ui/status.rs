//! Header, status bar, non-Ready state panel and help popup.

use super::layout::{popup_rect, truncate_with_ellipsis};
use crate::data::report::ReportState;
use crate::error::ReportError;
use crate::tui::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Keyboard shortcuts listed in the help popup.
pub fn keyboard_shortcuts() -> Vec<&'static str> {
    vec![
        "",
        "  REPORT",
        "  ──────",
        "  p          Pick project",
        "  a          Filter assignee rows",
        "  r          Retry current project",
        "  R          Reload project list",
        "  e          Export report page",
        "",
        "  TABLES",
        "  ──────",
        "  Tab        Switch focused table",
        "  h/l ←/→    Move column cursor",
        "  s/Enter    Sort by column (asc, desc, asc...)",
        "  1-9        Sort by column number",
        "",
        "  MENUS",
        "  ─────",
        "  j/k ↑/↓    Move selection",
        "  Enter      Confirm",
        "  Esc        Close",
        "",
        "  ?          Toggle help",
        "  q          Quit",
        "",
    ]
}

/// Draw the header: app title, selected project and loading spinner.
pub fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Sprint Overview ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(project_id) = app.report.selected_project() {
        let name = app.report.project_name(project_id).unwrap_or(project_id);
        spans.push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            name.to_string(),
            Style::default().fg(Color::White),
        ));
    }

    if app.is_loading() {
        spans.push(Span::styled(
            format!("  {} loading", app.spinner_char()),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(err) = app.report.projects_error() {
        spans.push(Span::styled(
            format!("  projects unavailable: {}", err),
            Style::default().fg(Color::Red),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(paragraph, area);
}

/// Lines describing a non-Ready report state.
pub fn state_lines(app: &App) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    match app.report.state() {
        ReportState::Empty => {
            let hint = if app.report.projects().is_empty() && app.loading_projects {
                "Loading projects..."
            } else {
                "Press p to pick a project"
            };
            vec![
                Line::from(Span::styled("No project selected", Style::default().fg(Color::White))),
                Line::from(Span::styled(hint, dim)),
            ]
        }
        ReportState::Loading { project_id } => {
            let name = app
                .report
                .project_name(project_id)
                .unwrap_or(project_id)
                .to_string();
            vec![Line::from(Span::styled(
                format!("{} Loading current sprint for {}", app.spinner_char(), name),
                Style::default().fg(Color::Yellow),
            ))]
        }
        ReportState::Failed { project_id, error } => {
            let name = app
                .report
                .project_name(project_id)
                .unwrap_or(project_id)
                .to_string();
            error_lines(&name, error)
        }
        // Ready is drawn by the report region
        ReportState::Ready(_) => Vec::new(),
    }
}

fn error_lines(project: &str, error: &ReportError) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    match error {
        ReportError::NoActiveSprint { .. } => vec![
            Line::from(Span::styled(
                format!("{} has no active sprint", project),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                "Start a sprint on the board or pick another project (p)",
                dim,
            )),
        ],
        _ => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("Could not load {}", project),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{} [{}]", error, error.code()),
                    Style::default().fg(Color::Red),
                )),
            ];
            if error.is_retryable() {
                lines.push(Line::from(Span::styled("Press r to retry", dim)));
            }
            lines
        }
    }
}

/// Draw the panel shown in place of the report region when not Ready.
pub fn draw_state_panel(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from("")];
    lines.extend(state_lines(app));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Draw the status bar at the bottom of the screen.
pub fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let status = if let Some(notice) = &app.notice {
        let style = if notice.starts_with("Export failed") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Span::styled(format!(" {}", truncate_with_ellipsis(notice, width.saturating_sub(1))), style)
    } else {
        let text = if width >= 95 {
            " p: project | a: assignee | Tab: table | h/l: column | s: sort | e: export | r: retry | ?: help "
        } else if width >= 60 {
            " p:project a:assignee Tab h/l s:sort e:export ?:help "
        } else if width >= 30 {
            " p a Tab h/l s e ? "
        } else {
            " ? help "
        };
        Span::styled(text, Style::default().fg(Color::DarkGray))
    };

    let paragraph = Paragraph::new(Line::from(status));
    f.render_widget(paragraph, area);
}

/// Draw the help popup.
pub fn draw_help_popup(f: &mut Frame) {
    let area = popup_rect(50, 80, 46, 12, f.area());

    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = keyboard_shortcuts().into_iter().map(Line::from).collect();
    lines.push(Line::from(Span::styled(
        "  Esc: Close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White));

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::{Board, Snapshot, Sprint};

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_no_active_sprint_is_not_an_error_banner() {
        let mut app = App::new(Config::default());
        let ticket = app.report.select_project("10");
        app.report.apply_fetch(
            &ticket,
            Err(ReportError::NoActiveSprint {
                project_id: "10".to_string(),
            }),
        );
        let rendered = text(&state_lines(&app));
        assert!(rendered.contains("no active sprint"));
        assert!(!rendered.contains("Could not load"));
    }

    #[test]
    fn test_fetch_failure_offers_retry() {
        let mut app = App::new(Config::default());
        let ticket = app.report.select_project("10");
        app.report.apply_fetch(
            &ticket,
            Err(ReportError::Fetch(crate::error::FetchError::Status { status: 500 })),
        );
        let rendered = text(&state_lines(&app));
        assert!(rendered.contains("Could not load 10"));
        assert!(rendered.contains("FETCH_FAILED"));
        assert!(rendered.contains("Press r to retry"));
    }

    #[test]
    fn test_ready_has_no_state_lines() {
        let mut app = App::new(Config::default());
        let ticket = app.report.select_project("10");
        app.report.apply_fetch(
            &ticket,
            Ok(Snapshot {
                project_id: "10".to_string(),
                board: Board {
                    id: "1".to_string(),
                    location_name: "Team".to_string(),
                },
                sprint: Sprint {
                    id: "5".to_string(),
                    name: "Sprint 5".to_string(),
                    ..Sprint::default()
                },
                progress: None,
                issues: Vec::new(),
            }),
        );
        assert!(state_lines(&app).is_empty());
    }
}
