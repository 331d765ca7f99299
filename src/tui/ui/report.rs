//! The report region: sprint heading plus the two summary tables.
//!
//! This is the exact area the page export captures, so it holds nothing else
//! (no project picker, status bar or help).

use super::table::{table_height, table_lines};
use crate::data::report::ReportViewModel;
use crate::data::table::{RenderedTable, TableModel};
use crate::data::Sprint;
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Which summary table receives sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFocus {
    #[default]
    Assignees,
    Statuses,
}

impl TableFocus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Assignees => Self::Statuses,
            Self::Statuses => Self::Assignees,
        }
    }
}

pub struct ReportRegion {
    heading: Vec<Line<'static>>,
    assignees: RenderedTable,
    statuses: RenderedTable,
    focus: Option<TableFocus>,
}

impl ReportRegion {
    /// Build the region for a Ready report; `None` in any other state.
    pub fn new(
        report: &ReportViewModel,
        assignee_table: &TableModel,
        status_table: &TableModel,
    ) -> Option<Self> {
        let ready = report.ready()?;
        let snapshot = &ready.snapshot;
        let project = report
            .project_name(&snapshot.project_id)
            .unwrap_or(&snapshot.project_id);

        let dim = Style::default().fg(Color::DarkGray);
        let mut heading = vec![
            Line::from(vec![
                Span::styled(
                    project.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" · ", dim),
                Span::styled(snapshot.sprint.name.clone(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(Span::styled(
                format!(
                    "Board {} ({}) · {} cards · Assignee: {}",
                    snapshot.board.id,
                    snapshot.board.location_name,
                    ready.active_cards,
                    report.assignee_filter().label()
                ),
                dim,
            )),
        ];

        if snapshot.sprint.has_details() {
            heading.push(Line::from(Span::styled(sprint_details(&snapshot.sprint), dim)));
        }

        if let Some(progress) = snapshot.progress {
            heading.push(Line::from(vec![
                Span::styled(
                    format!("Completed {:.0}%", progress.completed),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(" · ", dim),
                Span::styled(
                    format!("Blocked {:.0}%", progress.blocked),
                    Style::default().fg(Color::Red),
                ),
                Span::styled(" · ", dim),
                Span::styled(
                    format!("In Progress {:.0}%", progress.in_progress),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }

        Some(Self {
            heading,
            assignees: assignee_table.render(report.assignee_rows()),
            statuses: status_table.render(report.status_rows()),
            focus: None,
        })
    }

    pub fn with_focus(mut self, focus: TableFocus) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Rows needed to draw the region without clipping
    pub fn height(&self) -> u16 {
        self.heading.len() as u16
            + 1
            + table_height(&self.assignees)
            + 2
            + table_height(&self.statuses)
            + 2
    }
}

impl Widget for ReportRegion {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.heading.len() as u16 + 1), // Heading + spacer
                Constraint::Length(table_height(&self.assignees) + 2),
                Constraint::Length(table_height(&self.statuses) + 2),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(self.heading).render(chunks[0], buf);
        render_table_block(
            &self.assignees,
            self.focus == Some(TableFocus::Assignees),
            chunks[1],
            buf,
        );
        render_table_block(
            &self.statuses,
            self.focus == Some(TableFocus::Statuses),
            chunks[2],
            buf,
        );
    }
}

/// "Sprint No: 12 · Release 2026-03-02 → 2026-03-16", with `?` for gaps
fn sprint_details(sprint: &Sprint) -> String {
    let date = |d: Option<NaiveDate>| d.map_or_else(|| "?".to_string(), |d| d.format("%Y-%m-%d").to_string());
    format!(
        "Sprint No: {} · Release {} → {}",
        sprint.number.as_deref().unwrap_or("?"),
        date(sprint.start_date),
        date(sprint.end_date)
    )
}

fn render_table_block(table: &RenderedTable, focused: bool, area: Rect, buf: &mut Buffer) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(format!(" {} ", table.title.as_deref().unwrap_or_default()))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(table_lines(table, inner.width, focused)).render(inner, buf);
}
