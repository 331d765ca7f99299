//! Fixed-layout page export of the report region.
//!
//! The region is drawn into an off-screen buffer of a fixed size, the same
//! widget the terminal view draws, and the buffer is written out as text.

use crate::config::Config;
use crate::data::aggregate::AssigneeFilter;
use crate::data::report::ReportViewModel;
use crate::data::table::{assignee_table, status_table, TableModel};
use crate::integrations::tracker;
use crate::tui::ReportRegion;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use std::path::{Path, PathBuf};

pub const PAGE_WIDTH: u16 = 100;
pub const PAGE_HEIGHT: u16 = 60;

const PAGE_TITLE: &str = "Sprint Overview Summary Report";
/// Rows used by the title block above the region
const TITLE_ROWS: u16 = 3;

/// A rendered page: always `PAGE_HEIGHT` lines of at most `PAGE_WIDTH` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPage {
    lines: Vec<String>,
}

impl ReportPage {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Render the report region onto a page. Returns `None` unless the report is Ready.
pub fn render_page(
    report: &ReportViewModel,
    assignees: &TableModel,
    statuses: &TableModel,
    generated_at: DateTime<Local>,
) -> Option<ReportPage> {
    let region = ReportRegion::new(report, assignees, statuses)?;

    let page = Rect::new(0, 0, PAGE_WIDTH, PAGE_HEIGHT);
    let mut buf = Buffer::empty(page);

    buf.set_string(0, 0, PAGE_TITLE, Style::default());
    buf.set_string(
        0,
        1,
        format!("Generated {}", generated_at.format("%Y-%m-%d %H:%M")),
        Style::default(),
    );

    let body = Rect::new(0, TITLE_ROWS, PAGE_WIDTH, PAGE_HEIGHT - TITLE_ROWS);
    if region.height() > body.height {
        tracing::warn!(
            needed = region.height(),
            available = body.height,
            "report region is taller than the page, rows will be clipped"
        );
    }
    region.render(body, &mut buf);

    Some(ReportPage {
        lines: buffer_lines(&buf),
    })
}

/// Plain text of every buffer row, right-trimmed
fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

/// Render and write the page. Fails when there is no Ready report.
pub fn export_report(
    report: &ReportViewModel,
    assignees: &TableModel,
    statuses: &TableModel,
    path: &Path,
) -> Result<PathBuf> {
    let page = render_page(report, assignees, statuses, Local::now())
        .context("No report to export: select a project with an active sprint first")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, page.to_text())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    tracing::info!("Report exported to {}", path.display());
    Ok(path.to_path_buf())
}

/// Fetch one project's current work and export it without a terminal
pub async fn run_headless(
    config: &Config,
    project_id: &str,
    assignee: Option<String>,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let mut report = ReportViewModel::new();
    let ticket = report.select_project(project_id);

    // The name is only cosmetic; fall back to the id when the list is unavailable
    let (projects, work) = tokio::join!(
        tracker::fetch_projects(&config.api),
        tracker::fetch_current_work(&config.api, &ticket.project_id)
    );
    report.set_projects(projects);
    report.apply_fetch(&ticket, work);
    if let Some(error) = report.error() {
        anyhow::bail!("{} ({})", error, error.code());
    }

    report.set_assignee_filter(AssigneeFilter::from(assignee));

    let path = output.unwrap_or_else(|| config.export.path.clone());
    export_report(
        &report,
        &assignee_table(&config.report.empty_message),
        &status_table(&config.report.empty_message),
        &path,
    )
}
