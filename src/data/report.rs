//! Report view model: project selection, fetch lifecycle and derived rows.
//!
//! Every project selection bumps a generation counter and hands out a
//! [`FetchTicket`]. A completion is applied only when its ticket still matches
//! the current generation, so a slow response for an older selection can never
//! overwrite a newer Loading or Ready state.

use super::aggregate::{count_by_status, filter_assignee_rows, group_by_assignee, AssigneeFilter};
use super::filter::active_count;
use super::{sort_projects, AssigneeSummary, Project, Snapshot, StatusSummary};
use crate::error::{FetchError, ReportError};

/// Identifies one dispatched work-item fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub project_id: String,
    pub generation: u64,
}

/// Snapshot plus everything derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyReport {
    pub snapshot: Snapshot,
    /// Every assignee row, before the assignee filter
    pub assignee_rows: Vec<AssigneeSummary>,
    /// Assignee rows after the assignee filter
    pub visible_assignee_rows: Vec<AssigneeSummary>,
    pub status_rows: Vec<StatusSummary>,
    /// Issues left after removing cancelled work
    pub active_cards: usize,
}

impl ReadyReport {
    fn compute(snapshot: Snapshot, filter: &AssigneeFilter) -> Self {
        let assignee_rows = group_by_assignee(&snapshot.issues);
        let visible_assignee_rows = filter_assignee_rows(&assignee_rows, filter);
        let status_rows = count_by_status(&snapshot.issues);
        let active_cards = active_count(&snapshot.issues);
        Self {
            snapshot,
            assignee_rows,
            visible_assignee_rows,
            status_rows,
            active_cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReportState {
    /// No project selected yet
    #[default]
    Empty,
    Loading { project_id: String },
    Ready(Box<ReadyReport>),
    Failed { project_id: String, error: ReportError },
}

impl ReportState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Loading { .. } => "Loading",
            Self::Ready(_) => "Ready",
            Self::Failed { .. } => "Failed",
        }
    }
}

#[derive(Debug, Default)]
pub struct ReportViewModel {
    projects: Vec<Project>,
    projects_error: Option<FetchError>,
    selected_project: Option<String>,
    generation: u64,
    state: ReportState,
    assignee_filter: AssigneeFilter,
}

impl ReportViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Project list
    // ─────────────────────────────────────────────────────────────────────────

    /// Store the project list result, sorted by name for display
    pub fn set_projects(&mut self, result: Result<Vec<Project>, FetchError>) {
        match result {
            Ok(mut projects) => {
                sort_projects(&mut projects);
                self.projects = projects;
                self.projects_error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch projects: {}", e);
                self.projects_error = Some(e);
            }
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn projects_error(&self) -> Option<&FetchError> {
        self.projects_error.as_ref()
    }

    pub fn project_name(&self, project_id: &str) -> Option<&str> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .map(|p| p.name.as_str())
    }

    pub fn selected_project(&self) -> Option<&str> {
        self.selected_project.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fetch lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Select a project and enter Loading, dropping any previous snapshot or error.
    ///
    /// The returned ticket must accompany the fetch result in [`Self::apply_fetch`].
    pub fn select_project(&mut self, project_id: &str) -> FetchTicket {
        self.generation += 1;
        self.selected_project = Some(project_id.to_string());
        self.state = ReportState::Loading {
            project_id: project_id.to_string(),
        };
        tracing::debug!(project_id, generation = self.generation, "project selected");
        FetchTicket {
            project_id: project_id.to_string(),
            generation: self.generation,
        }
    }

    /// Re-dispatch the fetch for the current project, if any
    pub fn retry(&mut self) -> Option<FetchTicket> {
        let project_id = self.selected_project.clone()?;
        Some(self.select_project(&project_id))
    }

    /// Apply a fetch completion. Returns `false` when the ticket is stale and the result was dropped.
    pub fn apply_fetch(&mut self, ticket: &FetchTicket, result: Result<Snapshot, ReportError>) -> bool {
        if ticket.generation != self.generation
            || !matches!(self.state, ReportState::Loading { .. })
        {
            tracing::debug!(
                project_id = %ticket.project_id,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return false;
        }

        self.state = match result {
            Ok(snapshot) => {
                tracing::info!(
                    project_id = %ticket.project_id,
                    sprint = %snapshot.sprint.name,
                    issues = snapshot.issues.len(),
                    "snapshot loaded"
                );
                ReportState::Ready(Box::new(ReadyReport::compute(snapshot, &self.assignee_filter)))
            }
            Err(error) => {
                match &error {
                    ReportError::NoActiveSprint { .. } => {
                        tracing::info!(project_id = %ticket.project_id, "no active sprint");
                    }
                    ReportError::Fetch(e) => {
                        tracing::warn!(project_id = %ticket.project_id, "fetch failed: {}", e);
                    }
                    ReportError::Data(e) => {
                        tracing::error!(project_id = %ticket.project_id, "malformed snapshot: {}", e);
                    }
                }
                ReportState::Failed {
                    project_id: ticket.project_id.clone(),
                    error,
                }
            }
        };
        true
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ReportState::Loading { .. })
    }

    pub fn ready(&self) -> Option<&ReadyReport> {
        match &self.state {
            ReportState::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ReportError> {
        match &self.state {
            ReportState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Assignee filter and derived rows
    // ─────────────────────────────────────────────────────────────────────────

    pub fn assignee_filter(&self) -> &AssigneeFilter {
        &self.assignee_filter
    }

    /// Change the assignee filter; only the assignee rows are recomputed
    pub fn set_assignee_filter(&mut self, filter: AssigneeFilter) {
        self.assignee_filter = filter;
        if let ReportState::Ready(report) = &mut self.state {
            report.visible_assignee_rows =
                filter_assignee_rows(&report.assignee_rows, &self.assignee_filter);
        }
    }

    /// Assignee rows after the filter (empty unless Ready)
    pub fn assignee_rows(&self) -> &[AssigneeSummary] {
        self.ready()
            .map(|r| r.visible_assignee_rows.as_slice())
            .unwrap_or(&[])
    }

    /// Status rows (empty unless Ready). Never affected by the assignee filter.
    pub fn status_rows(&self) -> &[StatusSummary] {
        self.ready().map(|r| r.status_rows.as_slice()).unwrap_or(&[])
    }

    /// Assignee names of the unfiltered summary, in row order
    pub fn assignee_names(&self) -> Vec<&str> {
        self.ready()
            .map(|r| r.assignee_rows.iter().map(|a| a.assignee.as_str()).collect())
            .unwrap_or_default()
    }

    /// Non-cancelled card count of the current snapshot
    pub fn active_cards(&self) -> usize {
        self.ready().map(|r| r.active_cards).unwrap_or(0)
    }
}
