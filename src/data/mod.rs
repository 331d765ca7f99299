pub mod aggregate;
pub mod filter;
pub mod report;
pub mod sorting;
pub mod table;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status label that removes an issue from every derived view
pub const CANCELLED_STATUS: &str = "CANCELADO";
/// Status label counted as a finished card
pub const DONE_STATUS: &str = "DONE";
/// Status label counted as a card being worked on
pub const IN_PROGRESS_STATUS: &str = "IN PROGRESS";
/// Row key used for issues without an assignee record
pub const UNASSIGNED: &str = "Unassigned";

/// A single work item as seen by the report engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub status: String,
    pub assignee: Option<Assignee>,
    pub time_spent_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub account_id: Option<String>,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl Issue {
    /// Display name used to group this issue, `"Unassigned"` when no assignee is set
    pub fn assignee_name(&self) -> &str {
        match &self.assignee {
            Some(a) => &a.display_name,
            None => UNASSIGNED,
        }
    }

    /// Which counter bucket this issue falls into
    pub fn progress(&self) -> IssueProgress {
        IssueProgress::from_status(&self.status)
    }
}

/// Bucket an issue status belongs to for the per-assignee counters.
///
/// A status maps to exactly one bucket, so no issue counts as both done and in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueProgress {
    Done,
    InProgress,
    Cancelled,
    Other,
}

impl IssueProgress {
    pub fn from_status(status: &str) -> Self {
        if status.eq_ignore_ascii_case(DONE_STATUS) {
            Self::Done
        } else if status.eq_ignore_ascii_case(IN_PROGRESS_STATUS) {
            Self::InProgress
        } else if status.eq_ignore_ascii_case(CANCELLED_STATUS) {
            Self::Cancelled
        } else {
            Self::Other
        }
    }
}

/// Project as listed by the tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// Sort projects alphabetically for the picker (case-insensitive, ties by id)
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub location_name: String,
}

/// Active sprint of a board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: String,
    pub name: String,
    pub number: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Sprint {
    pub fn has_details(&self) -> bool {
        self.number.is_some() || self.start_date.is_some() || self.end_date.is_some()
    }
}

/// Sprint completion percentages, when the tracker provides them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprintProgress {
    pub completed: f64,
    pub blocked: f64,
    pub in_progress: f64,
}

/// Everything fetched for one project selection at one point in time.
///
/// Replaced wholesale on every project change, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub project_id: String,
    pub board: Board,
    pub sprint: Sprint,
    pub progress: Option<SprintProgress>,
    pub issues: Vec<Issue>,
}

/// Per-assignee workload row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeSummary {
    pub assignee: String,
    pub account_id: Option<String>,
    pub avatar_url: Option<String>,
    pub total_cards: u32,
    pub done_cards: u32,
    pub in_progress_cards: u32,
    pub time_spent_hours: u64,
}

/// Per-status count row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub status: String,
    pub count: u32,
}
