//! Grouping of a snapshot's issues into summary rows.
//!
//! Both aggregators drop cancelled issues first and keep groups in the order
//! their key first appears in the input. Sorting is left to the table model.

use super::filter::filter_active;
use super::{AssigneeSummary, Issue, IssueProgress, StatusSummary};
use indexmap::IndexMap;

const SECONDS_PER_HOUR: u64 = 3600;

/// Running counters for one assignee while folding over issues
#[derive(Debug, Default)]
struct AssigneeTally {
    account_id: Option<String>,
    avatar_url: Option<String>,
    total_cards: u32,
    done_cards: u32,
    in_progress_cards: u32,
    time_spent_seconds: u64,
}

/// Group active issues by assignee display name.
pub fn group_by_assignee(issues: &[Issue]) -> Vec<AssigneeSummary> {
    let mut tallies: IndexMap<&str, AssigneeTally> = IndexMap::new();

    for issue in filter_active(issues) {
        let tally = tallies
            .entry(issue.assignee_name())
            .or_insert_with(|| AssigneeTally {
                // Identity fields come from the first issue seen for this person
                account_id: issue.assignee.as_ref().and_then(|a| a.account_id.clone()),
                avatar_url: issue.assignee.as_ref().and_then(|a| a.avatar_url.clone()),
                ..AssigneeTally::default()
            });

        tally.total_cards += 1;
        tally.time_spent_seconds = tally.time_spent_seconds.saturating_add(issue.time_spent_seconds);
        match issue.progress() {
            IssueProgress::Done => tally.done_cards += 1,
            IssueProgress::InProgress => tally.in_progress_cards += 1,
            IssueProgress::Cancelled | IssueProgress::Other => {}
        }
    }

    tallies
        .into_iter()
        .map(|(name, tally)| AssigneeSummary {
            assignee: name.to_string(),
            account_id: tally.account_id,
            avatar_url: tally.avatar_url,
            total_cards: tally.total_cards,
            done_cards: tally.done_cards,
            in_progress_cards: tally.in_progress_cards,
            // Floor once over the total so partial hours across issues add up
            time_spent_hours: tally.time_spent_seconds / SECONDS_PER_HOUR,
        })
        .collect()
}

/// Count active issues per raw status label.
pub fn count_by_status(issues: &[Issue]) -> Vec<StatusSummary> {
    let mut counts: IndexMap<&str, u32> = IndexMap::new();

    for issue in filter_active(issues) {
        *counts.entry(issue.status.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(status, count)| StatusSummary {
            status: status.to_string(),
            count,
        })
        .collect()
}

/// Assignee row filter applied after aggregation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssigneeFilter {
    #[default]
    All,
    Named(String),
}

impl AssigneeFilter {
    pub fn matches(&self, row: &AssigneeSummary) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => row.assignee == *name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Named(name) => name,
        }
    }
}

impl From<Option<String>> for AssigneeFilter {
    /// `None` and the literal `"All"` both mean no filtering
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) if name != "All" => Self::Named(name),
            _ => Self::All,
        }
    }
}

/// Keep the assignee rows that match the filter, preserving order.
pub fn filter_assignee_rows(rows: &[AssigneeSummary], filter: &AssigneeFilter) -> Vec<AssigneeSummary> {
    rows.iter().filter(|r| filter.matches(r)).cloned().collect()
}
