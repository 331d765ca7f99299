//! Removal of cancelled work before any aggregation.

use super::{Issue, CANCELLED_STATUS};

/// Whether an issue sits in the terminal cancellation state
pub fn is_cancelled(issue: &Issue) -> bool {
    issue.status.eq_ignore_ascii_case(CANCELLED_STATUS)
}

/// Drop cancelled issues, keeping the order of the rest.
pub fn filter_active(issues: &[Issue]) -> Vec<&Issue> {
    issues.iter().filter(|i| !is_cancelled(i)).collect()
}

/// Number of issues that survive [`filter_active`], i.e. the "total cards" figure
pub fn active_count(issues: &[Issue]) -> usize {
    issues.iter().filter(|i| !is_cancelled(i)).count()
}
