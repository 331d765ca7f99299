//! Test utilities and fixtures for sprintboard tests

#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::{json, Value};
use sprintboard::data::{Assignee, Board, Issue, Snapshot, Sprint, SprintProgress};

/// Issue with an assignee identified by display name only
pub fn issue(id: &str, status: &str, assignee: Option<&str>, seconds: u64) -> Issue {
    Issue {
        id: id.to_string(),
        status: status.to_string(),
        assignee: assignee.map(|name| Assignee {
            account_id: Some(format!("acc-{}", name.to_lowercase())),
            display_name: name.to_string(),
            avatar_url: None,
        }),
        time_spent_seconds: seconds,
    }
}

/// Snapshot for project `project_id` holding `issues`
pub fn snapshot(project_id: &str, issues: Vec<Issue>) -> Snapshot {
    Snapshot {
        project_id: project_id.to_string(),
        board: Board {
            id: "7".to_string(),
            location_name: "Platform Team".to_string(),
        },
        sprint: Sprint {
            id: "42".to_string(),
            name: "Sprint 42".to_string(),
            number: Some("42".to_string()),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 16),
        },
        progress: Some(SprintProgress {
            completed: 40.0,
            blocked: 10.0,
            in_progress: 50.0,
        }),
        issues,
    }
}

/// The mixed sprint used across tests:
/// Ana has 2 active cards (1 DONE, 1 IN PROGRESS) and a cancelled one,
/// Ben has 1 TODO card, one card is unassigned.
pub fn sample_issues() -> Vec<Issue> {
    vec![
        issue("1", "DONE", Some("Ana"), 3600),
        issue("2", "IN PROGRESS", Some("Ana"), 5400),
        issue("3", "CANCELADO", Some("Ana"), 7200),
        issue("4", "TO DO", Some("Ben"), 0),
        issue("5", "DONE", None, 1800),
    ]
}

/// Raw tracker issue as returned by the current-work endpoint
pub fn issue_json(key: &str, status: &str, assignee: Option<&str>, seconds: Option<u64>) -> Value {
    let assignee = assignee.map(|name| {
        json!({
            "accountId": format!("acc-{}", name.to_lowercase()),
            "displayName": name,
            "avatarUrls": {
                "16x16": format!("https://avatars.example/{}/16", name),
                "48x48": format!("https://avatars.example/{}/48", name),
            }
        })
    });
    let timetracking = match seconds {
        Some(s) => json!({ "timeSpentSeconds": s }),
        None => json!({}),
    };
    json!({
        "id": format!("100{}", key.trim_start_matches("PRJ-")),
        "key": key,
        "fields": {
            "status": { "name": status },
            "assignee": assignee,
            "timetracking": timetracking,
        }
    })
}

/// Full current-work body with an active sprint
pub fn current_work_json(issues: Vec<Value>) -> Value {
    json!({
        "board": { "id": 7, "location": { "name": "Platform Team" } },
        "activeSprint": {
            "id": 42,
            "name": "Sprint 42",
            "sprintNumber": 42,
            "startDate": "2026-03-02T09:00:00.000Z",
            "endDate": "2026-03-16T18:00:00.000Z"
        },
        "issues": issues,
        "progress": { "completed": 40.0, "blocked": 10.0, "inProgress": 50.0 }
    })
}
