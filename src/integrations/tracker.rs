use crate::config::ApiConfig;
use crate::data::{Assignee, Board, Issue, Project, Snapshot, Sprint, SprintProgress};
use crate::error::{DataError, FetchError, ReportError};
use crate::integrations::HTTP_CLIENT;
use chrono::{DateTime, NaiveDate};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const PREFERRED_AVATAR_SIZE: &str = "48x48";

// Type-safe response structures for the tracker proxy API

/// Ids arrive as strings from some boards and as numbers from others
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(i64),
}

impl IdValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: IdValue,
    name: String,
}

/// Body of `GET /projects/{id}/current-work`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWorkResponse {
    board: Option<BoardNode>,
    active_sprint: Option<SprintNode>,
    #[serde(default)]
    issues: Vec<serde_json::Value>,
    progress: Option<ProgressNode>,
}

#[derive(Debug, Deserialize)]
struct BoardNode {
    id: IdValue,
    location: Option<LocationNode>,
}

#[derive(Debug, Deserialize)]
struct LocationNode {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SprintNode {
    id: IdValue,
    name: String,
    sprint_number: Option<IdValue>,
    #[serde(alias = "releaseStartDate")]
    start_date: Option<String>,
    #[serde(alias = "releaseEndDate")]
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressNode {
    completed: Option<f64>,
    blocked: Option<f64>,
    in_progress: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    id: Option<IdValue>,
    key: Option<String>,
    fields: Option<FieldsNode>,
}

#[derive(Debug, Deserialize)]
struct FieldsNode {
    status: Option<StatusNode>,
    assignee: Option<AssigneeNode>,
    timetracking: Option<TimeTrackingNode>,
}

#[derive(Debug, Deserialize)]
struct StatusNode {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssigneeNode {
    account_id: Option<String>,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    avatar_urls: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeTrackingNode {
    time_spent_seconds: Option<u64>,
}

fn endpoint(config: &ApiConfig, path: &str) -> String {
    format!("{}/{}", config.base_url.trim_end_matches('/'), path)
}

fn get(config: &ApiConfig, url: &str) -> reqwest::RequestBuilder {
    let request = HTTP_CLIENT
        .get(url)
        .timeout(Duration::from_secs(config.timeout_secs))
        .header("Accept", "application/json");
    match &config.token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Fetch every project the tracker exposes (unsorted)
pub async fn fetch_projects(config: &ApiConfig) -> Result<Vec<Project>, FetchError> {
    let url = endpoint(config, "projects");
    tracing::debug!("GET {}", url);

    let response = get(config, &url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status {
            status: response.status().as_u16(),
        });
    }

    let nodes: Vec<ProjectNode> = response.json().await?;
    Ok(nodes
        .into_iter()
        .map(|n| Project {
            id: n.id.into_string(),
            name: n.name,
        })
        .collect())
}

/// Fetch the active sprint's work for a project and turn it into a snapshot
pub async fn fetch_current_work(config: &ApiConfig, project_id: &str) -> Result<Snapshot, ReportError> {
    let url = endpoint(
        config,
        &format!("projects/{}/current-work", urlencoding::encode(project_id)),
    );
    tracing::debug!("GET {}", url);

    let response = get(config, &url).send().await.map_err(FetchError::from)?;
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ReportError::NoActiveSprint {
            project_id: project_id.to_string(),
        });
    }
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        }
        .into());
    }

    let body: CurrentWorkResponse = response.json().await.map_err(FetchError::from)?;
    parse_current_work(project_id, body)
}

/// Validate a current-work body into a snapshot.
///
/// A missing active sprint is its own outcome. Any malformed issue rejects the
/// whole snapshot.
pub fn parse_current_work(project_id: &str, body: CurrentWorkResponse) -> Result<Snapshot, ReportError> {
    let Some(sprint) = body.active_sprint else {
        return Err(ReportError::NoActiveSprint {
            project_id: project_id.to_string(),
        });
    };

    let board = body
        .board
        .ok_or_else(|| DataError::new("response", "missing board"))?;

    let issues = body
        .issues
        .into_iter()
        .enumerate()
        .map(|(index, value)| parse_issue(index, value))
        .collect::<Result<Vec<_>, _>>()?;

    let progress = body.progress.map(|p| SprintProgress {
        completed: p.completed.unwrap_or(0.0),
        blocked: p.blocked.unwrap_or(0.0),
        in_progress: p.in_progress.unwrap_or(0.0),
    });

    Ok(Snapshot {
        project_id: project_id.to_string(),
        board: Board {
            id: board.id.into_string(),
            location_name: board
                .location
                .and_then(|l| l.name)
                .unwrap_or_default(),
        },
        sprint: parse_sprint(sprint)?,
        progress,
        issues,
    })
}

fn parse_sprint(node: SprintNode) -> Result<Sprint, DataError> {
    Ok(Sprint {
        id: node.id.into_string(),
        start_date: node.start_date.as_deref().map(parse_sprint_date).transpose()?,
        end_date: node.end_date.as_deref().map(parse_sprint_date).transpose()?,
        number: node.sprint_number.map(IdValue::into_string),
        name: node.name,
    })
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date
fn parse_sprint_date(raw: &str) -> Result<NaiveDate, DataError> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DataError::new("sprint", format!("invalid date {:?}", raw)))
}

/// Parse one raw issue record. `index` names the record when it has no id.
pub fn parse_issue(index: usize, value: serde_json::Value) -> Result<Issue, DataError> {
    let position = format!("#{}", index);
    let node: IssueNode =
        serde_json::from_value(value).map_err(|e| DataError::new(&position, e.to_string()))?;

    let label = node.key.clone().unwrap_or(position);
    let id = node
        .id
        .map(IdValue::into_string)
        .ok_or_else(|| DataError::new(&label, "missing id"))?;
    let fields = node
        .fields
        .ok_or_else(|| DataError::new(&label, "missing fields"))?;
    let status = fields
        .status
        .and_then(|s| s.name)
        .ok_or_else(|| DataError::new(&label, "missing status"))?;

    let assignee = fields.assignee.map(|a| Assignee {
        account_id: a.account_id,
        display_name: a.display_name,
        avatar_url: pick_avatar(&a.avatar_urls),
    });

    Ok(Issue {
        id,
        status,
        assignee,
        time_spent_seconds: fields
            .timetracking
            .and_then(|t| t.time_spent_seconds)
            .unwrap_or(0),
    })
}

/// Prefer the 48x48 avatar, else the largest listed size.
///
/// Equal or unparseable edges fall back to the greatest size key so the pick
/// does not depend on map iteration order.
fn pick_avatar(urls: &HashMap<String, String>) -> Option<String> {
    if let Some(url) = urls.get(PREFERRED_AVATAR_SIZE) {
        return Some(url.clone());
    }
    urls.iter()
        .max_by_key(|(size, _)| (avatar_edge(size), size.as_str()))
        .map(|(_, url)| url.clone())
}

fn avatar_edge(size: &str) -> u32 {
    size.split('x')
        .next()
        .and_then(|edge| edge.parse().ok())
        .unwrap_or(0)
}
