//! Error taxonomy for report generation.
//!
//! Every variant is recovered at the view model boundary and mapped to a UI
//! state. Application plumbing (config, terminal, files) uses `anyhow`.

/// Failure reaching the project list or work-item provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Connection, timeout or TLS failure
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("tracker returned HTTP {status}")]
    Status { status: u16 },

    /// Body was not the expected JSON
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// A work item that breaks the aggregators' assumptions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed issue {issue}: {reason}")]
pub struct DataError {
    /// Issue id, or its position when the id is absent
    pub issue: String,
    pub reason: String,
}

impl DataError {
    pub fn new(issue: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            reason: reason.into(),
        }
    }
}

/// Why a report could not be produced for the selected project
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Valid response, but the board has no sprint running
    #[error("project {project_id} has no active sprint")]
    NoActiveSprint { project_id: String },

    #[error("report generation failed: {0}")]
    Data(#[from] DataError),
}

impl ReportError {
    /// Short stable code shown in the status bar
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "FETCH_FAILED",
            Self::NoActiveSprint { .. } => "NO_ACTIVE_SPRINT",
            Self::Data(_) => "DATA_ERROR",
        }
    }

    /// Whether re-running the fetch can plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
