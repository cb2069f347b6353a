use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Any status may move to any other; only `Completed` has a side effect
/// (promoting the next pending step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStep {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub order: i64,
    pub status: StepStatus,
    /// Team member name. Not a foreign key: removing the member leaves it dangling.
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub estimated_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectStep {
    pub project_id: String,
    pub name: String,
    pub order: i64,
    pub status: StepStatus,
    pub estimated_days: u32,
}

/// The edits a step accepts. One field per update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepUpdate {
    Status(StepStatus),
    Assignee(Option<String>),
    DueDate(Option<NaiveDate>),
}
