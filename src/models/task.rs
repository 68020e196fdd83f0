use super::columns::task as col;
use super::row::Row;
use crate::errors::{AppError, AppResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Convert enum → stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not started",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Lenient parse of stored or user-typed text.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match key.as_str() {
            "notstarted" | "todo" | "new" | "open" => Some(TaskStatus::NotStarted),
            "inprogress" | "wip" | "started" | "ongoing" => Some(TaskStatus::InProgress),
            "completed" | "complete" | "done" | "closed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    pub fn from_user(s: &str) -> AppResult<Self> {
        Self::parse(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
    }

    /// Completion weight, in halves (0, 1, 2).
    pub fn half_points(&self) -> u64 {
        match self {
            TaskStatus::NotStarted => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Priority {
    #[default]
    Low,
    Important,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Important => "Important",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" => Some(Priority::Low),
            "important" | "medium" | "i" => Some(Priority::Important),
            "urgent" | "high" | "u" => Some(Priority::Urgent),
            _ => None,
        }
    }

    pub fn from_user(s: &str) -> AppResult<Self> {
        Self::parse(s).ok_or_else(|| AppError::InvalidPriority(s.to_string()))
    }
}

/// Typed view over a reconciled `Projects` row.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    pub order: i64,
    pub area: String,
    pub project: String,
    pub task: String,
    pub owner: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub release_date: Option<String>,
    pub due_date: Option<String>,
    pub notes: String,
    pub last_updated: String,
}

impl TaskRow {
    pub fn from_row(row: &Row) -> Self {
        let opt = |c: &str| Some(row.text(c)).filter(|s| !s.is_empty());
        Self {
            order: row.order().unwrap_or_default(),
            area: row.text(col::AREA),
            project: row.text(col::PROJECT),
            task: row.text(col::TASK),
            owner: row.text(col::OWNER),
            status: TaskStatus::parse(&row.text(col::PROGRESS)).unwrap_or_default(),
            priority: Priority::parse(&row.text(col::PRIORITY)).unwrap_or_default(),
            release_date: opt(col::RELEASE_DATE),
            due_date: opt(col::DUE_DATE),
            notes: row.text(col::NOTES),
            last_updated: row.text(col::LAST_UPDATED),
        }
    }
}
