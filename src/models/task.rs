use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::datetime;

/// Rows per page of a paginated listing.
pub const PAGE_SIZE: i64 = 3;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Serial identifier assigned by the database.
    pub id: i32,
    /// Identifier of the user who created the task. Never changes.
    #[sqlx(rename = "id_user")]
    pub user_id: Uuid,
    pub header: String,
    pub description: String,
    /// Set by the database on insert.
    pub created_at: DateTime<Utc>,
    /// When the task is scheduled to start, in the client's local time.
    #[serde(with = "datetime")]
    pub start_date: NaiveDateTime,
    pub done: bool,
}

/// Input structure for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTask {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub header: String,

    /// Maximum length of 1000 characters.
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,

    #[serde(with = "datetime")]
    pub start_date: NaiveDateTime,
}

/// Partial update of a task.
///
/// A `None` field is left untouched; `Some` always overwrites, including with
/// an empty string, so a header can be cleared here even though a new task
/// needs one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaskPatch {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub header: Option<String>,

    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, with = "datetime::option")]
    pub start_date: Option<NaiveDateTime>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.description.is_none() && self.start_date.is_none()
    }

    /// Applies the provided fields onto `task`.
    pub fn apply(&self, task: &mut Task) {
        if let Some(header) = &self.header {
            task.header = header.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(start_date) = self.start_date {
            task.start_date = start_date;
        }
    }
}

/// Body of a completion toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub done: bool,
}

/// Per-request listing options. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// 1-based page number; `None` or `Some(0)` disables pagination.
    pub page: Option<u32>,
    /// Completion flag to match.
    pub done: Option<bool>,
    /// Exact `start_date` to match.
    pub date: Option<NaiveDateTime>,
}

/// The repository query variant selected for a listing.
///
/// Paged variants carry the row offset; the page size is fixed at [`PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskListQuery {
    All,
    Page { offset: i64 },
    ByStatus { done: bool },
    ByStatusPage { done: bool, offset: i64 },
    ByDate { date: NaiveDateTime },
    ByDatePage { date: NaiveDateTime, offset: i64 },
    ByDateAndStatus { date: NaiveDateTime, done: bool },
    ByDateAndStatusPage { date: NaiveDateTime, done: bool, offset: i64 },
}

impl TaskListQuery {
    pub fn done(&self) -> Option<bool> {
        match *self {
            TaskListQuery::ByStatus { done }
            | TaskListQuery::ByStatusPage { done, .. }
            | TaskListQuery::ByDateAndStatus { done, .. }
            | TaskListQuery::ByDateAndStatusPage { done, .. } => Some(done),
            _ => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        match *self {
            TaskListQuery::ByDate { date }
            | TaskListQuery::ByDatePage { date, .. }
            | TaskListQuery::ByDateAndStatus { date, .. }
            | TaskListQuery::ByDateAndStatusPage { date, .. } => Some(date),
            _ => None,
        }
    }

    pub fn offset(&self) -> Option<i64> {
        match *self {
            TaskListQuery::Page { offset }
            | TaskListQuery::ByStatusPage { offset, .. }
            | TaskListQuery::ByDatePage { offset, .. }
            | TaskListQuery::ByDateAndStatusPage { offset, .. } => Some(offset),
            _ => None,
        }
    }

    /// Whether `task` satisfies the filter part of this query (owner excluded).
    pub fn matches(&self, task: &Task) -> bool {
        self.done().map_or(true, |done| task.done == done)
            && self.date().map_or(true, |date| task.start_date == date)
    }
}
