//! Task, category, and statistics wire types.
//!
//! Field sets mirror what the TaskFlow backend serializes; read-only
//! display fields are optional so both the full task shape and the
//! slimmer create-response shape deserialize into [`Task`].

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet started.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Done; `completed_at` is set server-side.
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// A task as the server serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identity.
    pub id: i64,
    /// Short title.
    pub title: String,
    /// Longer free-form description, may be empty.
    #[serde(default)]
    pub description: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Human-readable status label, server-provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_display: Option<String>,
    /// Priority: 1 = low, 2 = medium, 3 = high.
    #[serde(default = "default_priority")]
    pub priority: i64,
    /// Human-readable priority label, server-provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_display: Option<String>,
    /// Owning username, read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Category id, if assigned.
    #[serde(default)]
    pub category: Option<i64>,
    /// Category name, denormalized by the server.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Due timestamp, if any.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-modified timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Completion timestamp, set when status becomes completed.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_priority() -> i64 {
    2
}

/// Task creation payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTask {
    /// Short title (required).
    pub title: String,
    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial status; server defaults to pending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Priority; server defaults to medium.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Category id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    /// Due timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Full-replace task update payload (PUT semantics).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    /// Short title.
    pub title: String,
    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Category id; `None` clears the assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    /// Due timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// A task category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identity.
    pub id: i64,
    /// Category name, unique per user.
    pub name: String,
    /// Hex color code.
    #[serde(default)]
    pub color: Option<String>,
    /// Owning username, read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Number of tasks in this category, server-computed.
    #[serde(default)]
    pub task_count: Option<i64>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Category creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    /// Category name.
    pub name: String,
    /// Hex color code; server defaults when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Aggregate task statistics, server-computed.
///
/// `Default` is the all-zeros snapshot the store falls back to when the
/// statistics fetch fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Total task count.
    #[serde(default)]
    pub total_tasks: i64,
    /// Count of pending tasks.
    #[serde(default)]
    pub pending_tasks: i64,
    /// Count of in-progress tasks.
    #[serde(default)]
    pub in_progress_tasks: i64,
    /// Count of completed tasks.
    #[serde(default)]
    pub completed_tasks: i64,
    /// Count of overdue tasks (due in the past, not completed).
    #[serde(default)]
    pub overdue_tasks: i64,
    /// Completed / total, as a percentage.
    #[serde(default)]
    pub completion_rate: f64,
    /// Task counts keyed by priority level.
    #[serde(default)]
    pub tasks_by_priority: HashMap<String, i64>,
    /// Task counts keyed by category name.
    #[serde(default)]
    pub tasks_by_category: HashMap<String, i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
