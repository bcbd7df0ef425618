//! Task records and submission state

use crate::ids::{AccountId, ProjectId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Submission state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    Submitted,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => f.write_str("Pending"),
            TaskStatus::Submitted => f.write_str("Submitted"),
            TaskStatus::Completed => f.write_str("Completed"),
        }
    }
}

/// A unit of work owned by a project's assignment log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub assigned_to: BTreeSet<AccountId>,
    /// Owning project context.
    pub project_id: ProjectId,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}
