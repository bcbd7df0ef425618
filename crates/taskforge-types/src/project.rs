//! Project records and display status

use crate::ids::{AccountId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display status of a project.
///
/// Unassigned and Assigned toggle through the cascade engine's assign and
/// unassign operations. Completed is a terminal display state set by
/// task-completion logic outside the consistency core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Unassigned,
    Assigned,
    Completed,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Unassigned => f.write_str("Unassigned"),
            ProjectStatus::Assigned => f.write_str("Assigned"),
            ProjectStatus::Completed => f.write_str("Completed"),
        }
    }
}

/// A project owned by the Project Manager who created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub created_by: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
