//! Assignment log records

use crate::ids::{AccountId, AssignmentId, ProjectId, TaskId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The join record binding one project to one team.
///
/// At most one log may reference a given project at a time; the store
/// enforces this with a uniqueness constraint on `project_id`. The log owns
/// the tasks listed in `task_ids`: deleting the log must first delete those
/// tasks so no task outlives its assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentLog {
    pub id: AssignmentId,
    pub project_id: ProjectId,
    pub team_id: TeamId,
    pub assigned_by: AccountId,
    pub deadline: DateTime<Utc>,
    pub task_ids: Vec<TaskId>,
    pub created_at: DateTime<Utc>,
}
