//! Cascade engine
//!
//! Orchestrates the multi-collection state transitions (assign, unassign,
//! delete-team, delete-account) over a store that only offers
//! per-collection atomicity. The fixed delete order is Tasks, then
//! AssignmentLogs, then Teams/Projects: an interruption mid-cascade never
//! leaves a live record pointing at a dead one, and because every delete
//! step is idempotent a crashed cascade can be re-run from the top.

use crate::error::{EngineError, EngineResult};
use crate::report::{BatchOutcome, BatchReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use taskforge_store::{
    allocator, AccountStore, AssignmentStore, ProjectStore, Store, TaskStore, TeamStore,
};
use taskforge_types::{
    AccountClass, AccountId, AssignmentId, AssignmentLog, EntityClass, ProjectId, ProjectStatus,
    TaskId, TeamId,
};

/// Record counts removed by a cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeStats {
    pub tasks_deleted: usize,
    pub logs_deleted: usize,
    pub teams_deleted: usize,
    pub projects_deleted: usize,
}

/// The consistency core over the five collections.
pub struct CascadeEngine {
    store: Arc<dyn Store>,
}

impl CascadeEngine {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Bind a project to a team by inserting one assignment log.
    ///
    /// Preconditions: project and team exist, and no active log references
    /// the project. Two concurrent assignments for the same project race
    /// past the precondition check at most once; the store's uniqueness
    /// constraint on `project_id` makes the loser's insert fail with
    /// Conflict rather than silently overwriting.
    pub async fn assign_project(
        &self,
        project_id: &ProjectId,
        team_id: &TeamId,
        deadline: DateTime<Utc>,
        assigned_by: &AccountId,
    ) -> EngineResult<AssignmentLog> {
        let mut project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("project {} not found", project_id)))?;

        if self.store.get_team(team_id).await?.is_none() {
            return Err(EngineError::NotFound(format!("team {} not found", team_id)));
        }

        if self
            .store
            .get_assignment_for_project(project_id)
            .await?
            .is_some()
        {
            return Err(EngineError::Conflict(format!(
                "project {} is already assigned",
                project_id
            )));
        }

        let store = self.store.as_ref();
        let allocated = allocator::allocate_and_insert(store, EntityClass::Assignment, |id| {
            let log = AssignmentLog {
                id: AssignmentId::new(id),
                project_id: project_id.clone(),
                team_id: team_id.clone(),
                assigned_by: assigned_by.clone(),
                deadline,
                task_ids: Vec::new(),
                created_at: Utc::now(),
            };
            async move { store.insert_assignment(log).await }
        })
        .await;

        let log_id = match allocated {
            Ok(id) => AssignmentId::new(id),
            Err(err) if err.is_conflict() => {
                // Either the id space was contended or a concurrent assign
                // for this project won; report the latter precisely.
                if self
                    .store
                    .get_assignment_for_project(project_id)
                    .await?
                    .is_some()
                {
                    return Err(EngineError::Conflict(format!(
                        "project {} is already assigned",
                        project_id
                    )));
                }
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        project.status = ProjectStatus::Assigned;
        project.updated_at = Utc::now();
        self.store.update_project(project).await?;

        let log = self
            .store
            .get_assignment(&log_id)
            .await?
            .ok_or_else(|| EngineError::Internal("assignment vanished after insert".into()))?;

        tracing::info!(
            project_id = %project_id,
            team_id = %team_id,
            assignment_id = %log.id,
            "project assigned"
        );

        Ok(log)
    }

    /// Unbind projects from a team: delete the owned tasks, then the logs,
    /// then revert the surviving projects to Unassigned.
    ///
    /// An empty match set is a successful no-op, not an error.
    pub async fn unassign_projects(
        &self,
        team_id: &TeamId,
        project_ids: &[ProjectId],
    ) -> EngineResult<CascadeStats> {
        let logs = self
            .store
            .list_assignments_for_team_projects(team_id, project_ids)
            .await?;

        if logs.is_empty() {
            return Ok(CascadeStats::default());
        }

        let stats = self.remove_logs(&logs, &BTreeSet::new()).await?;

        tracing::info!(
            team_id = %team_id,
            logs = stats.logs_deleted,
            tasks = stats.tasks_deleted,
            "projects unassigned"
        );

        Ok(stats)
    }

    /// Delete a batch of teams with their assignment logs and tasks.
    ///
    /// Authorization is all-or-nothing: every team must exist and be owned
    /// by the requester, otherwise nothing is deleted and the whole call is
    /// rejected.
    pub async fn delete_teams(
        &self,
        team_ids: &[TeamId],
        requester: &AccountId,
    ) -> EngineResult<CascadeStats> {
        let mut teams = Vec::with_capacity(team_ids.len());
        for team_id in team_ids {
            let team = self
                .store
                .get_team(team_id)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("team {} not found", team_id)))?;
            teams.push(team);
        }

        for team in &teams {
            if &team.created_by != requester {
                return Err(EngineError::Forbidden(format!(
                    "team {} is owned by another account",
                    team.id
                )));
            }
        }

        let mut logs = Vec::new();
        for team in &teams {
            logs.extend(self.store.list_assignments_for_team(&team.id).await?);
        }

        let mut stats = self.remove_logs(&logs, &BTreeSet::new()).await?;

        for team in &teams {
            if self.store.delete_team(&team.id).await? {
                stats.teams_deleted += 1;
            }
        }

        tracing::info!(
            requester = %requester,
            teams = stats.teams_deleted,
            logs = stats.logs_deleted,
            tasks = stats.tasks_deleted,
            "teams deleted"
        );

        Ok(stats)
    }

    /// Delete accounts, each id processed independently into a batch
    /// report; one failing id never aborts the rest.
    ///
    /// Project Manager accounts cascade through every team and project
    /// they created and everything reachable from those. Other accounts
    /// lose only their record, plus their id is stripped from all team
    /// leader/member sets so no dangling reference remains.
    pub async fn delete_accounts(&self, ids: &[AccountId]) -> EngineResult<BatchReport> {
        let mut report = BatchReport::default();

        for id in ids {
            match self.delete_one_account(id).await {
                Ok(message) => report.push(BatchOutcome::ok(id.as_str(), message)),
                Err(err) => {
                    tracing::warn!(account_id = %id, error = %err, "account deletion failed");
                    report.push(BatchOutcome::failed(id.as_str(), err.to_string()));
                }
            }
        }

        Ok(report)
    }

    async fn delete_one_account(&self, id: &AccountId) -> EngineResult<String> {
        let account = self
            .store
            .get_account(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("account {} not found", id)))?;

        if account.class == AccountClass::ProjectManager {
            let stats = self.delete_manager_estate(id).await?;
            self.store.delete_account(id).await?;
            return Ok(format!(
                "account deleted with {} teams, {} projects, {} assignment logs, {} tasks",
                stats.teams_deleted,
                stats.projects_deleted,
                stats.logs_deleted,
                stats.tasks_deleted
            ));
        }

        // Strip before deleting the record: a failure mid-strip leaves the
        // account in place, so a re-driven delete reaches the strip again
        // instead of stopping at NotFound.
        self.strip_from_teams(id).await?;
        self.store.delete_account(id).await?;
        Ok("account deleted".to_string())
    }

    /// Cascade over everything a Project Manager created: tasks, then the
    /// logs reachable through its teams or projects, then the teams and
    /// projects themselves.
    async fn delete_manager_estate(&self, manager: &AccountId) -> EngineResult<CascadeStats> {
        let teams = self.store.list_teams_created_by(manager).await?;
        let projects = self.store.list_projects_created_by(manager).await?;

        let owned_projects: BTreeSet<ProjectId> =
            projects.iter().map(|p| p.id.clone()).collect();

        let mut logs = Vec::new();
        let mut seen = BTreeSet::new();
        for team in &teams {
            for log in self.store.list_assignments_for_team(&team.id).await? {
                if seen.insert(log.id.clone()) {
                    logs.push(log);
                }
            }
        }
        for project in &projects {
            if let Some(log) = self.store.get_assignment_for_project(&project.id).await? {
                if seen.insert(log.id.clone()) {
                    logs.push(log);
                }
            }
        }

        // Projects owned by the manager are deleted below; only foreign
        // projects freed by these logs get their status reverted.
        let mut stats = self.remove_logs(&logs, &owned_projects).await?;

        for team in &teams {
            if self.store.delete_team(&team.id).await? {
                stats.teams_deleted += 1;
            }
        }
        for project in &projects {
            if self.store.delete_project(&project.id).await? {
                stats.projects_deleted += 1;
            }
        }

        Ok(stats)
    }

    /// Remove an account id from every team's leader and member sets.
    async fn strip_from_teams(&self, id: &AccountId) -> EngineResult<()> {
        let teams = self.store.list_teams().await?;
        for mut team in teams {
            if team.remove_participant(id) {
                self.store.update_team(team).await?;
            }
        }
        Ok(())
    }

    /// Shared tail of every cascade: delete owned tasks, delete the logs,
    /// then revert surviving projects to Unassigned. Projects listed in
    /// `skip_revert` are about to be deleted by the caller and are left
    /// alone.
    async fn remove_logs(
        &self,
        logs: &[AssignmentLog],
        skip_revert: &BTreeSet<ProjectId>,
    ) -> EngineResult<CascadeStats> {
        let mut stats = CascadeStats::default();

        let task_ids: Vec<TaskId> = logs
            .iter()
            .flat_map(|log| log.task_ids.iter().cloned())
            .collect();
        if !task_ids.is_empty() {
            stats.tasks_deleted = self.store.delete_tasks(&task_ids).await?;
        }

        for log in logs {
            if self.store.delete_assignment(&log.id).await? {
                stats.logs_deleted += 1;
            }
        }

        for log in logs {
            if skip_revert.contains(&log.project_id) {
                continue;
            }
            // The project may already be gone; a missing parent is fine on
            // a re-driven cascade.
            if let Some(mut project) = self.store.get_project(&log.project_id).await? {
                if project.status == ProjectStatus::Assigned {
                    project.status = ProjectStatus::Unassigned;
                    project.updated_at = Utc::now();
                    self.store.update_project(project).await?;
                }
            }
        }

        Ok(stats)
    }
}
