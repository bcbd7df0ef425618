//! Storage trait definitions
//!
//! One trait per record collection, combined into [`Store`]. Backends offer
//! plain per-collection CRUD only; cross-collection consistency is the
//! cascade engine's job. Delete operations return whether a record was
//! removed so cascades stay idempotent: deleting an already-absent record
//! is `Ok(false)`, never an error.

use crate::error::StoreResult;
use async_trait::async_trait;
use taskforge_types::{
    Account, AccountId, AssignmentId, AssignmentLog, EntityClass, Project, ProjectId, Task,
    TaskId, Team, TeamId,
};

/// Combined storage trait.
#[async_trait]
pub trait Store:
    AccountStore
    + TeamStore
    + ProjectStore
    + AssignmentStore
    + TaskStore
    + IdSequenceStore
    + Send
    + Sync
{
}

/// Maximum-identifier reads backing the id allocator.
#[async_trait]
pub trait IdSequenceStore: Send + Sync {
    /// Largest numeric id suffix currently stored for the class, if any.
    async fn max_id_number(&self, class: EntityClass) -> StoreResult<Option<u64>>;
}

/// Storage for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get_account(&self, id: &AccountId) -> StoreResult<Option<Account>>;

    /// Lookup by lowercased email.
    async fn get_account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    async fn list_accounts(&self) -> StoreResult<Vec<Account>>;

    /// Insert a new account. Fails with Conflict if the id or email is
    /// already taken.
    async fn insert_account(&self, account: Account) -> StoreResult<()>;

    /// Replace an existing account. Fails with NotFound if absent and with
    /// Conflict if the email now collides with another account.
    async fn update_account(&self, account: Account) -> StoreResult<()>;

    async fn delete_account(&self, id: &AccountId) -> StoreResult<bool>;
}

/// Storage for teams.
#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn get_team(&self, id: &TeamId) -> StoreResult<Option<Team>>;

    async fn list_teams(&self) -> StoreResult<Vec<Team>>;

    async fn list_teams_created_by(&self, creator: &AccountId) -> StoreResult<Vec<Team>>;

    /// Whether the account id appears in any team's leader set.
    async fn leads_any_team(&self, id: &AccountId) -> StoreResult<bool>;

    /// Whether the account id appears in any team's member set.
    async fn member_of_any_team(&self, id: &AccountId) -> StoreResult<bool>;

    /// Insert a new team. Fails with Conflict if the id is taken.
    async fn insert_team(&self, team: Team) -> StoreResult<()>;

    /// Replace an existing team. Fails with NotFound if absent.
    async fn update_team(&self, team: Team) -> StoreResult<()>;

    async fn delete_team(&self, id: &TeamId) -> StoreResult<bool>;
}

/// Storage for projects.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn get_project(&self, id: &ProjectId) -> StoreResult<Option<Project>>;

    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    async fn list_projects_created_by(&self, creator: &AccountId) -> StoreResult<Vec<Project>>;

    /// Insert a new project. Fails with Conflict if the id is taken.
    async fn insert_project(&self, project: Project) -> StoreResult<()>;

    /// Replace an existing project. Fails with NotFound if absent.
    async fn update_project(&self, project: Project) -> StoreResult<()>;

    async fn delete_project(&self, id: &ProjectId) -> StoreResult<bool>;
}

/// Storage for assignment logs.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn get_assignment(&self, id: &AssignmentId) -> StoreResult<Option<AssignmentLog>>;

    /// The active log for a project, if one exists. Uniqueness on
    /// `project_id` guarantees at most one.
    async fn get_assignment_for_project(
        &self,
        project_id: &ProjectId,
    ) -> StoreResult<Option<AssignmentLog>>;

    async fn list_assignments(&self) -> StoreResult<Vec<AssignmentLog>>;

    async fn list_assignments_for_team(&self, team_id: &TeamId)
        -> StoreResult<Vec<AssignmentLog>>;

    /// Logs matching the team and any of the given projects.
    async fn list_assignments_for_team_projects(
        &self,
        team_id: &TeamId,
        project_ids: &[ProjectId],
    ) -> StoreResult<Vec<AssignmentLog>>;

    /// Insert a new log. Fails with Conflict if the id is taken or another
    /// log already references the same project.
    async fn insert_assignment(&self, log: AssignmentLog) -> StoreResult<()>;

    /// Replace an existing log (e.g. appending an owned task id). Fails
    /// with NotFound if absent.
    async fn update_assignment(&self, log: AssignmentLog) -> StoreResult<()>;

    async fn delete_assignment(&self, id: &AssignmentId) -> StoreResult<bool>;
}

/// Storage for tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get_task(&self, id: &TaskId) -> StoreResult<Option<Task>>;

    async fn list_tasks_for_project(&self, project_id: &ProjectId) -> StoreResult<Vec<Task>>;

    /// Insert a new task. Fails with Conflict if the id is taken.
    async fn insert_task(&self, task: Task) -> StoreResult<()>;

    async fn delete_task(&self, id: &TaskId) -> StoreResult<bool>;

    /// Delete a batch of tasks, returning how many existed. Missing ids are
    /// skipped silently so a re-driven cascade is a no-op.
    async fn delete_tasks(&self, ids: &[TaskId]) -> StoreResult<usize>;
}
