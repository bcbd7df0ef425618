//! In-memory storage implementation
//!
//! Backs development and the test suite. Uniqueness constraints (record
//! ids, account email, one assignment log per project) are enforced under
//! the collection's write lock, which is what the id allocator's
//! conflict-retry loop relies on.

use crate::error::{StoreError, StoreResult};
use crate::traits::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use taskforge_types::{
    Account, AccountId, AssignmentId, AssignmentLog, EntityClass, Project, ProjectId, Task,
    TaskId, Team, TeamId,
};
use tokio::sync::RwLock;

/// In-memory storage for development and testing.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    teams: Arc<RwLock<HashMap<TeamId, Team>>>,
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
    assignments: Arc<RwLock<HashMap<AssignmentId, AssignmentLog>>>,
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn max_suffix<'a, I>(class: EntityClass, ids: I) -> Option<u64>
where
    I: Iterator<Item = &'a str>,
{
    ids.filter_map(|id| class.parse_number(id)).max()
}

#[async_trait]
impl IdSequenceStore for InMemoryStore {
    async fn max_id_number(&self, class: EntityClass) -> StoreResult<Option<u64>> {
        let max = match class {
            EntityClass::Account => {
                let accounts = self.accounts.read().await;
                max_suffix(class, accounts.keys().map(|id| id.as_str()))
            }
            EntityClass::Team => {
                let teams = self.teams.read().await;
                max_suffix(class, teams.keys().map(|id| id.as_str()))
            }
            EntityClass::Project => {
                let projects = self.projects.read().await;
                max_suffix(class, projects.keys().map(|id| id.as_str()))
            }
            EntityClass::Assignment => {
                let assignments = self.assignments.read().await;
                max_suffix(class, assignments.keys().map(|id| id.as_str()))
            }
            EntityClass::Task => {
                let tasks = self.tasks.read().await;
                max_suffix(class, tasks.keys().map(|id| id.as_str()))
            }
        };
        Ok(max)
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn get_account(&self, id: &AccountId) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id).cloned())
    }

    async fn get_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn list_accounts(&self) -> StoreResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn insert_account(&self, account: Account) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.id) {
            return Err(StoreError::Conflict(format!(
                "account id {} already exists",
                account.id
            )));
        }
        if accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::Conflict(format!(
                "email {} already registered",
                account.email
            )));
        }
        accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn update_account(&self, account: Account) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        if !accounts.contains_key(&account.id) {
            return Err(StoreError::NotFound(format!(
                "account {} not found",
                account.id
            )));
        }
        if accounts
            .values()
            .any(|a| a.email == account.email && a.id != account.id)
        {
            return Err(StoreError::Conflict(format!(
                "email {} already registered",
                account.email
            )));
        }
        accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn delete_account(&self, id: &AccountId) -> StoreResult<bool> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.remove(id).is_some())
    }
}

#[async_trait]
impl TeamStore for InMemoryStore {
    async fn get_team(&self, id: &TeamId) -> StoreResult<Option<Team>> {
        let teams = self.teams.read().await;
        Ok(teams.get(id).cloned())
    }

    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        let teams = self.teams.read().await;
        let mut all: Vec<Team> = teams.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn list_teams_created_by(&self, creator: &AccountId) -> StoreResult<Vec<Team>> {
        let teams = self.teams.read().await;
        Ok(teams
            .values()
            .filter(|t| &t.created_by == creator)
            .cloned()
            .collect())
    }

    async fn leads_any_team(&self, id: &AccountId) -> StoreResult<bool> {
        let teams = self.teams.read().await;
        Ok(teams.values().any(|t| t.team_leader.contains(id)))
    }

    async fn member_of_any_team(&self, id: &AccountId) -> StoreResult<bool> {
        let teams = self.teams.read().await;
        Ok(teams.values().any(|t| t.members.contains(id)))
    }

    async fn insert_team(&self, team: Team) -> StoreResult<()> {
        let mut teams = self.teams.write().await;
        if teams.contains_key(&team.id) {
            return Err(StoreError::Conflict(format!(
                "team id {} already exists",
                team.id
            )));
        }
        teams.insert(team.id.clone(), team);
        Ok(())
    }

    async fn update_team(&self, team: Team) -> StoreResult<()> {
        let mut teams = self.teams.write().await;
        if !teams.contains_key(&team.id) {
            return Err(StoreError::NotFound(format!("team {} not found", team.id)));
        }
        teams.insert(team.id.clone(), team);
        Ok(())
    }

    async fn delete_team(&self, id: &TeamId) -> StoreResult<bool> {
        let mut teams = self.teams.write().await;
        Ok(teams.remove(id).is_some())
    }
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn get_project(&self, id: &ProjectId) -> StoreResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.get(id).cloned())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let projects = self.projects.read().await;
        let mut all: Vec<Project> = projects.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn list_projects_created_by(&self, creator: &AccountId) -> StoreResult<Vec<Project>> {
        let projects = self.projects.read().await;
        Ok(projects
            .values()
            .filter(|p| &p.created_by == creator)
            .cloned()
            .collect())
    }

    async fn insert_project(&self, project: Project) -> StoreResult<()> {
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id) {
            return Err(StoreError::Conflict(format!(
                "project id {} already exists",
                project.id
            )));
        }
        projects.insert(project.id.clone(), project);
        Ok(())
    }

    async fn update_project(&self, project: Project) -> StoreResult<()> {
        let mut projects = self.projects.write().await;
        if !projects.contains_key(&project.id) {
            return Err(StoreError::NotFound(format!(
                "project {} not found",
                project.id
            )));
        }
        projects.insert(project.id.clone(), project);
        Ok(())
    }

    async fn delete_project(&self, id: &ProjectId) -> StoreResult<bool> {
        let mut projects = self.projects.write().await;
        Ok(projects.remove(id).is_some())
    }
}

#[async_trait]
impl AssignmentStore for InMemoryStore {
    async fn get_assignment(&self, id: &AssignmentId) -> StoreResult<Option<AssignmentLog>> {
        let assignments = self.assignments.read().await;
        Ok(assignments.get(id).cloned())
    }

    async fn get_assignment_for_project(
        &self,
        project_id: &ProjectId,
    ) -> StoreResult<Option<AssignmentLog>> {
        let assignments = self.assignments.read().await;
        Ok(assignments
            .values()
            .find(|log| &log.project_id == project_id)
            .cloned())
    }

    async fn list_assignments(&self) -> StoreResult<Vec<AssignmentLog>> {
        let assignments = self.assignments.read().await;
        let mut all: Vec<AssignmentLog> = assignments.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn list_assignments_for_team(
        &self,
        team_id: &TeamId,
    ) -> StoreResult<Vec<AssignmentLog>> {
        let assignments = self.assignments.read().await;
        Ok(assignments
            .values()
            .filter(|log| &log.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn list_assignments_for_team_projects(
        &self,
        team_id: &TeamId,
        project_ids: &[ProjectId],
    ) -> StoreResult<Vec<AssignmentLog>> {
        let assignments = self.assignments.read().await;
        Ok(assignments
            .values()
            .filter(|log| &log.team_id == team_id && project_ids.contains(&log.project_id))
            .cloned()
            .collect())
    }

    async fn insert_assignment(&self, log: AssignmentLog) -> StoreResult<()> {
        let mut assignments = self.assignments.write().await;
        if assignments.contains_key(&log.id) {
            return Err(StoreError::Conflict(format!(
                "assignment id {} already exists",
                log.id
            )));
        }
        // Uniqueness constraint on project_id: a second concurrent assign
        // for the same project must lose here, not overwrite.
        if assignments
            .values()
            .any(|existing| existing.project_id == log.project_id)
        {
            return Err(StoreError::Conflict(format!(
                "project {} is already assigned",
                log.project_id
            )));
        }
        assignments.insert(log.id.clone(), log);
        Ok(())
    }

    async fn update_assignment(&self, log: AssignmentLog) -> StoreResult<()> {
        let mut assignments = self.assignments.write().await;
        if !assignments.contains_key(&log.id) {
            return Err(StoreError::NotFound(format!(
                "assignment {} not found",
                log.id
            )));
        }
        assignments.insert(log.id.clone(), log);
        Ok(())
    }

    async fn delete_assignment(&self, id: &AssignmentId) -> StoreResult<bool> {
        let mut assignments = self.assignments.write().await;
        Ok(assignments.remove(id).is_some())
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn get_task(&self, id: &TaskId) -> StoreResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(id).cloned())
    }

    async fn list_tasks_for_project(&self, project_id: &ProjectId) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .values()
            .filter(|t| &t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, task: Task) -> StoreResult<()> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(StoreError::Conflict(format!(
                "task id {} already exists",
                task.id
            )));
        }
        tasks.insert(task.id.clone(), task);
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> StoreResult<bool> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.remove(id).is_some())
    }

    async fn delete_tasks(&self, ids: &[TaskId]) -> StoreResult<usize> {
        let mut tasks = self.tasks.write().await;
        let mut removed = 0;
        for id in ids {
            if tasks.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

impl Store for InMemoryStore {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeSet;
    use taskforge_types::{AccountClass, ProjectStatus, TaskStatus};

    fn account(id: &str, email: &str) -> Account {
        Account {
            id: AccountId::new(id),
            first_name: "Test".to_string(),
            last_name: "Account".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            contact: None,
            avatar: None,
            class: AccountClass::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn team(id: &str, creator: &str) -> Team {
        Team {
            id: TeamId::new(id),
            name: "Team".to_string(),
            team_leader: BTreeSet::new(),
            members: BTreeSet::new(),
            created_by: AccountId::new(creator),
            created_at: Utc::now(),
        }
    }

    fn project(id: &str, creator: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            title: "Project".to_string(),
            description: String::new(),
            status: ProjectStatus::Unassigned,
            created_by: AccountId::new(creator),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn log(id: &str, project: &str, team: &str) -> AssignmentLog {
        AssignmentLog {
            id: AssignmentId::new(id),
            project_id: ProjectId::new(project),
            team_id: TeamId::new(team),
            assigned_by: AccountId::new("User-00002"),
            deadline: Utc::now(),
            task_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_account_crud_and_email_uniqueness() {
        let store = InMemoryStore::new();
        store
            .insert_account(account("User-00001", "a@example.com"))
            .await
            .unwrap();

        // Duplicate email rejected even under a fresh id.
        let err = store
            .insert_account(account("User-00002", "a@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let by_email = store.get_account_by_email("a@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, AccountId::new("User-00001"));

        assert!(store
            .delete_account(&AccountId::new("User-00001"))
            .await
            .unwrap());
        assert!(!store
            .delete_account(&AccountId::new("User-00001"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_max_id_number_ignores_foreign_prefixes() {
        let store = InMemoryStore::new();
        store
            .insert_account(account("User-00007", "a@example.com"))
            .await
            .unwrap();
        store.insert_team(team("Team-00003", "User-00007")).await.unwrap();

        assert_eq!(
            store.max_id_number(EntityClass::Account).await.unwrap(),
            Some(7)
        );
        assert_eq!(
            store.max_id_number(EntityClass::Team).await.unwrap(),
            Some(3)
        );
        assert_eq!(store.max_id_number(EntityClass::Task).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_team_participation_queries() {
        let store = InMemoryStore::new();
        let mut t = team("Team-00001", "User-00002");
        t.team_leader.insert(AccountId::new("User-00010"));
        t.members.insert(AccountId::new("User-00011"));
        store.insert_team(t).await.unwrap();

        assert!(store
            .leads_any_team(&AccountId::new("User-00010"))
            .await
            .unwrap());
        assert!(!store
            .leads_any_team(&AccountId::new("User-00011"))
            .await
            .unwrap());
        assert!(store
            .member_of_any_team(&AccountId::new("User-00011"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_assignment_project_uniqueness() {
        let store = InMemoryStore::new();
        store
            .insert_assignment(log("AP-00001", "Project-00001", "Team-00001"))
            .await
            .unwrap();

        // Second log for the same project loses, even for another team.
        let err = store
            .insert_assignment(log("AP-00002", "Project-00001", "Team-00002"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let active = store
            .get_assignment_for_project(&ProjectId::new("Project-00001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.id, AssignmentId::new("AP-00001"));
    }

    #[tokio::test]
    async fn test_delete_tasks_skips_missing() {
        let store = InMemoryStore::new();
        let task = Task {
            id: TaskId::new("Task-00001"),
            title: "t".to_string(),
            description: String::new(),
            assigned_to: BTreeSet::new(),
            project_id: ProjectId::new("Project-00001"),
            status: TaskStatus::Pending,
            created_at: Utc::now(),
        };
        store.insert_task(task).await.unwrap();

        let removed = store
            .delete_tasks(&[TaskId::new("Task-00001"), TaskId::new("Task-00099")])
            .await
            .unwrap();
        assert_eq!(removed, 1);

        // Re-driving the same delete is a clean no-op.
        let removed = store
            .delete_tasks(&[TaskId::new("Task-00001"), TaskId::new("Task-00099")])
            .await
            .unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_project_update_requires_existing() {
        let store = InMemoryStore::new();
        let err = store
            .update_project(project("Project-00001", "User-00002"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
