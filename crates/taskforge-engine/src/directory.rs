//! Directory services
//!
//! Record creation and account maintenance. Creation owns the allocator
//! retry loop: the new record is inserted together with its candidate id,
//! and a uniqueness conflict re-allocates against a freshly read maximum.

use crate::error::{EngineError, EngineResult};
use crate::report::{BatchOutcome, BatchReport};
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use taskforge_store::{
    allocator, AccountStore, AssignmentStore, ProjectStore, Store, TaskStore, TeamStore,
};
use taskforge_types::{
    validation, Account, AccountClass, AccountId, AssignmentId, EntityClass, Project, ProjectId,
    ProjectStatus, Task, TaskId, TaskStatus, Team, TeamId,
};

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Already hashed by the caller; the engine never sees a raw password.
    pub password_hash: String,
    pub contact: Option<String>,
    pub avatar: Option<String>,
    pub class: AccountClass,
}

/// One item of an Admin batch account update. `None` fields are left
/// untouched.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub id: AccountId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact: Option<String>,
    pub password_hash: Option<String>,
}

/// Creation and maintenance operations over the five collections.
pub struct Directory {
    store: Arc<dyn Store>,
}

impl Directory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register an account. Email is validated, lowercased, and must be
    /// unique.
    pub async fn create_account(&self, new: NewAccount) -> EngineResult<Account> {
        validation::validate_name(&new.first_name, "first")?;
        validation::validate_name(&new.last_name, "last")?;
        if let Some(contact) = &new.contact {
            validation::validate_contact(contact)?;
        }
        let email = validation::normalize_email(&new.email)?;

        if self.store.get_account_by_email(&email).await?.is_some() {
            return Err(EngineError::Conflict(format!(
                "email {} already registered",
                email
            )));
        }

        let store = self.store.as_ref();
        let id = allocator::allocate_and_insert(store, EntityClass::Account, |candidate| {
            let account = Account {
                id: AccountId::new(candidate),
                first_name: new.first_name.clone(),
                last_name: new.last_name.clone(),
                email: email.clone(),
                password_hash: new.password_hash.clone(),
                contact: new.contact.clone(),
                avatar: new.avatar.clone(),
                class: new.class,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            async move { store.insert_account(account).await }
        })
        .await?;

        let account = self
            .store
            .get_account(&AccountId::new(&*id))
            .await?
            .ok_or_else(|| EngineError::Internal("account vanished after insert".into()))?;

        tracing::info!(account_id = %account.id, class = %account.class, "account registered");
        Ok(account)
    }

    /// Create a team. Every listed leader and member must be an existing
    /// account.
    pub async fn create_team(
        &self,
        name: &str,
        team_leader: BTreeSet<AccountId>,
        members: BTreeSet<AccountId>,
        created_by: &AccountId,
    ) -> EngineResult<Team> {
        validation::validate_non_empty(name, "team name")?;

        for participant in team_leader.union(&members) {
            if self.store.get_account(participant).await?.is_none() {
                return Err(EngineError::NotFound(format!(
                    "account {} not found",
                    participant
                )));
            }
        }

        let store = self.store.as_ref();
        let id = allocator::allocate_and_insert(store, EntityClass::Team, |candidate| {
            let team = Team {
                id: TeamId::new(candidate),
                name: name.trim().to_string(),
                team_leader: team_leader.clone(),
                members: members.clone(),
                created_by: created_by.clone(),
                created_at: Utc::now(),
            };
            async move { store.insert_team(team).await }
        })
        .await?;

        let team = self
            .store
            .get_team(&TeamId::new(&*id))
            .await?
            .ok_or_else(|| EngineError::Internal("team vanished after insert".into()))?;

        tracing::info!(team_id = %team.id, created_by = %created_by, "team created");
        Ok(team)
    }

    /// Create a project in the Unassigned display state.
    pub async fn create_project(
        &self,
        title: &str,
        description: &str,
        created_by: &AccountId,
    ) -> EngineResult<Project> {
        validation::validate_non_empty(title, "project title")?;

        let store = self.store.as_ref();
        let id = allocator::allocate_and_insert(store, EntityClass::Project, |candidate| {
            let project = Project {
                id: ProjectId::new(candidate),
                title: title.trim().to_string(),
                description: description.to_string(),
                status: ProjectStatus::Unassigned,
                created_by: created_by.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            async move { store.insert_project(project).await }
        })
        .await?;

        let project = self
            .store
            .get_project(&ProjectId::new(&*id))
            .await?
            .ok_or_else(|| EngineError::Internal("project vanished after insert".into()))?;

        tracing::info!(project_id = %project.id, created_by = %created_by, "project created");
        Ok(project)
    }

    /// Create a task under an assignment log and append it to the log's
    /// owned task list. Assignees must participate in the assigned team.
    pub async fn create_task(
        &self,
        assignment_id: &AssignmentId,
        title: &str,
        description: &str,
        assigned_to: BTreeSet<AccountId>,
    ) -> EngineResult<Task> {
        validation::validate_non_empty(title, "task title")?;

        let mut log = self
            .store
            .get_assignment(assignment_id)
            .await?
            .ok_or_else(|| {
                EngineError::NotFound(format!("assignment {} not found", assignment_id))
            })?;

        let team = self
            .store
            .get_team(&log.team_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("team {} not found", log.team_id)))?;

        for assignee in &assigned_to {
            if !team.is_leader(assignee) && !team.is_member(assignee) {
                return Err(EngineError::Validation(format!(
                    "account {} is not a participant of team {}",
                    assignee, team.id
                )));
            }
        }

        let store = self.store.as_ref();
        let project_id = log.project_id.clone();
        let id = allocator::allocate_and_insert(store, EntityClass::Task, |candidate| {
            let task = Task {
                id: TaskId::new(candidate),
                title: title.trim().to_string(),
                description: description.to_string(),
                assigned_to: assigned_to.clone(),
                project_id: project_id.clone(),
                status: TaskStatus::Pending,
                created_at: Utc::now(),
            };
            async move { store.insert_task(task).await }
        })
        .await?;

        let task_id = TaskId::new(&*id);
        log.task_ids.push(task_id.clone());
        self.store.update_assignment(log).await?;

        let task = self
            .store
            .get_task(&task_id)
            .await?
            .ok_or_else(|| EngineError::Internal("task vanished after insert".into()))?;

        tracing::info!(task_id = %task.id, assignment_id = %assignment_id, "task created");
        Ok(task)
    }

    /// Promote a User-class account to Project Manager. This is the only
    /// role-escalation path, and it is Admin-gated at the API layer.
    pub async fn promote_to_project_manager(&self, id: &AccountId) -> EngineResult<Account> {
        let mut account = self
            .store
            .get_account(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("account {} not found", id)))?;

        match account.class {
            AccountClass::Admin => {
                return Err(EngineError::Validation(
                    "an Admin account cannot change class".to_string(),
                ))
            }
            AccountClass::ProjectManager => return Ok(account),
            AccountClass::User => {}
        }

        account.class = AccountClass::ProjectManager;
        account.updated_at = Utc::now();
        self.store.update_account(account.clone()).await?;

        tracing::info!(account_id = %id, "account promoted to ProjectManager");
        Ok(account)
    }

    /// Admin batch account update with per-item outcomes.
    pub async fn update_accounts(&self, updates: Vec<AccountUpdate>) -> EngineResult<BatchReport> {
        let mut report = BatchReport::default();

        for update in updates {
            let id = update.id.clone();
            match self.update_one_account(update).await {
                Ok(()) => report.push(BatchOutcome::ok(id.as_str(), "updated")),
                Err(err) => report.push(BatchOutcome::failed(id.as_str(), err.to_string())),
            }
        }

        Ok(report)
    }

    async fn update_one_account(&self, update: AccountUpdate) -> EngineResult<()> {
        let mut account = self
            .store
            .get_account(&update.id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("account {} not found", update.id)))?;

        if let Some(first_name) = update.first_name {
            validation::validate_name(&first_name, "first")?;
            account.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            validation::validate_name(&last_name, "last")?;
            account.last_name = last_name;
        }
        if let Some(contact) = update.contact {
            validation::validate_contact(&contact)?;
            account.contact = Some(contact);
        }
        if let Some(password_hash) = update.password_hash {
            account.password_hash = password_hash;
        }

        account.updated_at = Utc::now();
        self.store.update_account(account).await?;
        Ok(())
    }

    /// Projects created by the manager that no assignment log references.
    pub async fn unassigned_projects(&self, created_by: &AccountId) -> EngineResult<Vec<Project>> {
        let assigned: BTreeSet<ProjectId> = self
            .store
            .list_assignments()
            .await?
            .into_iter()
            .map(|log| log.project_id)
            .collect();

        let projects = self
            .store
            .list_projects_created_by(created_by)
            .await?
            .into_iter()
            .filter(|p| !assigned.contains(&p.id))
            .collect();

        Ok(projects)
    }
}
