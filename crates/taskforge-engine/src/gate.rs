//! Access-control gate
//!
//! Every mutating call is authorized twice: a role check against the
//! resolved role, and an ownership check against the target record's
//! `created_by`. The two are independent: passing the role check never
//! waives the ownership check.

use crate::error::{EngineError, EngineResult};
use taskforge_types::{AccountId, Role};

/// Operations subject to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    // Admin surface
    ListAccounts,
    UpdateAccounts,
    DeleteAccounts,
    PromoteAccount,
    // Project Manager surface
    CreateTeam,
    UpdateTeam,
    DeleteTeams,
    CreateProject,
    UpdateProject,
    DeleteProjects,
    AssignProject,
    UnassignProject,
    CreateTask,
}

impl Operation {
    /// The single role allowed to perform this operation.
    fn required_role(&self) -> Role {
        match self {
            Operation::ListAccounts
            | Operation::UpdateAccounts
            | Operation::DeleteAccounts
            | Operation::PromoteAccount => Role::Admin,
            Operation::CreateTeam
            | Operation::UpdateTeam
            | Operation::DeleteTeams
            | Operation::CreateProject
            | Operation::UpdateProject
            | Operation::DeleteProjects
            | Operation::AssignProject
            | Operation::UnassignProject
            | Operation::CreateTask => Role::ProjectManager,
        }
    }
}

/// Gate outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny { reason: String },
}

impl Decision {
    pub fn deny(reason: impl Into<String>) -> Self {
        Decision::Deny {
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Convert a denial into [`EngineError::Forbidden`].
    pub fn into_result(self) -> EngineResult<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny { reason } => Err(EngineError::Forbidden(reason)),
        }
    }
}

/// Check the resolved role against the operation's requirement.
pub fn authorize(role: Role, operation: Operation) -> Decision {
    let required = operation.required_role();
    if role == required {
        Decision::Allow
    } else {
        Decision::deny(format!(
            "{:?} requires the {} role",
            operation, required
        ))
    }
}

/// Ownership check: the caller must be the creator of the target record.
///
/// `what` names the record kind for the denial message.
pub fn ensure_owner(created_by: &AccountId, caller: &AccountId, what: &str) -> EngineResult<()> {
    if created_by == caller {
        Ok(())
    } else {
        Err(EngineError::Forbidden(format!(
            "{} is owned by another account",
            what
        )))
    }
}
