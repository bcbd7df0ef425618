//! Taskforge core types
//!
//! The five record collections coordinated by the cascade engine:
//!
//! - **Account**: any registered identity (Admin, ProjectManager, or User)
//! - **Team**: leader/member sets of account ids, owned by a Project Manager
//! - **Project**: owned by a Project Manager, with a display status
//! - **AssignmentLog**: binds exactly one project to one team at a time
//! - **Task**: owned by an assignment log, assigned to team participants
//!
//! Relationships between collections are denormalized string identifiers;
//! there is no native foreign-key enforcement. The cascade engine in
//! `taskforge-engine` keeps them consistent.

#![deny(unsafe_code)]

pub mod account;
pub mod assignment;
pub mod ids;
pub mod project;
pub mod role;
pub mod task;
pub mod team;
pub mod validation;

pub use account::{Account, AccountClass};
pub use assignment::AssignmentLog;
pub use ids::{
    AccountId, AssignmentId, EntityClass, ProjectId, TaskId, TeamId, ID_PAD_WIDTH,
};
pub use project::{Project, ProjectStatus};
pub use role::Role;
pub use task::{Task, TaskStatus};
pub use team::Team;
pub use validation::ValidationError;
