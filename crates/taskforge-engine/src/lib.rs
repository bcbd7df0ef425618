//! Taskforge coordination engine
//!
//! The service layer between the REST surface and the store:
//!
//! - [`roles`]: effective-role resolution from stored class plus live team
//!   membership
//! - [`gate`]: role and ownership authorization for mutating operations
//! - [`directory`]: record creation and account maintenance
//! - [`cascade`]: manual referential-integrity cascades for unassign,
//!   team delete, and account delete
//! - [`report`]: per-item outcomes for batch operations
//!
//! Everything here is storage-agnostic: the engine talks to
//! `taskforge_store::Store` and never to a concrete backend.

#![deny(unsafe_code)]

pub mod cascade;
pub mod directory;
pub mod error;
pub mod gate;
pub mod report;
pub mod roles;

pub use cascade::{CascadeEngine, CascadeStats};
pub use directory::{AccountUpdate, Directory, NewAccount};
pub use error::{EngineError, EngineResult};
pub use gate::{authorize, ensure_owner, Decision, Operation};
pub use report::{BatchOutcome, BatchReport};
pub use roles::resolve_role;
