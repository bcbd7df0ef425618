//! Taskforge storage layer
//!
//! Five record collections with plain per-collection CRUD and no
//! cross-collection constraints. The only invariants a backend itself
//! enforces are uniqueness constraints: record ids, account email, and one
//! assignment log per project. Everything else (cascades, ordering,
//! ownership) lives in `taskforge-engine`.

#![deny(unsafe_code)]

pub mod allocator;
pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use traits::{
    AccountStore, AssignmentStore, IdSequenceStore, ProjectStore, Store, TaskStore, TeamStore,
};
