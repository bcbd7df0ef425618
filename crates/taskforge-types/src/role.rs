//! Effective roles
//!
//! An account's effective role is computed at authentication time from its
//! stored class and current team membership. It is never persisted;
//! persisting it would require synchronizing against every team-membership
//! edit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role an account holds right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    ProjectManager,
    TeamLeader,
    TeamMember,
    TeamLeaderAndMember,
    /// Registered User-class account participating in no team.
    PlainUser,
}

impl Role {
    /// Whether this role participates in any team.
    pub fn is_team_participant(&self) -> bool {
        matches!(
            self,
            Role::TeamLeader | Role::TeamMember | Role::TeamLeaderAndMember
        )
    }

    /// Wire name used by the auth status endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::ProjectManager => "ProjectManager",
            Role::TeamLeader => "TeamLeader",
            Role::TeamMember => "TeamMember",
            Role::TeamLeaderAndMember => "TeamLeaderAndMember",
            Role::PlainUser => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
