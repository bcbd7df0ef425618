//! Team records

use crate::ids::{AccountId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A team of accounts, created and owned by a Project Manager.
///
/// `team_leader` and `members` hold plain account ids; TeamLeader and
/// TeamMember status is derived from these sets at authentication time and
/// never stored on the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub team_leader: BTreeSet<AccountId>,
    pub members: BTreeSet<AccountId>,
    pub created_by: AccountId,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Every account participating in this team, leaders and members alike.
    pub fn participants(&self) -> BTreeSet<AccountId> {
        self.team_leader.union(&self.members).cloned().collect()
    }

    pub fn is_leader(&self, id: &AccountId) -> bool {
        self.team_leader.contains(id)
    }

    pub fn is_member(&self, id: &AccountId) -> bool {
        self.members.contains(id)
    }

    /// Remove an account id from both participant sets.
    ///
    /// Returns true if the id appeared in either set.
    pub fn remove_participant(&mut self, id: &AccountId) -> bool {
        let led = self.team_leader.remove(id);
        let belonged = self.members.remove(id);
        led || belonged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        let mut team_leader = BTreeSet::new();
        team_leader.insert(AccountId::new("User-00010"));
        let mut members = BTreeSet::new();
        members.insert(AccountId::new("User-00011"));
        members.insert(AccountId::new("User-00012"));
        Team {
            id: TeamId::new("Team-00003"),
            name: "Platform".to_string(),
            team_leader,
            members,
            created_by: AccountId::new("User-00002"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_participants_union() {
        let team = team();
        let participants = team.participants();
        assert_eq!(participants.len(), 3);
        assert!(participants.contains(&AccountId::new("User-00010")));
        assert!(participants.contains(&AccountId::new("User-00011")));
    }

    #[test]
    fn test_remove_participant() {
        let mut team = team();
        assert!(team.remove_participant(&AccountId::new("User-00011")));
        assert!(!team.remove_participant(&AccountId::new("User-00011")));
        assert!(!team.is_member(&AccountId::new("User-00011")));
    }
}
