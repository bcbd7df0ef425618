//! Account records and account classes

use crate::ids::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored account class.
///
/// Admin and ProjectManager are fixed classes. User-class accounts have
/// their effective role derived from team membership at authentication
/// time; the derived role is never written back to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountClass {
    Admin,
    ProjectManager,
    User,
}

impl fmt::Display for AccountClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountClass::Admin => f.write_str("Admin"),
            AccountClass::ProjectManager => f.write_str("ProjectManager"),
            AccountClass::User => f.write_str("User"),
        }
    }
}

/// A registered identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    /// Unique, stored lowercased.
    pub email: String,
    /// Argon2 hash; never serialized into API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Reference to an externally hosted avatar image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub class: AccountClass,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.class == AccountClass::Admin
    }

    pub fn is_project_manager(&self) -> bool {
        self.class == AccountClass::ProjectManager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let account = Account {
            id: AccountId::new("User-00001"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            contact: None,
            avatar: None,
            class: AccountClass::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("ada@example.com"));
    }
}
