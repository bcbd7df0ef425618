//! Strongly-typed identifiers for taskforge entities
//!
//! Identifiers are human-readable strings of the form `<Prefix>-<NNNNN>`
//! where the numeric suffix is zero-padded so lexical and numeric ordering
//! agree. Each entity class owns one prefix and one counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the zero-padded numeric suffix in every identifier.
pub const ID_PAD_WIDTH: usize = 5;

/// The five record collections that receive allocated identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    Account,
    Team,
    Project,
    Assignment,
    Task,
}

impl EntityClass {
    /// Identifier prefix for this class.
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityClass::Account => "User",
            EntityClass::Team => "Team",
            EntityClass::Project => "Project",
            EntityClass::Assignment => "AP",
            EntityClass::Task => "Task",
        }
    }

    /// Format a full identifier from a numeric suffix, e.g. `User-00042`.
    pub fn format_id(&self, number: u64) -> String {
        format!("{}-{:0width$}", self.prefix(), number, width = ID_PAD_WIDTH)
    }

    /// Extract the numeric suffix of an identifier of this class.
    ///
    /// Returns `None` if the prefix does not match or the suffix is not
    /// numeric.
    pub fn parse_number(&self, id: &str) -> Option<u64> {
        let rest = id.strip_prefix(self.prefix())?.strip_prefix('-')?;
        rest.parse().ok()
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier for an account, e.g. `User-00001`.
    AccountId
);
string_id!(
    /// Identifier for a team, e.g. `Team-00003`.
    TeamId
);
string_id!(
    /// Identifier for a project, e.g. `Project-00005`.
    ProjectId
);
string_id!(
    /// Identifier for an assignment log, e.g. `AP-00007`.
    AssignmentId
);
string_id!(
    /// Identifier for a task, e.g. `Task-00020`.
    TaskId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_id_padding() {
        assert_eq!(EntityClass::Account.format_id(1), "User-00001");
        assert_eq!(EntityClass::Assignment.format_id(7), "AP-00007");
        assert_eq!(EntityClass::Task.format_id(99999), "Task-99999");
    }

    #[test]
    fn test_parse_number_round_trip() {
        for class in [
            EntityClass::Account,
            EntityClass::Team,
            EntityClass::Project,
            EntityClass::Assignment,
            EntityClass::Task,
        ] {
            let id = class.format_id(42);
            assert_eq!(class.parse_number(&id), Some(42));
        }
    }

    #[test]
    fn test_parse_number_rejects_foreign_prefix() {
        assert_eq!(EntityClass::Team.parse_number("User-00001"), None);
        assert_eq!(EntityClass::Team.parse_number("Team-abc"), None);
        assert_eq!(EntityClass::Team.parse_number("Team00001"), None);
    }

    #[test]
    fn test_padded_ids_sort_numerically() {
        let a = EntityClass::Project.format_id(9);
        let b = EntityClass::Project.format_id(10);
        assert!(a < b);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = AccountId::new("User-00001");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"User-00001\"");
    }
}
