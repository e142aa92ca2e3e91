//! Account roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role stored in `users.role`.
///
/// The table carries a `CHECK` constraint restricting the column to these
/// three values, so rows read back from the backend always parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Employee];

    /// The stored representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_parse_is_case_sensitive() {
        assert_eq!(
            "Admin".parse::<Role>(),
            Err(RoleParseError("Admin".to_string()))
        );
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Manager.is_admin());
        assert!(!Role::Employee.is_admin());
    }

    #[test]
    fn test_role_serde_uses_stored_value() {
        let json = serde_json::to_string(&Role::Manager).unwrap();
        assert_eq!(json, "\"manager\"");
        let role: Role = serde_json::from_str("\"employee\"").unwrap();
        assert_eq!(role, Role::Employee);
        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
    }
}
