//! Username/password check against the `users` table.
//!
//! Passwords are stored and compared as plaintext by the existing schema; the
//! comparison happens inside the backend query filter. A failed lookup never
//! says whether the username exists.

use crate::backend::Backend;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Identifier reported for admin accounts in place of the row id.
pub const ADMIN_ID: &str = "admin";

/// Outcome of a login attempt.
///
/// Serializes as `{"success":false}` or
/// `{"success":true,"role":..,"isAdmin":..,"id":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl LoginResult {
    pub fn failure() -> Self {
        Self {
            success: false,
            role: None,
            is_admin: None,
            id: None,
        }
    }

    /// Successful login for a stored role and row id.
    pub fn authenticated(role: &str, row_id: &str) -> Self {
        let is_admin = role == "admin";
        Self {
            success: true,
            role: Some(role.to_string()),
            is_admin: Some(is_admin),
            id: Some(if is_admin { ADMIN_ID } else { row_id }.to_string()),
        }
    }
}

/// Stateless credential check over an injected backend.
#[derive(Debug, Clone)]
pub struct CredentialChecker {
    backend: Arc<dyn Backend>,
}

impl CredentialChecker {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Look up the user matching both `username` and `password`.
    ///
    /// Backend errors and "no such row" both yield [`LoginResult::failure`].
    pub async fn login(&self, username: &str, password: &str) -> LoginResult {
        match self.backend.find_user(username, password).await {
            Ok(Some(user)) => {
                debug!(username, role = %user.role, "Login succeeded");
                LoginResult::authenticated(user.role.as_str(), &user.id.to_string())
            }
            Ok(None) => {
                debug!(username, "Login rejected");
                LoginResult::failure()
            }
            Err(e) => {
                warn!(username, error = %e, "User lookup failed");
                LoginResult::failure()
            }
        }
    }
}

/// Convenience wrapper for a one-off check.
pub async fn login_user(backend: Arc<dyn Backend>, username: &str, password: &str) -> LoginResult {
    CredentialChecker::new(backend).login(username, password).await
}
