//! Backend abstraction over the hosted database gateway.
//!
//! The schema initializer and the credential checker only ever talk to the
//! database through this trait, so both can be driven by the real REST
//! client or by the in-memory test double.

use crate::domain::User;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod mock;
pub mod supabase;

pub use mock::{MockBackend, RecordedCall};
pub use supabase::SupabaseBackend;

/// Remote operations the crate performs against the managed database.
#[async_trait]
pub trait Backend: Send + Sync + fmt::Debug {
    /// Invoke a named remote procedure with named parameters.
    ///
    /// # Arguments
    /// * `function` - Procedure name (e.g., "create_users_table")
    /// * `params` - JSON object of named arguments; `{}` for none
    ///
    /// # Returns
    /// The procedure's JSON result, or `Value::Null` for void procedures
    async fn rpc(
        &self,
        function: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, BackendError>;

    /// Fetch the single user whose username and password both match exactly.
    ///
    /// Returns `Ok(None)` unless exactly one row matches.
    async fn find_user(&self, username: &str, password: &str)
        -> Result<Option<User>, BackendError>;
}

/// Error type for backend operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Connection refused, DNS failure, timeout
    #[error("Network error: {0}")]
    Network(String),
    /// Non-success status returned by the gateway
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    /// Response body was not what the operation expects
    #[error("Parse error: {0}")]
    Parse(String),
    /// The client could not be constructed
    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl BackendError {
    /// Whether repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::Network(_) => true,
            BackendError::Http { status, .. } => *status == 429 || *status >= 500,
            BackendError::Parse(_) | BackendError::Config(_) => false,
        }
    }
}
