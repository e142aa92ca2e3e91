//! In-memory backend for testing without network calls.
//!
//! Behaves like the hosted database for the calls this crate makes: it
//! records every procedure call, creates tables named by `CREATE TABLE`
//! statements, rejects foreign keys to tables that do not exist yet and
//! rejects a second unguarded `CREATE TABLE` for the same table.

use super::{Backend, BackendError};
use crate::domain::{Role, User};
use crate::schema::{parse_create_table, SEED_ADMIN_RPC};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A procedure call as observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub function: String,
    pub params: Value,
}

impl RecordedCall {
    /// The `sql` argument, if the call carried one.
    pub fn sql(&self) -> Option<&str> {
        self.params.get("sql").and_then(Value::as_str)
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    tables: Vec<String>,
    users: Vec<User>,
    /// Remaining injected failures per procedure; `None` fails forever.
    failures: HashMap<String, Option<u32>>,
    lookups: usize,
}

/// Mock backend with scripted users and injectable failures.
#[derive(Debug, Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
    lookup_error: Option<BackendError>,
    admin_seed: Option<(String, String)>,
}

impl MockBackend {
    /// Create a mock with no tables, no users and no failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a user row, as if inserted outside this crate.
    pub fn with_user(self, user: User) -> Self {
        self.state().users.push(user);
        self
    }

    /// Mark a table as already existing.
    pub fn with_table(self, table: &str) -> Self {
        self.state().tables.push(table.to_string());
        self
    }

    /// Make every call to `function` fail with a server error.
    pub fn with_failing_rpc(self, function: &str) -> Self {
        self.state().failures.insert(function.to_string(), None);
        self
    }

    /// Make the first `times` calls to `function` fail with a server error.
    pub fn with_transient_failures(self, function: &str, times: u32) -> Self {
        self.state()
            .failures
            .insert(function.to_string(), Some(times));
        self
    }

    /// Make every user lookup fail with `error`.
    pub fn with_lookup_error(mut self, error: BackendError) -> Self {
        self.lookup_error = Some(error);
        self
    }

    /// Credentials `init_hr_tables` inserts as the admin account.
    pub fn with_admin_seed(mut self, username: &str, password: &str) -> Self {
        self.admin_seed = Some((username.to_string(), password.to_string()));
        self
    }

    /// All procedure calls received, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    /// Names of the procedures called, in order.
    pub fn call_names(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .map(|c| c.function.clone())
            .collect()
    }

    /// Tables that currently exist, in creation order.
    pub fn tables(&self) -> Vec<String> {
        self.state().tables.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    /// Number of `find_user` calls received.
    pub fn lookup_count(&self) -> usize {
        self.state().lookups
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_injected_failure(state: &mut MockState, function: &str) -> Option<BackendError> {
        let remaining = state.failures.get_mut(function)?;
        match remaining {
            Some(0) => return None,
            Some(n) => *n -= 1,
            None => {}
        }
        Some(BackendError::Http {
            status: 500,
            message: format!("injected failure for {}", function),
        })
    }

    fn create_table(state: &mut MockState, params: &Value) -> Result<Value, BackendError> {
        let sql = params
            .get("sql")
            .and_then(Value::as_str)
            .ok_or_else(|| bad_request("missing sql argument"))?;
        let statement =
            parse_create_table(sql).ok_or_else(|| bad_request("not a CREATE TABLE statement"))?;

        let exists = state.tables.contains(&statement.table);
        if exists && !statement.if_not_exists {
            return Err(BackendError::Http {
                status: 409,
                message: format!("relation \"{}\" already exists", statement.table),
            });
        }

        for referenced in &statement.references {
            if *referenced != statement.table && !state.tables.contains(referenced) {
                return Err(missing_relation(referenced));
            }
        }

        if !exists {
            state.tables.push(statement.table);
        }
        Ok(Value::Null)
    }

    fn seed_admin(&self, state: &mut MockState) -> Result<Value, BackendError> {
        if !state.tables.iter().any(|t| t == "users") {
            return Err(missing_relation("users"));
        }
        if let Some((username, password)) = &self.admin_seed {
            if !state.users.iter().any(|u| &u.username == username) {
                state
                    .users
                    .push(User::new(username.as_str(), password.as_str(), Role::Admin));
            }
        }
        Ok(Value::Null)
    }
}

fn bad_request(message: &str) -> BackendError {
    BackendError::Http {
        status: 400,
        message: message.to_string(),
    }
}

fn missing_relation(table: &str) -> BackendError {
    BackendError::Http {
        status: 404,
        message: format!("relation \"{}\" does not exist", table),
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn rpc(&self, function: &str, params: Value) -> Result<Value, BackendError> {
        let mut state = self.state();
        state.calls.push(RecordedCall {
            function: function.to_string(),
            params: params.clone(),
        });

        if let Some(error) = Self::take_injected_failure(&mut state, function) {
            return Err(error);
        }

        if function == SEED_ADMIN_RPC {
            self.seed_admin(&mut state)
        } else if function.starts_with("create_") && function.ends_with("_table") {
            Self::create_table(&mut state, &params)
        } else {
            Err(BackendError::Http {
                status: 404,
                message: format!("Could not find the function public.{}", function),
            })
        }
    }

    async fn find_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, BackendError> {
        let mut state = self.state();
        state.lookups += 1;

        if let Some(error) = &self.lookup_error {
            return Err(error.clone());
        }

        let mut matches = state
            .users
            .iter()
            .filter(|u| u.username == username && u.password == password);
        match (matches.next(), matches.next()) {
            (Some(user), None) => Ok(Some(user.clone())),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(sql: &str) -> Value {
        json!({ "sql": sql })
    }

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let mock = MockBackend::new();
        mock.rpc("create_users_table", create("CREATE TABLE IF NOT EXISTS users (id UUID)"))
            .await
            .unwrap();
        mock.rpc(SEED_ADMIN_RPC, json!({})).await.unwrap();

        assert_eq!(mock.call_names(), vec!["create_users_table", SEED_ADMIN_RPC]);
        assert_eq!(
            mock.calls()[0].sql(),
            Some("CREATE TABLE IF NOT EXISTS users (id UUID)")
        );
        assert_eq!(mock.calls()[1].sql(), None);
    }

    #[tokio::test]
    async fn test_guarded_create_is_idempotent() {
        let mock = MockBackend::new();
        let params = create("CREATE TABLE IF NOT EXISTS users (id UUID)");
        mock.rpc("create_users_table", params.clone()).await.unwrap();
        mock.rpc("create_users_table", params).await.unwrap();
        assert_eq!(mock.tables(), vec!["users".to_string()]);
    }

    #[tokio::test]
    async fn test_unguarded_create_twice_conflicts() {
        let mock = MockBackend::new();
        let params = create("CREATE TABLE users (id UUID)");
        mock.rpc("create_users_table", params.clone()).await.unwrap();
        let err = mock.rpc("create_users_table", params).await.unwrap_err();
        assert!(matches!(err, BackendError::Http { status: 409, .. }));
    }

    #[tokio::test]
    async fn test_foreign_key_to_missing_table_fails() {
        let mock = MockBackend::new();
        let err = mock
            .rpc(
                "create_leaves_table",
                create("CREATE TABLE IF NOT EXISTS leaves (employee_id UUID REFERENCES employees(id))"),
            )
            .await
            .unwrap_err();
        assert_eq!(err, missing_relation("employees"));
        assert!(mock.tables().is_empty());
    }

    #[tokio::test]
    async fn test_self_reference_is_allowed() {
        let mock = MockBackend::new().with_table("users");
        mock.rpc(
            "create_employees_table",
            create("CREATE TABLE IF NOT EXISTS employees (manager_id UUID REFERENCES employees(id), user_id UUID REFERENCES users(id))"),
        )
        .await
        .unwrap();
        assert_eq!(mock.tables(), vec!["users".to_string(), "employees".to_string()]);
    }

    #[tokio::test]
    async fn test_transient_failures_run_out() {
        let mock = MockBackend::new().with_transient_failures(SEED_ADMIN_RPC, 2).with_table("users");
        assert!(mock.rpc(SEED_ADMIN_RPC, json!({})).await.is_err());
        assert!(mock.rpc(SEED_ADMIN_RPC, json!({})).await.is_err());
        assert!(mock.rpc(SEED_ADMIN_RPC, json!({})).await.is_ok());
        assert_eq!(mock.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_seed_admin_inserts_once() {
        let mock = MockBackend::new()
            .with_table("users")
            .with_admin_seed("admin", "admin123");
        mock.rpc(SEED_ADMIN_RPC, json!({})).await.unwrap();
        mock.rpc(SEED_ADMIN_RPC, json!({})).await.unwrap();

        let users = mock.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);
    }

    #[tokio::test]
    async fn test_seed_admin_requires_users_table() {
        let mock = MockBackend::new().with_admin_seed("admin", "admin123");
        let err = mock.rpc(SEED_ADMIN_RPC, json!({})).await.unwrap_err();
        assert_eq!(err, missing_relation("users"));
    }

    #[tokio::test]
    async fn test_unknown_function_is_not_found() {
        let mock = MockBackend::new();
        let err = mock.rpc("drop_everything", json!({})).await.unwrap_err();
        assert!(matches!(err, BackendError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_find_user_requires_both_fields() {
        let alice = User::new("alice", "secret", Role::Employee);
        let mock = MockBackend::new().with_user(alice.clone());

        assert_eq!(mock.find_user("alice", "secret").await.unwrap(), Some(alice));
        assert_eq!(mock.find_user("alice", "Secret").await.unwrap(), None);
        assert_eq!(mock.find_user("bob", "secret").await.unwrap(), None);
        assert_eq!(mock.lookup_count(), 3);
    }

    #[tokio::test]
    async fn test_find_user_with_ambiguous_rows_matches_nothing() {
        let mock = MockBackend::new()
            .with_user(User::new("dup", "pw", Role::Employee))
            .with_user(User::new("dup", "pw", Role::Manager));
        assert_eq!(mock.find_user("dup", "pw").await.unwrap(), None);
    }
}
