//! Ordered, idempotent schema migrations run against a [`Backend`].
//!
//! A plan is a list of [`Migration`] steps executed strictly in sequence.
//! What happens after a failed step is governed by [`FailurePolicy`], and
//! how often a transiently failing step is re-attempted by [`RetryPolicy`].
//! The defaults (continue, single attempt) give best-effort initialization:
//! every step is tried once and failures are only logged.

pub mod report;
pub mod runner;

pub use report::{MigrationReport, StepOutcome, StepStatus};
pub use runner::Migrator;

use crate::backend::Backend;
use crate::schema::{TableDefinition, SEED_ADMIN_RPC, TABLES};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// One idempotent schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
    /// Create a table if it does not exist yet.
    CreateTable(&'static TableDefinition),
    /// Seed the default administrative account.
    SeedAdmin,
}

impl Migration {
    /// Remote procedure invoked by this step; doubles as the step name.
    pub fn rpc(&self) -> &'static str {
        match self {
            Migration::CreateTable(definition) => definition.rpc,
            Migration::SeedAdmin => SEED_ADMIN_RPC,
        }
    }

    pub fn params(&self) -> Value {
        match self {
            Migration::CreateTable(definition) => json!({ "sql": definition.sql }),
            Migration::SeedAdmin => json!({}),
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Migration::CreateTable(definition) => {
                format!("{} table created successfully", definition.label)
            }
            Migration::SeedAdmin => "Admin account initialized successfully".to_string(),
        }
    }

    pub fn failure_message(&self) -> String {
        match self {
            Migration::CreateTable(definition) => {
                format!("Error creating {} table", definition.table)
            }
            Migration::SeedAdmin => "Error initializing admin account".to_string(),
        }
    }
}

/// The six tables in dependency order, followed by the admin seed.
pub fn default_plan() -> Vec<Migration> {
    TABLES
        .iter()
        .map(Migration::CreateTable)
        .chain(std::iter::once(Migration::SeedAdmin))
        .collect()
}

/// What to do with the remaining steps once a step has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and run the next step.
    #[default]
    Continue,
    /// Log the failure and skip every remaining step.
    Abort,
}

/// Per-step retry of transient failures with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per step, including the first. `1` disables retry.
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(10),
        }
    }
}

/// Run the default plan with default policies.
///
/// Never fails: the outcome of each step is logged and returned in the report.
pub async fn initialize_tables(backend: Arc<dyn Backend>) -> MigrationReport {
    Migrator::new(backend).run(&default_plan()).await
}
