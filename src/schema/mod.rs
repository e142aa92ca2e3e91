//! HR schema definition.
//!
//! This module provides:
//! - The six table definitions, in foreign-key dependency order
//! - Order validation over any list of definitions
//! - A minimal `CREATE TABLE` statement reader used by the test backend

pub mod ddl;
pub mod tables;

pub use ddl::{parse_create_table, CreateTableStatement};
use std::collections::HashSet;
use thiserror::Error;

/// Remote procedure that seeds the default administrative account.
pub const SEED_ADMIN_RPC: &str = "init_hr_tables";

/// One table and the remote procedure that creates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDefinition {
    /// Table name as created in the database.
    pub table: &'static str,
    /// Human-readable name used in log lines.
    pub label: &'static str,
    /// Remote procedure invoked with `{"sql": <sql>}`.
    pub rpc: &'static str,
    /// Tables referenced by foreign keys, excluding self references.
    pub depends_on: &'static [&'static str],
    /// `CREATE TABLE IF NOT EXISTS` statement.
    pub sql: &'static str,
}

/// All tables, in creation order.
///
/// Users first, then Employees, then the four tables keyed on an employee.
pub static TABLES: [TableDefinition; 6] = [
    tables::USERS,
    tables::EMPLOYEES,
    tables::LEAVES,
    tables::EXCUSES,
    tables::OVERTIME,
    tables::SALARY,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaOrderError {
    #[error("table {0} is defined more than once")]
    Duplicate(String),
    #[error("table {table} depends on {dependency}, which is not defined")]
    MissingDependency { table: String, dependency: String },
    #[error("table {table} is created before its dependency {dependency}")]
    OutOfOrder { table: String, dependency: String },
}

/// Check that every dependency is created strictly before its dependents.
pub fn validate_order(definitions: &[TableDefinition]) -> Result<(), SchemaOrderError> {
    let defined: HashSet<&str> = definitions.iter().map(|d| d.table).collect();
    let mut created: HashSet<&str> = HashSet::new();

    for definition in definitions {
        for &dependency in definition.depends_on {
            if dependency == definition.table {
                continue;
            }
            if !defined.contains(dependency) {
                return Err(SchemaOrderError::MissingDependency {
                    table: definition.table.to_string(),
                    dependency: dependency.to_string(),
                });
            }
            if !created.contains(dependency) {
                return Err(SchemaOrderError::OutOfOrder {
                    table: definition.table.to_string(),
                    dependency: dependency.to_string(),
                });
            }
        }
        if !created.insert(definition.table) {
            return Err(SchemaOrderError::Duplicate(definition.table.to_string()));
        }
    }

    Ok(())
}

/// Look up a definition by table name.
pub fn table(name: &str) -> Option<&'static TableDefinition> {
    TABLES.iter().find(|d| d.table == name)
}
