pub mod api;
pub mod auth;
pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod migrate;
pub mod schema;

pub use auth::{login_user, CredentialChecker, LoginResult};
pub use backend::{Backend, BackendError, MockBackend, SupabaseBackend};
pub use config::Config;
pub use domain::{Employee, Excuse, Leave, Overtime, Role, Salary, User};
pub use error::AppError;
pub use migrate::{
    default_plan, initialize_tables, FailurePolicy, Migration, MigrationReport, Migrator,
    RetryPolicy,
};
