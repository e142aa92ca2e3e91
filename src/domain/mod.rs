//! Domain types for the HR schema.
//!
//! This module provides:
//! - `Role`, the closed set of account roles enforced by the `users` table
//! - Typed row models for the six provisioned tables
//! - Column defaults mirrored from the table definitions

pub mod records;
pub mod role;

pub use records::{
    Employee, Excuse, Leave, Overtime, Salary, User, DEFAULT_EMPLOYEE_STATUS,
    DEFAULT_LEAVE_BALANCE, DEFAULT_REQUEST_STATUS,
};
pub use role::{Role, RoleParseError};
