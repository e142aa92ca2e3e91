//! Row models for the provisioned tables.
//!
//! Field names match the column names so rows returned by the REST gateway
//! deserialize directly. Columns declared with a `DEFAULT` fall back to that
//! default when absent from a payload.

use crate::domain::Role;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `employees.annual_leave_balance` default, in days.
pub const DEFAULT_LEAVE_BALANCE: i32 = 21;
/// `status` default for leaves, excuses and overtime.
pub const DEFAULT_REQUEST_STATUS: &str = "Pending";
/// `employees.status` default.
pub const DEFAULT_EMPLOYEE_STATUS: &str = "Active";

fn default_leave_balance() -> i32 {
    DEFAULT_LEAVE_BALANCE
}

fn default_request_status() -> String {
    DEFAULT_REQUEST_STATUS.to_string()
}

fn default_employee_status() -> String {
    DEFAULT_EMPLOYEE_STATUS.to_string()
}

/// A login account (`users`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Stored as plaintext by the existing schema.
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password: password.into(),
            role,
            created_at: None,
        }
    }
}

/// An employee record (`employees`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub hire_date: NaiveDate,
    #[serde(default = "default_employee_status")]
    pub status: String,
    #[serde(default = "default_leave_balance")]
    pub annual_leave_balance: i32,
    #[serde(default)]
    pub manager_id: Option<Uuid>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A leave request (`leaves`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    pub id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// DECIMAL(4,1): half days are allowed.
    pub days: Decimal,
    #[serde(rename = "type")]
    pub leave_type: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default = "default_request_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A short absence within a working day (`excuses`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excuse {
    pub id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub reason: String,
    #[serde(default = "default_request_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Overtime worked on a given day (`overtime`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overtime {
    pub id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub date: NaiveDate,
    pub hours: Decimal,
    pub reason: String,
    #[serde(default = "default_request_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A salary package effective from a given date (`salary`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub basic_salary: Decimal,
    #[serde(default)]
    pub housing_allowance: Decimal,
    #[serde(default)]
    pub transportation_allowance: Decimal,
    #[serde(default)]
    pub other_allowances: Decimal,
    pub effective_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Salary {
    pub fn total_allowances(&self) -> Decimal {
        self.housing_allowance + self.transportation_allowance + self.other_allowances
    }

    pub fn gross(&self) -> Decimal {
        self.basic_salary + self.total_allowances()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_user_deserializes_gateway_row() {
        let row = json!({
            "id": "7f0c1f5e-4a47-4d1c-9a53-3f1f2f0b6a11",
            "username": "alice",
            "password": "secret",
            "role": "employee",
            "created_at": "2024-03-01T08:30:00.123456+00:00"
        });
        let user: User = serde_json::from_value(row).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::Employee);
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_employee_defaults_apply_when_columns_absent() {
        let row = json!({
            "id": "0b8d3c6a-8f0e-4c3b-bb7e-2f9b8f7d6c51",
            "employee_code": "E-001",
            "first_name": "Alice",
            "last_name": "Doe",
            "email": "alice@example.com",
            "department": "Engineering",
            "position": "Developer",
            "hire_date": "2023-01-15"
        });
        let employee: Employee = serde_json::from_value(row).unwrap();
        assert_eq!(employee.annual_leave_balance, DEFAULT_LEAVE_BALANCE);
        assert_eq!(employee.status, DEFAULT_EMPLOYEE_STATUS);
        assert_eq!(employee.manager_id, None);
        assert_eq!(employee.full_name(), "Alice Doe");
    }

    #[test]
    fn test_leave_reads_type_column_and_half_days() {
        let row = json!({
            "id": "5c1e0f7a-9a1b-4d4e-8f2a-6b3c2d1e0f9a",
            "employee_id": "0b8d3c6a-8f0e-4c3b-bb7e-2f9b8f7d6c51",
            "start_date": "2024-05-01",
            "end_date": "2024-05-02",
            "days": 1.5,
            "type": "Annual"
        });
        let leave: Leave = serde_json::from_value(row).unwrap();
        assert_eq!(leave.leave_type, "Annual");
        assert_eq!(leave.days, Decimal::from_str("1.5").unwrap());
        assert_eq!(leave.status, DEFAULT_REQUEST_STATUS);
        assert_eq!(leave.reason, None);
    }

    #[test]
    fn test_excuse_parses_time_columns() {
        let row = json!({
            "id": "1d2c3b4a-5e6f-4a7b-8c9d-0e1f2a3b4c5d",
            "date": "2024-06-10",
            "time_from": "09:00:00",
            "time_to": "10:30:00",
            "reason": "Doctor appointment",
            "status": "Approved"
        });
        let excuse: Excuse = serde_json::from_value(row).unwrap();
        assert_eq!(excuse.time_from, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(excuse.status, "Approved");
    }

    #[test]
    fn test_overtime_hours_decimal() {
        let row = json!({
            "id": "2a3b4c5d-6e7f-4a8b-9c0d-1e2f3a4b5c6d",
            "date": "2024-06-11",
            "hours": "2.5",
            "reason": "Release"
        });
        let overtime: Overtime = serde_json::from_value(row).unwrap();
        assert_eq!(overtime.hours, Decimal::from_str("2.5").unwrap());
        assert_eq!(overtime.status, DEFAULT_REQUEST_STATUS);
    }

    #[test]
    fn test_salary_allowances_default_to_zero() {
        let row = json!({
            "id": "3b4c5d6e-7f8a-4b9c-8d0e-1f2a3b4c5d6e",
            "basic_salary": 5000.00,
            "housing_allowance": 1250.50,
            "effective_date": "2024-01-01"
        });
        let salary: Salary = serde_json::from_value(row).unwrap();
        assert_eq!(salary.transportation_allowance, Decimal::ZERO);
        assert_eq!(salary.other_allowances, Decimal::ZERO);
        assert_eq!(salary.total_allowances(), Decimal::from_str("1250.5").unwrap());
        assert_eq!(salary.gross(), Decimal::from_str("6250.5").unwrap());
    }
}
