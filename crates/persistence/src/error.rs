// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// A stored row could not be turned back into a domain value.
    #[error("Reconstruction error: {0}")]
    ReconstructionError(String),
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// A unique constraint was violated.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    /// A foreign key constraint was violated.
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    /// The requested employee was not found.
    #[error("Employee {0} not found")]
    EmployeeNotFound(i64),
    /// The requested grant was not found.
    #[error("Grant {0} not found")]
    GrantNotFound(i64),
    /// The requested commission plan was not found.
    #[error("Commission plan {0} not found")]
    PlanNotFound(i64),
    /// The requested scenario was not found.
    #[error("Scenario {0} not found")]
    ScenarioNotFound(i64),
    /// The requested event was not found.
    #[error("Event not found: {0}")]
    EventNotFound(i64),
    /// An employee with this identifier already exists.
    #[error("Employee {0} already exists")]
    DuplicateEmployee(i64),
    /// An achievement for this employee, plan and period already exists.
    #[error("Achievement for employee {employee_id}, plan {plan_id}, period {period} already exists")]
    DuplicateAchievement {
        /// The employee.
        employee_id: i64,
        /// The plan.
        plan_id: i64,
        /// The period.
        period: String,
    },
    /// The scenario was no longer `DRAFT` when the apply committed.
    #[error("Scenario {0} is not in DRAFT state")]
    ScenarioNotDraft(i64),
    /// An employee row did not accept its pay update.
    #[error("Failed to update employee {0}: row missing or pay changed since the snapshot")]
    EmployeeWriteFailed(i64),
    /// The requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
