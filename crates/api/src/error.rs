// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use comp_engine::CoreError;
use comp_engine_domain::DomainError;
use comp_engine_persistence::PersistenceError;
use thiserror::Error;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation conflicts with the current state of a record.
    #[error("State conflict: {message}")]
    StateConflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::NoEffectiveBand { .. } => ApiError::DomainRuleViolation {
            rule: String::from("effective_band"),
            message: err.to_string(),
        },
        DomainError::InvalidBandRange { .. } | DomainError::InvalidBandCode(_) => {
            invalid_input("band", &err)
        }
        DomainError::InvalidGrant { .. } => invalid_input("grant", &err),
        DomainError::GrantNotActive { .. } | DomainError::VestingUnitsExceeded { .. } => {
            ApiError::StateConflict {
                message: err.to_string(),
            }
        }
        DomainError::InvalidTarget { .. } => invalid_input("target_amount", &err),
        DomainError::InvalidAchievedAmount { .. } => invalid_input("achieved_amount", &err),
        DomainError::InvalidAcceleratorTiers { .. } => invalid_input("accelerator_tiers", &err),
        DomainError::InvalidPeriod { .. } => invalid_input("period", &err),
        DomainError::NotEligible { .. } => ApiError::DomainRuleViolation {
            rule: String::from("plan_eligibility"),
            message: err.to_string(),
        },
        DomainError::InvalidEmployee { .. } => invalid_input("employee", &err),
        DomainError::InvalidPolicy { .. } => invalid_input("policy", &err),
        DomainError::InvalidScenario { .. } => invalid_input("rules", &err),
        DomainError::NegativeProjection { .. } => ApiError::DomainRuleViolation {
            rule: String::from("non_negative_projection"),
            message: err.to_string(),
        },
        DomainError::InvalidEnumValue { kind, .. } => invalid_input(kind, &err),
        DomainError::ArithmeticOverflow { .. } => invalid_input("amount", &err),
        DomainError::DateArithmeticOverflow { .. } | DomainError::DateParseError { .. } => {
            invalid_input("date", &err)
        }
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ScenarioAlreadyApplied { .. } | CoreError::ApplyInProgress { .. } => {
            ApiError::StateConflict {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures that are not the caller's fault become `Internal` and are
/// logged here; the message returned to callers stays generic.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    let not_found = |resource_type: &str| ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: err.to_string(),
    };

    match &err {
        PersistenceError::EmployeeNotFound(_) => not_found("Employee"),
        PersistenceError::GrantNotFound(_) => not_found("Grant"),
        PersistenceError::PlanNotFound(_) => not_found("Commission plan"),
        PersistenceError::ScenarioNotFound(_) => not_found("Scenario"),
        PersistenceError::EventNotFound(_) => not_found("Audit event"),
        PersistenceError::NotFound(_) => not_found("Record"),
        PersistenceError::DuplicateEmployee(_)
        | PersistenceError::DuplicateAchievement { .. }
        | PersistenceError::UniqueViolation(_)
        | PersistenceError::ScenarioNotDraft(_)
        | PersistenceError::EmployeeWriteFailed(_) => ApiError::StateConflict {
            message: err.to_string(),
        },
        PersistenceError::ForeignKeyViolation(_) => ApiError::InvalidInput {
            field: String::from("reference"),
            message: err.to_string(),
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::ReconstructionError(_)
        | PersistenceError::SerializationError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled => {
            error!(error = %err, "Persistence failure");
            ApiError::Internal {
                message: String::from("A storage error occurred"),
            }
        }
    }
}
