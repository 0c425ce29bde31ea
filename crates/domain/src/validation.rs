// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Employee, SalaryBand};
use crate::vesting::RsuGrant;
use rust_decimal::Decimal;

/// Validates a salary band's code and range.
///
/// # Arguments
///
/// * `band` - The band to validate
///
/// # Errors
///
/// Returns an error if:
/// - The band code is empty
/// - `min_salary` is negative
/// - The range is not strictly increasing (`min < mid < max`)
pub fn validate_band(band: &SalaryBand) -> Result<(), DomainError> {
    let code: &str = band.band_code.value();
    if code.is_empty() {
        return Err(DomainError::InvalidBandCode(String::from(
            "Band code cannot be empty",
        )));
    }

    let invalid = |reason: &str| DomainError::InvalidBandRange {
        band_code: code.to_string(),
        reason: reason.to_string(),
    };

    if band.min_salary < Decimal::ZERO {
        return Err(invalid("min_salary must not be negative"));
    }
    if band.min_salary >= band.mid_salary {
        return Err(invalid("min_salary must be below mid_salary"));
    }
    if band.mid_salary >= band.max_salary {
        return Err(invalid("mid_salary must be below max_salary"));
    }

    Ok(())
}

/// Validates grant parameters before a schedule is generated.
///
/// # Errors
///
/// Returns `DomainError::InvalidGrant` if:
/// - `total_units` is negative
/// - `cliff_months` exceeds `vesting_schedule_months`
/// - A price is negative
pub fn validate_grant(grant: &RsuGrant) -> Result<(), DomainError> {
    if grant.total_units < 0 {
        return Err(DomainError::InvalidGrant {
            reason: format!("total_units must not be negative, got {}", grant.total_units),
        });
    }

    if grant.cliff_months > grant.vesting_schedule_months {
        return Err(DomainError::InvalidGrant {
            reason: format!(
                "cliff_months ({}) exceeds vesting_schedule_months ({})",
                grant.cliff_months, grant.vesting_schedule_months
            ),
        });
    }

    if grant.price_at_grant < Decimal::ZERO || grant.current_price < Decimal::ZERO {
        return Err(DomainError::InvalidGrant {
            reason: String::from("prices must not be negative"),
        });
    }

    Ok(())
}

/// Validates an employee's basic field constraints.
///
/// Does not check uniqueness of the identifier; that requires the store.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmployee` if:
/// - The name or department is empty
/// - The band code is empty
/// - `annual_fixed` is negative
/// - The performance rating is outside 1.0 to 5.0
pub fn validate_employee(employee: &Employee) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidEmployee {
        reason: reason.to_string(),
    };

    if employee.name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }

    if employee.department.trim().is_empty() {
        return Err(invalid("department cannot be empty"));
    }

    if employee.band.value().is_empty() {
        return Err(invalid("band cannot be empty"));
    }

    if employee.annual_fixed < Decimal::ZERO {
        return Err(invalid("annual_fixed must not be negative"));
    }

    if let Some(rating) = employee.performance_rating
        && !(Decimal::ONE..=Decimal::from(5)).contains(&rating)
    {
        return Err(invalid("performance_rating must be between 1.0 and 5.0"));
    }

    Ok(())
}
