// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Salary band selection and compa-ratio resolution.
//!
//! A compa-ratio is fixed pay expressed as a whole percentage of the band
//! midpoint. Band membership (`BELOW` / `IN_RANGE` / `ABOVE`) is judged against
//! the band's min and max, independently of the compa-ratio policy window.

use crate::arithmetic::checked_percent_of;
use crate::error::DomainError;
use crate::policy::CompaPolicy;
use crate::rounding::whole_percent;
use crate::types::{BandCode, Employee, SalaryBand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::debug;

/// Position of an employee's pay relative to their band's min and max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandStatus {
    /// Pay is below the band minimum.
    Below,
    /// Pay is within `[min, max]`.
    InRange,
    /// Pay is above the band maximum.
    Above,
}

impl BandStatus {
    /// Returns true for `Below` and `Above`.
    #[must_use]
    pub const fn is_outlier(&self) -> bool {
        matches!(self, Self::Below | Self::Above)
    }
}

/// The resolved compa-ratio of a single employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompaRatioResult {
    /// The employee.
    pub employee_id: i64,
    /// The band code that was resolved.
    pub band_code: BandCode,
    /// Fixed pay as a whole percentage of the band midpoint.
    pub compa_ratio: u32,
    /// Band membership by min/max.
    pub status: BandStatus,
    /// Whether `compa_ratio` falls inside the configured policy window.
    pub within_policy_range: bool,
}

/// An employee whose band could not be resolved on the computation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedEmployee {
    /// The employee.
    pub employee_id: i64,
    /// The band code that had no effective row.
    pub band_code: BandCode,
}

/// The outcome of resolving an entire population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PopulationResolution {
    /// Employees with an effective band.
    pub resolved: Vec<CompaRatioResult>,
    /// Employees without one.
    pub unresolved: Vec<UnresolvedEmployee>,
}

/// Selects the band row effective on a given date.
///
/// Among rows sharing `band_code`, the one with the latest `effective_date`
/// not after `on` wins. When several rows share that date, the last one in
/// `bands` wins.
///
/// # Errors
///
/// Returns `DomainError::NoEffectiveBand` if no row qualifies.
pub fn select_effective_band<'a>(
    bands: &'a [SalaryBand],
    band_code: &BandCode,
    on: Date,
) -> Result<&'a SalaryBand, DomainError> {
    let mut selected: Option<&SalaryBand> = None;
    for band in bands
        .iter()
        .filter(|b| &b.band_code == band_code && b.effective_date <= on)
    {
        match selected {
            Some(current) if band.effective_date < current.effective_date => {}
            _ => selected = Some(band),
        }
    }

    selected.ok_or_else(|| DomainError::NoEffectiveBand {
        band_code: band_code.value().to_string(),
        on,
    })
}

/// Computes `round(pay / mid × 100)` with half-away-from-zero rounding.
///
/// # Errors
///
/// Returns `DomainError::InvalidBandRange` if the band midpoint is not
/// positive, or `DomainError::ArithmeticOverflow` if the ratio overflows.
pub fn compa_ratio_for(pay: Decimal, band: &SalaryBand) -> Result<u32, DomainError> {
    if band.mid_salary <= Decimal::ZERO {
        return Err(DomainError::InvalidBandRange {
            band_code: band.band_code.value().to_string(),
            reason: format!("midpoint {} must be positive", band.mid_salary),
        });
    }
    Ok(whole_percent(checked_percent_of(
        pay,
        band.mid_salary,
        "compa-ratio",
    )?))
}

/// Classifies pay against the band's min and max.
#[must_use]
pub fn band_status_for(pay: Decimal, band: &SalaryBand) -> BandStatus {
    if pay < band.min_salary {
        BandStatus::Below
    } else if pay > band.max_salary {
        BandStatus::Above
    } else {
        BandStatus::InRange
    }
}

/// Resolves an employee's compa-ratio against an already selected band.
///
/// # Arguments
///
/// * `employee` - The employee
/// * `band` - The effective band for the employee's code
/// * `policy` - The compa-ratio policy window
///
/// # Errors
///
/// Returns an error if the compa-ratio cannot be computed.
pub fn resolve_compa_ratio(
    employee: &Employee,
    band: &SalaryBand,
    policy: &CompaPolicy,
) -> Result<CompaRatioResult, DomainError> {
    let compa_ratio: u32 = compa_ratio_for(employee.annual_fixed, band)?;
    Ok(CompaRatioResult {
        employee_id: employee.employee_id,
        band_code: band.band_code.clone(),
        compa_ratio,
        status: band_status_for(employee.annual_fixed, band),
        within_policy_range: policy.contains(compa_ratio),
    })
}

/// Resolves every employee in a population.
///
/// Employees whose band has no effective row on `on` are reported in
/// `unresolved`; they are never given a default band.
///
/// # Errors
///
/// Returns an error if a resolved employee's compa-ratio overflows.
pub fn resolve_population(
    employees: &[Employee],
    bands: &[SalaryBand],
    on: Date,
    policy: &CompaPolicy,
) -> Result<PopulationResolution, DomainError> {
    let mut resolution: PopulationResolution = PopulationResolution::default();

    for employee in employees {
        match select_effective_band(bands, &employee.band, on) {
            Ok(band) => resolution
                .resolved
                .push(resolve_compa_ratio(employee, band, policy)?),
            Err(_) => resolution.unresolved.push(UnresolvedEmployee {
                employee_id: employee.employee_id,
                band_code: employee.band.clone(),
            }),
        }
    }

    debug!(
        resolved = resolution.resolved.len(),
        unresolved = resolution.unresolved.len(),
        %on,
        "Resolved population compa-ratios"
    );

    Ok(resolution)
}
