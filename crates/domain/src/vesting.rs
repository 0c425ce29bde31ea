// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! RSU vesting schedule generation.
//!
//! A schedule is a cliff lump sum followed by periodic tranches. Generation is
//! pure: the same grant, date and policy always produce the same events, so a
//! schedule can be regenerated at any time and compared with what was stored.

use crate::arithmetic::checked_mul;
use crate::calendar::{add_days, add_months};
use crate::error::DomainError;
use crate::policy::VestingPolicy;
use crate::rounding::round2;
use crate::validation::validate_grant;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use tracing::debug;

/// Lifecycle status of a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrantStatus {
    /// The grant is live.
    #[default]
    Active,
    /// The grant was cancelled; no schedule may be issued.
    Cancelled,
    /// Every unit has vested.
    FullyVested,
}

impl GrantStatus {
    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
            Self::FullyVested => "FULLY_VESTED",
        }
    }
}

impl FromStr for GrantStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "CANCELLED" => Ok(Self::Cancelled),
            "FULLY_VESTED" => Ok(Self::FullyVested),
            _ => Err(DomainError::InvalidEnumValue {
                kind: "grant status",
                value: s.to_string(),
            }),
        }
    }
}

/// A restricted stock unit grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsuGrant {
    /// The canonical identifier.
    pub grant_id: i64,
    /// The grantee.
    pub employee_id: i64,
    /// Date the grant was made.
    pub grant_date: Date,
    /// Units granted.
    pub total_units: i64,
    /// Months from grant date to the cliff.
    pub cliff_months: u32,
    /// Months from grant date to the end of the vesting window.
    pub vesting_schedule_months: u32,
    /// Share price on the grant date.
    pub price_at_grant: Decimal,
    /// Latest known share price.
    pub current_price: Decimal,
    /// Lifecycle status.
    pub status: GrantStatus,
}

/// A single dated release of units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsuVestingEvent {
    /// The grant this event belongs to.
    pub grant_id: i64,
    /// 1-based position in the schedule. The cliff is always 1.
    pub sequence: u32,
    /// Date the units vest.
    pub vesting_date: Date,
    /// Units released.
    pub units_vesting: i64,
    /// Whether `vesting_date` is on or before the reference date.
    pub is_vested: bool,
    /// Set to `vesting_date` once vested.
    pub vested_at: Option<Date>,
}

impl RsuVestingEvent {
    fn at(grant_id: i64, sequence: u32, vesting_date: Date, units: i64, as_of: Date) -> Self {
        let is_vested: bool = vesting_date <= as_of;
        Self {
            grant_id,
            sequence,
            vesting_date,
            units_vesting: units,
            is_vested,
            vested_at: is_vested.then_some(vesting_date),
        }
    }
}

/// Vested and unvested position of a grant on a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSummary {
    /// The grant.
    pub grant_id: i64,
    /// The reference date.
    pub as_of: Date,
    /// Units granted.
    pub total_units: i64,
    /// Units vested on or before `as_of`.
    pub vested_units: i64,
    /// Units still to vest.
    pub unvested_units: i64,
    /// `vested_units` at the current price, rounded to 2 dp.
    pub vested_value: Decimal,
    /// `unvested_units` at the current price, rounded to 2 dp.
    pub unvested_value: Decimal,
    /// The next vesting date after `as_of`, if any.
    pub next_vesting_date: Option<Date>,
    /// The full schedule with vested flags as of `as_of`.
    pub events: Vec<RsuVestingEvent>,
}

fn floor_units(total_units: i64, fraction: Decimal) -> Result<i64, DomainError> {
    (Decimal::from(total_units) * fraction)
        .floor()
        .to_i64()
        .ok_or_else(|| DomainError::InvalidGrant {
            reason: format!("{total_units} units cannot be split by {fraction}"),
        })
}

/// Generates the vesting schedule for a grant.
///
/// The cliff event releases `floor(total × cliff_fraction)` units on
/// `grant_date + cliff_months`. Tranches of `floor(total × tranche_fraction)`
/// follow every `tranche_interval_months` while their date stays inside the
/// vesting window and units remain. The last tranche that fits absorbs the
/// rounding remainder. When no tranche fits, the cliff releases the whole
/// grant.
///
/// # Arguments
///
/// * `grant` - The grant
/// * `as_of` - Reference date for the `is_vested` flags
/// * `policy` - Vesting constants
///
/// # Returns
///
/// Events in date order, summing to exactly `total_units`.
///
/// # Errors
///
/// Returns an error if:
/// - The grant is malformed (negative units, cliff after the window)
/// - Date arithmetic overflows
/// - The events would release more units than the grant holds
pub fn generate_vesting_schedule(
    grant: &RsuGrant,
    as_of: Date,
    policy: &VestingPolicy,
) -> Result<Vec<RsuVestingEvent>, DomainError> {
    validate_grant(grant)?;

    let cliff_date: Date = add_months(grant.grant_date, grant.cliff_months)?;

    let mut tranche_dates: Vec<Date> = Vec::new();
    let mut offset: u32 = grant.cliff_months + policy.tranche_interval_months;
    while offset <= grant.vesting_schedule_months {
        tranche_dates.push(add_months(grant.grant_date, offset)?);
        offset += policy.tranche_interval_months;
    }

    let cliff_units: i64 = if tranche_dates.is_empty() {
        grant.total_units
    } else {
        floor_units(grant.total_units, policy.cliff_fraction)?
    };
    let tranche_units: i64 = floor_units(grant.total_units, policy.tranche_fraction)?;

    let mut events: Vec<RsuVestingEvent> = vec![RsuVestingEvent::at(
        grant.grant_id,
        1,
        cliff_date,
        cliff_units,
        as_of,
    )];

    let mut remaining: i64 = grant.total_units - cliff_units;
    let last_index: usize = tranche_dates.len().saturating_sub(1);
    for (idx, date) in tranche_dates.iter().enumerate() {
        if remaining <= 0 {
            break;
        }
        let units: i64 = if idx == last_index {
            remaining
        } else {
            tranche_units.min(remaining)
        };
        if units == 0 {
            continue;
        }
        let sequence: u32 = u32::try_from(events.len() + 1).map_err(|_| {
            DomainError::InvalidGrant {
                reason: String::from("schedule has too many events"),
            }
        })?;
        events.push(RsuVestingEvent::at(
            grant.grant_id,
            sequence,
            *date,
            units,
            as_of,
        ));
        remaining -= units;
    }

    let released: i64 = events.iter().map(|e| e.units_vesting).sum();
    if released > grant.total_units {
        return Err(DomainError::VestingUnitsExceeded {
            released,
            total_units: grant.total_units,
        });
    }

    debug!(
        grant_id = grant.grant_id,
        events = events.len(),
        %cliff_date,
        "Generated vesting schedule"
    );

    Ok(events)
}

/// Returns the units vested on or before `as_of`.
///
/// # Errors
///
/// Returns an error if the schedule cannot be generated.
pub fn vested_units(
    grant: &RsuGrant,
    as_of: Date,
    policy: &VestingPolicy,
) -> Result<i64, DomainError> {
    let events: Vec<RsuVestingEvent> = generate_vesting_schedule(grant, as_of, policy)?;
    Ok(sum_vested(&events, as_of))
}

fn sum_vested(events: &[RsuVestingEvent], as_of: Date) -> i64 {
    events
        .iter()
        .filter(|e| e.vesting_date <= as_of)
        .map(|e| e.units_vesting)
        .sum()
}

/// Recomputes `is_vested` and `vested_at` on stored events.
///
/// Dates and units are left untouched; the schedule is not regenerated.
#[must_use]
pub fn refresh_vesting_status(events: &[RsuVestingEvent], as_of: Date) -> Vec<RsuVestingEvent> {
    events
        .iter()
        .map(|e| {
            RsuVestingEvent::at(e.grant_id, e.sequence, e.vesting_date, e.units_vesting, as_of)
        })
        .collect()
}

/// Summarizes a grant's vested position from its stored events.
///
/// # Errors
///
/// Returns `DomainError::VestingUnitsExceeded` if the stored events release
/// more units than the grant holds, or `DomainError::ArithmeticOverflow` if a
/// position's value at the current price overflows.
pub fn summarize_vesting(
    grant: &RsuGrant,
    events: &[RsuVestingEvent],
    as_of: Date,
) -> Result<VestingSummary, DomainError> {
    let released: i64 = events.iter().map(|e| e.units_vesting).sum();
    if released > grant.total_units {
        return Err(DomainError::VestingUnitsExceeded {
            released,
            total_units: grant.total_units,
        });
    }

    let refreshed: Vec<RsuVestingEvent> = refresh_vesting_status(events, as_of);
    let vested: i64 = sum_vested(&refreshed, as_of);
    let unvested: i64 = grant.total_units - vested;
    let next_vesting_date: Option<Date> = refreshed
        .iter()
        .filter(|e| e.vesting_date > as_of)
        .map(|e| e.vesting_date)
        .min();

    Ok(VestingSummary {
        grant_id: grant.grant_id,
        as_of,
        total_units: grant.total_units,
        vested_units: vested,
        unvested_units: unvested,
        vested_value: round2(checked_mul(
            Decimal::from(vested),
            grant.current_price,
            "vested value",
        )?),
        unvested_value: round2(checked_mul(
            Decimal::from(unvested),
            grant.current_price,
            "unvested value",
        )?),
        next_vesting_date,
        events: refreshed,
    })
}

/// Returns unvested events dated in `(from, from + lookahead_days]`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the window end overflows.
pub fn upcoming_vesting_events(
    events: &[RsuVestingEvent],
    from: Date,
    lookahead_days: u32,
) -> Result<Vec<RsuVestingEvent>, DomainError> {
    let until: Date = add_days(from, lookahead_days)?;
    let mut upcoming: Vec<RsuVestingEvent> = events
        .iter()
        .filter(|e| e.vesting_date > from && e.vesting_date <= until)
        .map(|e| RsuVestingEvent::at(e.grant_id, e.sequence, e.vesting_date, e.units_vesting, from))
        .collect();
    upcoming.sort_by_key(|e| (e.vesting_date, e.grant_id, e.sequence));
    Ok(upcoming)
}
