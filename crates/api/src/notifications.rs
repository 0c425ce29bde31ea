// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One-way notifications emitted by orchestrator operations.
//!
//! Notifications are facts about what happened, never instructions. The API
//! returns them next to its results; delivering them is the caller's concern.

use comp_engine_domain::RsuVestingEvent;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// A fact the notification layer is informed about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notification {
    /// A vesting event falls inside the requested lookahead window.
    VestingUpcoming {
        /// The grant.
        grant_id: i64,
        /// The grantee.
        employee_id: i64,
        /// The event's position in the schedule.
        sequence: u32,
        /// The date the units vest.
        vesting_date: Date,
        /// Units released on that date.
        units_vesting: i64,
    },
    /// A scenario was applied and its pay changes committed.
    ScenarioApplied {
        /// The scenario.
        scenario_id: i64,
        /// The scenario's name.
        name: String,
        /// Employees whose pay changed.
        affected_count: usize,
        /// Change in annual cost.
        delta: Decimal,
        /// When the scenario became `APPLIED`.
        applied_at: String,
    },
}

impl Notification {
    /// Builds the notification for one upcoming vesting event.
    #[must_use]
    pub const fn vesting_upcoming(event: &RsuVestingEvent, employee_id: i64) -> Self {
        Self::VestingUpcoming {
            grant_id: event.grant_id,
            employee_id,
            sequence: event.sequence,
            vesting_date: event.vesting_date,
            units_vesting: event.units_vesting,
        }
    }
}
