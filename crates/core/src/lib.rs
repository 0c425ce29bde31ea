// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod error;
mod gate;
mod simulation;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{
    AchievementInput, apply_scenario, issue_vesting_schedule, record_commission_achievement,
};
pub use error::CoreError;
pub use gate::{ApplyGate, ApplyPermit};
pub use simulation::{BandCost, EmployeeProjection, ScenarioRunResult, run_scenario};
pub use state::{
    AchievementRecord, CompensationSnapshot, EmployeePayUpdate, ScenarioApplication,
    VestingIssuance,
};
