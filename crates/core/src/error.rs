// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use comp_engine_domain::DomainError;
use thiserror::Error;

/// Errors that can occur during simulation and state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The scenario has already been applied and is immutable.
    #[error("Scenario {scenario_id} has already been applied")]
    ScenarioAlreadyApplied {
        /// The scenario identifier.
        scenario_id: i64,
    },
    /// Another apply of the same scenario is in flight.
    #[error("Scenario {scenario_id} is already being applied")]
    ApplyInProgress {
        /// The scenario identifier.
        scenario_id: i64,
    },
}
