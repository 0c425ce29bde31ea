// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-scenario serialization of apply.

use crate::error::CoreError;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// Tracks which scenarios are currently being applied.
///
/// Cloning shares the same in-flight set.
#[derive(Debug, Clone, Default)]
pub struct ApplyGate {
    in_flight: Arc<Mutex<HashSet<i64>>>,
}

impl ApplyGate {
    /// Creates an empty gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<i64>> {
        // The set stays consistent even if a holder panicked.
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims a scenario for applying.
    ///
    /// The claim is held until the returned permit is dropped.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ApplyInProgress` if another permit for the same
    /// scenario is alive.
    pub fn try_begin(&self, scenario_id: i64) -> Result<ApplyPermit, CoreError> {
        if !self.lock().insert(scenario_id) {
            warn!(scenario_id, "Rejected concurrent apply");
            return Err(CoreError::ApplyInProgress { scenario_id });
        }

        Ok(ApplyPermit {
            gate: self.clone(),
            scenario_id,
        })
    }

    /// Returns whether a scenario is currently being applied.
    #[must_use]
    pub fn is_in_flight(&self, scenario_id: i64) -> bool {
        self.lock().contains(&scenario_id)
    }
}

/// Exclusive right to apply one scenario. Released on drop.
#[derive(Debug)]
pub struct ApplyPermit {
    gate: ApplyGate,
    scenario_id: i64,
}

impl ApplyPermit {
    /// The scenario this permit is for.
    #[must_use]
    pub const fn scenario_id(&self) -> i64 {
        self.scenario_id
    }
}

impl Drop for ApplyPermit {
    fn drop(&mut self) {
        self.gate.lock().remove(&self.scenario_id);
    }
}
