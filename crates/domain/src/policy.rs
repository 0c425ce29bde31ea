// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Injectable policy constants for every engine component.
//!
//! System defaults live here and nowhere else. Each component receives the
//! section it needs, so the same algorithms can be exercised against
//! alternative policies without code changes.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vesting schedule constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VestingPolicy {
    /// Fraction of the grant released at the cliff.
    pub cliff_fraction: Decimal,
    /// Fraction of the grant released by each periodic tranche.
    pub tranche_fraction: Decimal,
    /// Months between periodic tranches.
    pub tranche_interval_months: u32,
}

impl Default for VestingPolicy {
    fn default() -> Self {
        Self {
            cliff_fraction: Decimal::new(25, 2),
            tranche_fraction: Decimal::new(625, 4),
            tranche_interval_months: 3,
        }
    }
}

/// Accelerator payout constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceleratorPolicy {
    /// Multiplier applied when achievement is below every tier threshold.
    pub baseline_multiplier: Decimal,
}

impl Default for AcceleratorPolicy {
    fn default() -> Self {
        Self {
            baseline_multiplier: Decimal::ONE,
        }
    }
}

/// Compa-ratio policy window used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompaPolicy {
    /// Lowest compa-ratio considered in range (inclusive).
    pub policy_min: u32,
    /// Highest compa-ratio considered in range (inclusive).
    pub policy_max: u32,
}

impl CompaPolicy {
    /// Returns whether a compa-ratio falls inside the policy window.
    #[must_use]
    pub const fn contains(&self, compa_ratio: u32) -> bool {
        compa_ratio >= self.policy_min && compa_ratio <= self.policy_max
    }
}

impl Default for CompaPolicy {
    fn default() -> Self {
        Self {
            policy_min: 80,
            policy_max: 120,
        }
    }
}

/// Relative weights of the equity sub-scores, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityWeights {
    /// Weight of the gender-gap score.
    pub gender: Decimal,
    /// Weight of the compa-ratio distribution score.
    pub compa: Decimal,
    /// Weight of the outlier score.
    pub outlier: Decimal,
}

impl Default for EquityWeights {
    fn default() -> Self {
        Self {
            gender: Decimal::from(40),
            compa: Decimal::from(35),
            outlier: Decimal::from(25),
        }
    }
}

/// Pay-equity scoring constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityPolicy {
    /// Points deducted from the gender score per percentage point of gap.
    pub gender_sensitivity: Decimal,
    /// Points deducted from the outlier score per percentage point of outliers.
    pub outlier_weight: Decimal,
    /// Composite weights.
    pub weights: EquityWeights,
}

impl Default for EquityPolicy {
    fn default() -> Self {
        Self {
            gender_sensitivity: Decimal::from(2),
            outlier_weight: Decimal::from(2),
            weights: EquityWeights::default(),
        }
    }
}

/// Scenario simulation constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationPolicy {
    /// Number of entries kept in `top_changes`.
    pub top_n: usize,
}

impl Default for SimulationPolicy {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

/// The complete policy configuration passed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnginePolicy {
    /// Vesting constants.
    pub vesting: VestingPolicy,
    /// Accelerator constants.
    pub accelerator: AcceleratorPolicy,
    /// Compa-ratio policy window.
    pub compa: CompaPolicy,
    /// Equity scoring constants.
    pub equity: EquityPolicy,
    /// Simulation constants.
    pub simulation: SimulationPolicy,
}

impl EnginePolicy {
    /// Validates internal consistency of the policy.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPolicy` if:
    /// - A vesting fraction is outside `(0, 1]`
    /// - The tranche interval is zero
    /// - The compa window is empty
    /// - A sensitivity or weight is negative
    /// - The equity weights do not sum to 100
    /// - `top_n` is zero
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidPolicy {
            reason: reason.to_string(),
        };

        for (name, fraction) in [
            ("cliff_fraction", self.vesting.cliff_fraction),
            ("tranche_fraction", self.vesting.tranche_fraction),
        ] {
            if fraction <= Decimal::ZERO || fraction > Decimal::ONE {
                return Err(invalid(&format!(
                    "{name} must be in (0, 1], got {fraction}"
                )));
            }
        }

        if self.vesting.tranche_interval_months == 0 {
            return Err(invalid("tranche_interval_months must be at least 1"));
        }

        if self.accelerator.baseline_multiplier.is_sign_negative() {
            return Err(invalid("baseline_multiplier must not be negative"));
        }

        if self.compa.policy_min >= self.compa.policy_max {
            return Err(invalid("compa policy_min must be below policy_max"));
        }

        if self.equity.gender_sensitivity.is_sign_negative()
            || self.equity.outlier_weight.is_sign_negative()
        {
            return Err(invalid("equity sensitivities must not be negative"));
        }

        let weights: &EquityWeights = &self.equity.weights;
        if [weights.gender, weights.compa, weights.outlier]
            .iter()
            .any(Decimal::is_sign_negative)
        {
            return Err(invalid("equity weights must not be negative"));
        }
        let weight_sum: Decimal = weights.gender + weights.compa + weights.outlier;
        if weight_sum != Decimal::ONE_HUNDRED {
            return Err(invalid(&format!(
                "equity weights must sum to 100, got {weight_sum}"
            )));
        }

        if self.simulation.top_n == 0 {
            return Err(invalid("simulation top_n must be at least 1"));
        }

        Ok(())
    }
}
