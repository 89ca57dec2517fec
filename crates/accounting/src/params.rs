//! Privacy budget and sensitivity parameters.

use noisecal_core::{DpError, Result};

/// An (epsilon, delta) approximate-DP budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrivacyBudget {
    /// Privacy-loss bound.
    pub epsilon: f64,
    /// Probability of exceeding the privacy-loss bound.
    pub delta: f64,
}

impl PrivacyBudget {
    /// Create a validated budget.
    ///
    /// A zero delta is representable here because sibling mechanisms accept
    /// it; the Gaussian mechanism rejects it at construction.
    pub fn new(epsilon: f64, delta: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(DpError::invalid_budget(format!(
                "epsilon must be positive and finite, got {epsilon}"
            )));
        }
        if !delta.is_finite() || !(0.0..1.0).contains(&delta) {
            return Err(DpError::invalid_budget(format!(
                "delta must be in [0, 1), got {delta}"
            )));
        }
        Ok(Self { epsilon, delta })
    }

    /// Delta, failing when the mechanism requires it to be non-zero.
    pub fn require_positive_delta(&self) -> Result<f64> {
        if self.delta <= 0.0 {
            return Err(DpError::invalid_budget(
                "the gaussian mechanism requires delta > 0.0",
            ));
        }
        Ok(self.delta)
    }
}

/// Clamp bounds and the per-individual contribution cap of a bounded sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensitivitySpec {
    /// Lower clamp bound.
    pub lower: f64,
    /// Upper clamp bound.
    pub upper: f64,
    /// Maximum number of records one individual may contribute.
    pub max_contrib: u32,
}

impl SensitivitySpec {
    /// Create a validated sensitivity description.
    pub fn new(lower: f64, upper: f64, max_contrib: u32) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(DpError::invalid(format!(
                "clamp bounds must be finite, got ({lower}, {upper})"
            )));
        }
        if lower > upper {
            return Err(DpError::invalid(format!(
                "lower bound {lower} exceeds upper bound {upper}"
            )));
        }
        if max_contrib == 0 {
            return Err(DpError::invalid("max_contrib must be at least 1"));
        }
        Ok(Self {
            lower,
            upper,
            max_contrib,
        })
    }

    /// Sensitivity of the clamped sum under `max_contrib` changed records.
    pub fn sum_sensitivity(&self) -> f64 {
        (self.upper - self.lower) * f64::from(self.max_contrib)
    }

    /// Bounds rounded outward so the clamp range is exactly representable.
    pub fn rounded_bounds(&self) -> (f64, f64) {
        (self.lower.floor(), self.upper.ceil())
    }
}
