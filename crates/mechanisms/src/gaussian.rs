//! The Gaussian additive-noise mechanism.
//!
//! The scale is calibrated once at construction (or adopted from a shared
//! calibration) and is immutable afterwards, so instances can be used from
//! several threads without coordination.

use rand::Rng;

use noisecal_accounting::{
    calibrate_gaussian_scale, PrivacyBudget, SensitivitySpec, GAUSSIAN_MECHANISM,
};
use noisecal_core::{
    censoring_threshold, sample_gaussian, scale_to_accuracy, DpError, Precision, Result,
};

use crate::mechanism::AdditiveNoiseMechanism;

/// Gaussian release mechanism with a scale certified under zCDP accounting.
#[derive(Clone, Debug)]
pub struct GaussianMechanism {
    budget: PrivacyBudget,
    sensitivity: SensitivitySpec,
    precision: Precision,
    scale: f64,
}

impl GaussianMechanism {
    /// Calibrate a mechanism in the default (64-bit) working domain.
    pub fn new(budget: PrivacyBudget, sensitivity: SensitivitySpec) -> Result<Self> {
        Self::with_precision(budget, sensitivity, Precision::default())
    }

    /// Calibrate a mechanism with an explicit working domain.
    pub fn with_precision(
        budget: PrivacyBudget,
        sensitivity: SensitivitySpec,
        precision: Precision,
    ) -> Result<Self> {
        let scale = calibrate_gaussian_scale(&budget, &sensitivity, precision)?;
        Ok(Self {
            budget,
            sensitivity,
            precision,
            scale,
        })
    }

    /// Adopt a pre-calibrated scale, skipping the search.
    ///
    /// Used when several mechanisms share one calibration.
    pub fn with_scale(
        budget: PrivacyBudget,
        sensitivity: SensitivitySpec,
        precision: Precision,
        scale: f64,
    ) -> Result<Self> {
        budget.require_positive_delta()?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(DpError::invalid(format!(
                "scale must be positive and finite, got {scale}"
            )));
        }
        Ok(Self {
            budget,
            sensitivity,
            precision,
            scale,
        })
    }

    /// The sensitivity description the scale was calibrated for.
    pub fn sensitivity(&self) -> &SensitivitySpec {
        &self.sensitivity
    }

    /// The numeric working domain of release and calibration.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Suppression threshold for censoring low-count dimensions.
    pub fn threshold(&self) -> Result<f64> {
        censoring_threshold(self.scale, self.budget.delta, self.sensitivity.max_contrib)
    }

    /// Release values with noise drawn from the thread-local generator.
    pub fn release(&self, values: &[f64]) -> Vec<f64> {
        self.release_with_rng(values, &mut rand::thread_rng())
    }
}

impl AdditiveNoiseMechanism for GaussianMechanism {
    fn name(&self) -> &'static str {
        GAUSSIAN_MECHANISM
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn budget(&self) -> &PrivacyBudget {
        &self.budget
    }

    fn release_with_rng<R: Rng>(&self, values: &[f64], rng: &mut R) -> Vec<f64> {
        values
            .iter()
            .map(|&v| sample_gaussian(v, self.scale, self.precision, rng))
            .collect()
    }

    fn accuracy(&self, alpha: f64) -> Result<f64> {
        Ok(self.precision.round(scale_to_accuracy(self.scale, alpha)?))
    }
}
