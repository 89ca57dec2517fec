//! Standard-normal quantile helpers for threshold and accuracy derivation.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{DpError, Result};

/// Quantile of the standard normal distribution at probability `p`.
pub fn standard_normal_quantile(p: f64) -> Result<f64> {
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return Err(DpError::invalid(format!(
            "quantile probability must be in (0, 1), got {p}"
        )));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| DpError::numerical(e.to_string()))?;
    Ok(normal.inverse_cdf(p))
}

/// Two-sided accuracy bound for Gaussian noise.
///
/// Returns `a` such that `P(|noise| > a) <= alpha` for noise drawn from
/// `Normal(0, scale^2)`.
pub fn scale_to_accuracy(scale: f64, alpha: f64) -> Result<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(DpError::invalid(format!(
            "scale must be positive and finite, got {scale}"
        )));
    }
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(DpError::invalid(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    Ok(scale * standard_normal_quantile(1.0 - alpha / 2.0)?)
}

/// Suppression threshold for censoring low-count dimensions.
///
/// The smallest magnitude such that a true-zero dimension is falsely
/// retained with probability at most `delta`, across up to `max_contrib`
/// correlated noisy observations from one individual. The `1/max_contrib`
/// exponent is the union-bound correction over those observations.
pub fn censoring_threshold(scale: f64, delta: f64, max_contrib: u32) -> Result<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(DpError::invalid(format!(
            "scale must be positive and finite, got {scale}"
        )));
    }
    if max_contrib == 0 {
        return Err(DpError::invalid("max_contrib must be at least 1"));
    }
    if delta == 0.0 {
        return Err(DpError::DeltaRequired);
    }
    if !delta.is_finite() || delta < 0.0 || delta >= 1.0 {
        return Err(DpError::invalid(format!(
            "delta must be in [0, 1), got {delta}"
        )));
    }
    let p = (1.0 - delta / 2.0).powf(1.0 / f64::from(max_contrib));
    Ok(1.0 + scale * standard_normal_quantile(p)?)
}
