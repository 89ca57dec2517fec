//! Zero-concentrated differential privacy accounting.
//!
//! A Gaussian release of a query with sensitivity `s` at noise scale `sigma`
//! satisfies rho-zCDP with `rho = s^2 / (2 sigma^2)`, and rho composes
//! additively across releases. A rho-zCDP mechanism is `(alpha * rho)`-RDP
//! at every Renyi order, so the approximate-DP epsilon at a fixed delta is
//! `min over alpha > 1 of alpha * rho + ln(1/delta) / (alpha - 1)`, whose
//! minimum has the closed form `rho + 2 * sqrt(rho * ln(1/delta))`.

/// zCDP parameter of one Gaussian release.
///
/// Degenerate sensitivities and scales map to an infinite parameter, never
/// to a spurious finite guarantee.
pub fn gaussian_rho(sensitivity: f64, scale: f64) -> f64 {
    if !sensitivity.is_finite() || sensitivity < 0.0 {
        return f64::INFINITY;
    }
    if !scale.is_finite() || scale <= 0.0 {
        return f64::INFINITY;
    }
    if sensitivity == 0.0 {
        return 0.0;
    }
    let ratio = sensitivity / scale;
    0.5 * ratio * ratio
}

/// Convert rho-zCDP to the approximate-DP epsilon at a fixed delta.
pub fn approx_dp_epsilon(rho: f64, delta: f64) -> f64 {
    if !delta.is_finite() || delta <= 0.0 || delta >= 1.0 {
        return f64::INFINITY;
    }
    if !rho.is_finite() || rho < 0.0 {
        return f64::INFINITY;
    }
    if rho == 0.0 {
        return 0.0;
    }
    rho + 2.0 * (rho * (1.0 / delta).ln()).sqrt()
}

/// Accountant accumulating the zCDP of Gaussian releases.
#[derive(Clone, Debug, Default)]
pub struct ZcdpAccountant {
    rho: f64,
}

impl ZcdpAccountant {
    /// Create an accountant with no recorded releases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one Gaussian release.
    pub fn add_gaussian(&mut self, sensitivity: f64, scale: f64) {
        let rho = gaussian_rho(sensitivity, scale);
        if rho.is_finite() {
            self.rho += rho;
        } else {
            self.invalidate();
        }
    }

    /// Total accumulated zCDP parameter.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Convert to (epsilon, delta)-DP at the given delta.
    pub fn epsilon(&self, delta: f64) -> f64 {
        approx_dp_epsilon(self.rho, delta)
    }

    /// Reset the accountant.
    pub fn reset(&mut self) {
        self.rho = 0.0;
    }

    fn invalidate(&mut self) {
        self.rho = f64::INFINITY;
    }
}
