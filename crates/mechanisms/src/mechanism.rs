//! The additive-noise mechanism seam consumed by the query system.

use rand::Rng;

use noisecal_accounting::PrivacyBudget;
use noisecal_core::Result;

/// A release mechanism that adds calibrated noise to query answers.
///
/// Implementations are immutable after construction: the calibrated scale
/// never changes, and release draws fresh noise on every call.
pub trait AdditiveNoiseMechanism {
    /// Mechanism name used in diagnostics.
    fn name(&self) -> &'static str;

    /// The calibrated noise standard deviation.
    fn scale(&self) -> f64;

    /// The privacy budget the scale was calibrated against.
    fn budget(&self) -> &PrivacyBudget;

    /// Add independently sampled noise to each value.
    fn release_with_rng<R: Rng>(&self, values: &[f64], rng: &mut R) -> Vec<f64>;

    /// Two-sided bound `a` with `P(|noise| > a) <= alpha`.
    fn accuracy(&self, alpha: f64) -> Result<f64>;
}
