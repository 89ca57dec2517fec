//! Noise-scale calibration for the Gaussian release mechanism.
//!
//! Calibration treats the accounting as a pure function from candidate
//! scale to realized epsilon at the fixed target delta. The function is
//! strictly decreasing in scale, so the minimal certified scale is found by
//! bracketing and bisection, bounded by an iteration cap and a
//! precision-derived interval tolerance.

use noisecal_core::{BoundedSum, DpError, Precision, Result};

use crate::params::{PrivacyBudget, SensitivitySpec};
use crate::zcdp::{approx_dp_epsilon, gaussian_rho};

/// Name the Gaussian mechanism reports in diagnostics.
pub const GAUSSIAN_MECHANISM: &str = "gaussian";

/// Safety ceiling for the rough closed-form scale estimate.
pub const MAX_ROUGH_SCALE: f64 = 10_000_000.0;

const MAX_SEARCH_ITERS: usize = 120;
const MAX_BRACKET_STEPS: usize = 60;

/// Classical (non-tight) Gaussian-mechanism scale for a single clamped sum.
///
/// Used only as a search starting point and as the degenerate-parameter
/// guard; the certified scale comes from the zCDP search.
pub fn rough_gaussian_scale(budget: &PrivacyBudget, sensitivity: &SensitivitySpec) -> f64 {
    (sensitivity.upper - sensitivity.lower)
        * f64::from(sensitivity.max_contrib)
        * (2.0 * (1.25 / budget.delta).ln()).sqrt()
        / budget.epsilon
}

/// Realized approximate-DP epsilon of the clamped-sum-then-Gaussian
/// mechanism at a candidate scale, with the input distance fixed at the
/// contribution cap and delta fixed by the caller.
///
/// An infinite result means the candidate does not satisfy any finite
/// epsilon at this delta; only NaN intermediates are reported as errors.
pub fn evaluate_privacy_loss(
    transform: &BoundedSum,
    scale: f64,
    input_distance: u32,
    delta: f64,
) -> Result<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(DpError::invalid(format!(
            "candidate scale must be positive and finite, got {scale}"
        )));
    }
    let rho = gaussian_rho(transform.sensitivity(input_distance), scale);
    let epsilon = approx_dp_epsilon(rho, delta);
    if epsilon.is_nan() {
        return Err(DpError::numerical(format!(
            "privacy-loss evaluation produced NaN at scale {scale}"
        )));
    }
    Ok(epsilon)
}

/// Minimal scale whose realized epsilon is at or below the target.
///
/// `eval` must be non-increasing in scale. The accepting end of the final
/// bracket is returned, so ties and evaluation noise resolve to the larger,
/// privacy-safe scale.
pub fn binary_search_scale(
    eval: impl Fn(f64) -> Result<f64>,
    target_epsilon: f64,
    initial_scale: f64,
    tol: f64,
    max_iters: usize,
) -> Result<f64> {
    if !target_epsilon.is_finite() || target_epsilon <= 0.0 {
        return Err(DpError::invalid(
            "target epsilon must be positive and finite",
        ));
    }
    if !initial_scale.is_finite() || initial_scale <= 0.0 {
        return Err(DpError::invalid(
            "initial scale must be positive and finite",
        ));
    }
    let tol = tol.max(f64::EPSILON);
    let accepts = |scale: f64| -> Result<bool> { Ok(eval(scale)? <= target_epsilon) };

    let mut lo;
    let mut hi;
    if accepts(initial_scale)? {
        // Shrink the rejecting end toward zero.
        hi = initial_scale;
        lo = initial_scale / 2.0;
        let mut steps = 0usize;
        while accepts(lo)? {
            hi = lo;
            lo /= 2.0;
            steps += 1;
            if steps >= MAX_BRACKET_STEPS || hi <= tol {
                // Everything accepts down to the tolerance floor.
                return Ok(hi);
            }
        }
    } else {
        // Expand the accepting end upward.
        lo = initial_scale;
        hi = initial_scale * 2.0;
        let mut steps = 0usize;
        while !accepts(hi)? {
            lo = hi;
            hi *= 2.0;
            steps += 1;
            if steps >= MAX_BRACKET_STEPS || !hi.is_finite() {
                return Err(DpError::invalid(
                    "failed to bracket a scale achieving the target epsilon",
                ));
            }
        }
    }

    for _ in 0..max_iters.max(1) {
        if hi - lo <= tol {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if accepts(mid)? {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    Ok(hi)
}

/// Calibrate the minimal Gaussian noise scale certifying `budget` for the
/// clamped-sum query described by `sensitivity`.
pub fn calibrate_gaussian_scale(
    budget: &PrivacyBudget,
    sensitivity: &SensitivitySpec,
    precision: Precision,
) -> Result<f64> {
    budget.require_positive_delta()?;

    let (lower, upper) = sensitivity.rounded_bounds();
    let transform = BoundedSum::new(lower, upper)?;

    let rough = rough_gaussian_scale(budget, sensitivity);
    if !rough.is_finite() || rough > MAX_ROUGH_SCALE {
        return Err(DpError::ScaleTooLarge {
            scale: rough,
            epsilon: budget.epsilon,
            lower: sensitivity.lower,
            upper: sensitivity.upper,
            mechanism: GAUSSIAN_MECHANISM,
        });
    }

    let delta = budget.delta;
    let input_distance = sensitivity.max_contrib;
    let eval = |scale: f64| evaluate_privacy_loss(&transform, scale, input_distance, delta);

    let initial = if rough > 0.0 { rough } else { 1.0 };
    binary_search_scale(
        eval,
        budget.epsilon,
        initial,
        precision.scale_tolerance(),
        MAX_SEARCH_ITERS,
    )
    .map_err(|err| match err {
        DpError::Numerical { .. } => err,
        _ => DpError::InfeasibleBudget {
            epsilon: budget.epsilon,
            lower: sensitivity.lower,
            upper: sensitivity.upper,
            mechanism: GAUSSIAN_MECHANISM,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn certified_epsilon(spec: &SensitivitySpec, delta: f64, scale: f64) -> f64 {
        let (lower, upper) = spec.rounded_bounds();
        let transform = BoundedSum::new(lower, upper).unwrap();
        evaluate_privacy_loss(&transform, scale, spec.max_contrib, delta).unwrap()
    }

    /// Exact minimizer of `rho + 2 sqrt(rho L) = eps` for cross-checking.
    fn exact_scale(sensitivity: f64, epsilon: f64, delta: f64) -> f64 {
        let l = (1.0 / delta).ln();
        let rho = ((l + epsilon).sqrt() - l.sqrt()).powi(2);
        sensitivity / (2.0 * rho).sqrt()
    }

    #[test]
    fn calibrated_scale_is_certified() {
        let budget = PrivacyBudget::new(1.0, 1e-5).unwrap();
        let spec = SensitivitySpec::new(0.0, 10.0, 1).unwrap();
        let scale = calibrate_gaussian_scale(&budget, &spec, Precision::Double).unwrap();

        assert!(scale.is_finite());
        assert!(scale > 0.0);
        let realized = certified_epsilon(&spec, budget.delta, scale);
        assert!(realized <= budget.epsilon + 1e-6);
    }

    #[test]
    fn calibrated_scale_matches_exact_minimizer() {
        let budget = PrivacyBudget::new(0.5, 1e-6).unwrap();
        let spec = SensitivitySpec::new(0.0, 4.0, 2).unwrap();
        let scale = calibrate_gaussian_scale(&budget, &spec, Precision::Double).unwrap();

        let expected = exact_scale(spec.sum_sensitivity(), budget.epsilon, budget.delta);
        assert!((scale - expected).abs() < 1e-6);
        // Never below the true minimum.
        assert!(scale >= expected - Precision::Double.scale_tolerance());
    }

    #[test]
    fn degenerate_parameters_trip_the_rough_scale_guard() {
        let budget = PrivacyBudget::new(1e-12, 1e-5).unwrap();
        let spec = SensitivitySpec::new(0.0, 1e12, 1).unwrap();
        let err = calibrate_gaussian_scale(&budget, &spec, Precision::Double).unwrap_err();
        match err {
            DpError::ScaleTooLarge { scale, epsilon, .. } => {
                assert!(scale > MAX_ROUGH_SCALE);
                assert_eq!(epsilon, 1e-12);
            }
            other => panic!("expected ScaleTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn zero_delta_is_rejected_before_searching() {
        let budget = PrivacyBudget::new(1.0, 0.0).unwrap();
        let spec = SensitivitySpec::new(0.0, 1.0, 1).unwrap();
        assert!(matches!(
            calibrate_gaussian_scale(&budget, &spec, Precision::Double),
            Err(DpError::InvalidBudget { .. })
        ));
    }

    #[test]
    fn search_rejects_a_predicate_that_never_accepts() {
        let err = binary_search_scale(|_| Ok(f64::INFINITY), 1.0, 1.0, 1e-9, 120).unwrap_err();
        assert!(matches!(err, DpError::InvalidParameters { .. }));
    }

    #[test]
    fn search_propagates_numeric_failures() {
        let err = binary_search_scale(
            |_| Err(DpError::numerical("overflow")),
            1.0,
            1.0,
            1e-9,
            120,
        )
        .unwrap_err();
        assert!(matches!(err, DpError::Numerical { .. }));
    }

    #[test]
    fn search_returns_the_accepting_end() {
        // Step predicate: accepts at or above 3.0 exactly.
        let eval = |scale: f64| Ok(if scale >= 3.0 { 0.5 } else { 2.0 });
        let found = binary_search_scale(eval, 1.0, 1.0, 1e-9, 120).unwrap();
        assert!(found >= 3.0);
        assert!((found - 3.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_width_calibrates_to_a_tiny_scale() {
        let budget = PrivacyBudget::new(1.0, 1e-5).unwrap();
        let spec = SensitivitySpec::new(5.0, 5.0, 1).unwrap();
        let scale = calibrate_gaussian_scale(&budget, &spec, Precision::Double).unwrap();
        assert!(scale > 0.0);
        assert!(scale <= 1.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

        #[test]
        fn calibration_meets_the_target(
            epsilon in 0.05f64..8.0,
            upper in 1.0f64..500.0,
            max_contrib in 1u32..10,
        ) {
            let budget = PrivacyBudget::new(epsilon, 1e-6).unwrap();
            let spec = SensitivitySpec::new(0.0, upper, max_contrib).unwrap();
            let scale = calibrate_gaussian_scale(&budget, &spec, Precision::Double).unwrap();
            let realized = certified_epsilon(&spec, budget.delta, scale);
            prop_assert!(scale > 0.0);
            prop_assert!(realized <= epsilon + 1e-6);
        }

        #[test]
        fn looser_epsilon_never_increases_the_scale(
            eps_a in 0.05f64..8.0,
            eps_b in 0.05f64..8.0,
            upper in 1.0f64..500.0,
        ) {
            let tight = eps_a.min(eps_b);
            let loose = eps_a.max(eps_b);
            let spec = SensitivitySpec::new(0.0, upper, 1).unwrap();
            let scale_tight = calibrate_gaussian_scale(
                &PrivacyBudget::new(tight, 1e-6).unwrap(), &spec, Precision::Double).unwrap();
            let scale_loose = calibrate_gaussian_scale(
                &PrivacyBudget::new(loose, 1e-6).unwrap(), &spec, Precision::Double).unwrap();
            prop_assert!(scale_loose <= scale_tight + 1e-6);
        }
    }
}
