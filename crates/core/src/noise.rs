//! Gaussian sampling primitives for value release.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::precision::Precision;

/// Add `Normal(0, scale^2)` noise to a single value in the given precision.
///
/// Non-positive or non-finite scales leave the value un-noised, and
/// non-finite values pass through unchanged.
pub fn sample_gaussian<R: Rng>(value: f64, scale: f64, precision: Precision, rng: &mut R) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if !scale.is_finite() || scale <= 0.0 {
        return precision.round(value);
    }
    let dist = match Normal::new(0.0, scale) {
        Ok(d) => d,
        Err(_) => return precision.round(value),
    };
    precision.round(precision.round(value) + dist.sample(rng))
}

/// Add independently sampled Gaussian noise to every value in a slice.
pub fn add_gaussian_noise<R: Rng>(
    values: &mut [f64],
    scale: f64,
    precision: Precision,
    rng: &mut R,
) {
    if !scale.is_finite() || scale <= 0.0 || values.is_empty() {
        return;
    }
    let dist = match Normal::new(0.0, scale) {
        Ok(d) => d,
        Err(_) => return,
    };
    for v in values.iter_mut() {
        if v.is_finite() {
            *v = precision.round(precision.round(*v) + dist.sample(rng));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sampling_is_deterministic_under_a_seed() {
        let mut r1 = ChaCha8Rng::seed_from_u64(42);
        let mut r2 = ChaCha8Rng::seed_from_u64(42);
        let a = sample_gaussian(5.0, 1.0, Precision::Double, &mut r1);
        let b = sample_gaussian(5.0, 1.0, Precision::Double, &mut r2);
        assert_eq!(a, b);
        assert_ne!(a, 5.0);
    }

    #[test]
    fn noise_statistics_match_the_scale() {
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        let mut values = vec![0.0; 10_000];
        add_gaussian_noise(&mut values, 1.0, Precision::Double, &mut rng);

        let mean: f64 = values.iter().sum::<f64>() / values.len() as f64;
        let var: f64 =
            values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;

        assert!(mean.abs() < 0.1);
        assert!((var - 1.0).abs() < 0.1);
    }

    #[test]
    fn degenerate_scale_leaves_values_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut values = vec![1.0, 2.0];
        add_gaussian_noise(&mut values, 0.0, Precision::Double, &mut rng);
        assert_eq!(values, vec![1.0, 2.0]);
        assert_eq!(
            sample_gaussian(3.0, f64::NAN, Precision::Double, &mut rng),
            3.0
        );
    }

    #[test]
    fn single_precision_outputs_are_f32_representable() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let noised = sample_gaussian(5.0, 1.0, Precision::Single, &mut rng);
        assert_eq!(noised, noised as f32 as f64);
    }

    #[test]
    fn non_finite_values_pass_through() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(sample_gaussian(f64::NAN, 1.0, Precision::Double, &mut rng).is_nan());
        assert_eq!(
            sample_gaussian(f64::INFINITY, 1.0, Precision::Double, &mut rng),
            f64::INFINITY
        );
    }
}
