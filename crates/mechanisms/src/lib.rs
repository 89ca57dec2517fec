//! Facade crate exposing the calibrated release-mechanism surface.
//!
//! The query-execution system consumes this crate: construct a
//! [`GaussianMechanism`] from a privacy budget and a sensitivity
//! description, then use it to release noised values, derive a censoring
//! threshold, and bound the noise magnitude.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod gaussian;
pub mod mechanism;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use noisecal_accounting as accounting;
pub use noisecal_core as core;

pub use noisecal_accounting::{
    approx_dp_epsilon, binary_search_scale, calibrate_gaussian_scale, evaluate_privacy_loss,
    gaussian_rho, rough_gaussian_scale, PrivacyBudget, SensitivitySpec, ZcdpAccountant,
    GAUSSIAN_MECHANISM, MAX_ROUGH_SCALE,
};
pub use noisecal_core::{
    add_gaussian_noise, censoring_threshold, sample_gaussian, scale_to_accuracy,
    standard_normal_quantile, BoundedSum, DpError, Precision, Result,
};
pub use gaussian::GaussianMechanism;
pub use mechanism::AdditiveNoiseMechanism;

/// Convenience prelude covering the mechanism surface.
pub mod prelude {
    pub use crate::gaussian::GaussianMechanism;
    pub use crate::mechanism::AdditiveNoiseMechanism;
    pub use noisecal_accounting::prelude::*;
    pub use noisecal_core::prelude::*;
}
