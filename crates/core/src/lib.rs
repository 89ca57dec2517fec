//! Core primitives for calibrated additive-noise release.
//!
//! This crate provides the building blocks shared by the calibration and
//! mechanism layers: error types, the numeric working domain, the
//! bounded-sum query transformation, Gaussian sampling, and standard-normal
//! quantile helpers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod noise;
pub mod normal;
pub mod precision;
pub mod transform;

pub use error::{DpError, Result};
pub use noise::{add_gaussian_noise, sample_gaussian};
pub use normal::{censoring_threshold, scale_to_accuracy, standard_normal_quantile};
pub use precision::Precision;
pub use transform::BoundedSum;

/// Common imports for downstream users.
pub mod prelude {
    pub use crate::{
        add_gaussian_noise, censoring_threshold, sample_gaussian, scale_to_accuracy,
        standard_normal_quantile, BoundedSum, DpError, Precision, Result,
    };
}
