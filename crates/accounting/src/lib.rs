//! Privacy accounting and noise-scale calibration for bounded-sum release.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod calibrate;
pub mod params;
pub mod zcdp;

pub use calibrate::{
    binary_search_scale, calibrate_gaussian_scale, evaluate_privacy_loss, rough_gaussian_scale,
    GAUSSIAN_MECHANISM, MAX_ROUGH_SCALE,
};
pub use params::{PrivacyBudget, SensitivitySpec};
pub use zcdp::{approx_dp_epsilon, gaussian_rho, ZcdpAccountant};

/// Common imports for privacy accounting.
pub mod prelude {
    pub use crate::{
        approx_dp_epsilon, binary_search_scale, calibrate_gaussian_scale, evaluate_privacy_loss,
        gaussian_rho, rough_gaussian_scale, PrivacyBudget, SensitivitySpec, ZcdpAccountant,
        GAUSSIAN_MECHANISM, MAX_ROUGH_SCALE,
    };
}
