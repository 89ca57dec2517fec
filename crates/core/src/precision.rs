//! Numeric working domain for sampling and accounting.

use crate::error::{DpError, Result};

/// Floating-point bit depth used when releasing values and searching for a
/// noise scale.
///
/// Precision is explicit state carried by each mechanism instance and
/// threaded through every sampling and calibration call. There is no
/// process-wide numeric configuration, so concurrent mechanisms with
/// different precisions need no coordination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 32-bit working domain.
    Single,
    /// 64-bit working domain.
    #[default]
    Double,
}

impl Precision {
    /// Construct from a bit depth.
    pub fn from_bit_depth(bits: u32) -> Result<Self> {
        match bits {
            32 => Ok(Self::Single),
            64 => Ok(Self::Double),
            other => Err(DpError::invalid(format!(
                "unsupported bit depth: {other} (expected 32 or 64)"
            ))),
        }
    }

    /// The bit depth of the working domain.
    pub fn bit_depth(self) -> u32 {
        match self {
            Self::Single => 32,
            Self::Double => 64,
        }
    }

    /// Round a value into the working domain.
    pub fn round(self, x: f64) -> f64 {
        match self {
            Self::Single => x as f32 as f64,
            Self::Double => x,
        }
    }

    /// Absolute interval width at which a scale search stops refining.
    pub fn scale_tolerance(self) -> f64 {
        match self {
            Self::Single => 1e-4,
            Self::Double => 1e-9,
        }
    }
}
