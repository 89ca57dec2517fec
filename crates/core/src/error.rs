//! Error types for calibration and release operations.

/// Errors that can occur while calibrating or running a noise mechanism.
///
/// Every failure is terminal for the calling operation. A scale that could
/// not be certified is never returned, and no privacy parameter is ever
/// relaxed internally.
#[derive(Debug, thiserror::Error)]
pub enum DpError {
    /// The requested privacy budget is not valid for the mechanism.
    #[error("invalid privacy budget: {msg}")]
    InvalidBudget {
        /// Human-readable error description.
        msg: String,
    },

    /// Invalid parameter provided.
    #[error("invalid parameter: {msg}")]
    InvalidParameters {
        /// Human-readable error description.
        msg: String,
    },

    /// The rough closed-form scale estimate exceeded the safety ceiling.
    #[error("noise scale {scale:.3e} is too large using epsilon={epsilon} and bounds ({lower}, {upper}) with the {mechanism} mechanism; preprocess to reduce sensitivity, or try different privacy parameters")]
    ScaleTooLarge {
        /// The rough scale estimate that tripped the ceiling.
        scale: f64,
        /// Target epsilon.
        epsilon: f64,
        /// Lower clamp bound.
        lower: f64,
        /// Upper clamp bound.
        upper: f64,
        /// Mechanism name.
        mechanism: &'static str,
    },

    /// The search could not certify the requested budget.
    #[error("unable to find an appropriate noise scale for the {mechanism} mechanism with epsilon={epsilon} and bounds ({lower}, {upper}); preprocess to reduce sensitivity, or try different privacy parameters")]
    InfeasibleBudget {
        /// Target epsilon.
        epsilon: f64,
        /// Lower clamp bound.
        lower: f64,
        /// Upper clamp bound.
        upper: f64,
        /// Mechanism name.
        mechanism: &'static str,
    },

    /// Threshold-based censoring requires a non-zero delta.
    #[error("censoring requires delta > 0.0; try delta = 1/(n*sqrt(n)) where n is the number of individuals")]
    DeltaRequired,

    /// Numerical computation error.
    #[error("numerical error: {msg}")]
    Numerical {
        /// Human-readable error description.
        msg: String,
    },
}

/// Result type for calibration and release operations.
pub type Result<T> = std::result::Result<T, DpError>;

impl DpError {
    /// Create an invalid budget error.
    pub fn invalid_budget<S: Into<String>>(msg: S) -> Self {
        Self::InvalidBudget { msg: msg.into() }
    }

    /// Create an invalid parameter error.
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameters { msg: msg.into() }
    }

    /// Create a numerical error.
    pub fn numerical<S: Into<String>>(msg: S) -> Self {
        Self::Numerical { msg: msg.into() }
    }
}
