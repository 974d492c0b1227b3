/// Errors raised by problem construction, parameter validation and
/// optimization runs.
///
/// Configuration errors are returned synchronously by builders and
/// [`Problem::new`](crate::Problem::new), never mid-run. Numerical errors
/// and cancellation abort the run in progress; the optimizer's results are
/// undefined afterwards and the caller must re-run from scratch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Returned when a parameter builder receives an out-of-range value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Returned when the bound vectors are empty.
    #[error("bounds must have at least one dimension")]
    EmptyBounds,

    /// Returned when the lower and upper bound vectors differ in length.
    #[error("bounds length mismatch: lower has {lower} entries, upper has {upper}")]
    BoundsLengthMismatch {
        /// Length of the lower bound vector.
        lower: usize,
        /// Length of the upper bound vector.
        upper: usize,
    },

    /// Returned when a lower bound is not strictly below its upper bound.
    #[error("invalid bounds on axis {index}: lower ({lower}) must be less than upper ({upper})")]
    InvalidBounds {
        /// The axis with inconsistent bounds.
        index: usize,
        /// The lower bound value.
        lower: f64,
        /// The upper bound value.
        upper: f64,
    },

    /// Returned when the objective reports a number of outputs the
    /// optimizer cannot work with.
    #[error("objective count mismatch: expected {expected}, got {got}")]
    ObjectiveCountMismatch {
        /// What the optimizer requires.
        expected: usize,
        /// What the objective reports.
        got: usize,
    },

    /// Returned when an optimization is started before parameters were set.
    #[error("optimizer parameters have not been initialized")]
    ParametersNotSet,

    /// Returned when an objective evaluation produced NaN or an infinity.
    #[error("objective {index} evaluated to {value} at {point:?}")]
    NonFiniteObjective {
        /// The decision vector that was evaluated.
        point: Vec<f64>,
        /// Which objective output failed.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when the run observed a cancellation request.
    #[error("optimization was cancelled")]
    Cancelled,
}

/// A convenient alias for `Result<T, blastopt::Error>`.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
