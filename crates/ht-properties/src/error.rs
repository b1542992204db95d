//! Property model errors.

use ht_core::CoreError;
use thiserror::Error;

/// Result type for property operations.
pub type PropertyResult<T> = Result<T, PropertyError>;

/// Errors raised while building, resolving, combining or aggregating properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// Invalid construction input: missing units, wrong dimension, no
    /// coefficients and no data, malformed range.
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    /// Coefficients could not be recovered from experimental data.
    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    /// Aggregate statistics over a group that does not support them.
    #[error("Aggregation error: {what}")]
    Aggregation { what: String },

    /// Derived-quantity operator applied to kinds that do not compose.
    #[error("Incompatible operands: {left} {op} {right} ({reason})")]
    IncompatibleOperands {
        left: String,
        op: String,
        right: String,
        reason: String,
    },

    /// A bare number was given where an absolute temperature is required.
    #[error("Temperature has no unit; pass a Temperature or opt into the Kelvin default")]
    MissingTemperatureUnit,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PropertyError {
    pub(crate) fn config(what: impl Into<String>) -> Self {
        Self::Configuration { what: what.into() }
    }
}

/// Errors from the log-linear regression engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("need at least {required} usable data points, got {usable}")]
    InsufficientData { usable: usize, required: usize },

    #[error("data arrays differ in length (T: {t_len}, y: {y_len})")]
    LengthMismatch { t_len: usize, y_len: usize },

    #[error("all usable samples share one temperature; slope is undetermined")]
    DegenerateTemperatures,

    #[error("coefficients were given explicitly; there is no fit")]
    NotDataBacked,

    #[error("least-squares solve failed")]
    Singular,
}
