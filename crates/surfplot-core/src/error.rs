//! Errors raised when configuring a surface.
//!
//! All of these are detected eagerly when parameters are given to a
//! [`Surface`][crate::Surface] (on construction or reconfiguration),
//! so a bad configuration never reaches the render step.
//! Non-finite values produced by the plotted function are not errors;
//! see [`VisData::skipped`][crate::VisData::skipped].

use crate::domain::Axis;

/// Error in configuring or operating a [`Surface`][crate::Surface].
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum PlotError {
    /// The given parameters are not valid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// The specific reason a configuration was rejected.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid spacing along an axis was zero or negative.
    #[error("resolution along the {axis} axis must be positive, got {value}")]
    NonPositiveResolution {
        /// The offending axis.
        axis: Axis,
        /// The given resolution.
        value: f64,
    },
    /// An interval had `min >= max` (or `from > to` for time).
    #[error("interval along the {axis} axis is empty: [{min}, {max}]")]
    EmptyInterval {
        /// The offending axis.
        axis: Axis,
        /// Lower end of the interval.
        min: f64,
        /// Upper end of the interval.
        max: f64,
    },
    /// An axis would have more than
    /// [`MAX_GRID_POINTS`][crate::domain::MAX_GRID_POINTS] grid points.
    #[error(
        "grid along the {axis} axis would have more than {} points: span {span}, step {step}",
        crate::domain::MAX_GRID_POINTS
    )]
    GridTooLarge {
        /// The offending axis.
        axis: Axis,
        /// Length of the interval.
        span: f64,
        /// The given resolution.
        step: f64,
    },
    /// Sampling would evaluate the function more than
    /// [`MAX_FIELD_SAMPLES`][crate::domain::MAX_FIELD_SAMPLES] times.
    #[error(
        "sampling needs {samples} function evaluations, more than the limit of {}",
        crate::domain::MAX_FIELD_SAMPLES
    )]
    FieldTooLarge {
        /// Total number of evaluations requested.
        samples: u64,
    },
    /// A parameter that must be a finite number was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Name of the parameter.
        name: &'static str,
        /// The given value.
        value: f64,
    },
    /// A parameter that must be strictly positive wasn't.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Name of the parameter.
        name: &'static str,
        /// The given value.
        value: f64,
    },
}

/// Check that a named parameter is a finite number.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

/// Check that a named parameter is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    ensure_finite(name, value)?;
    if value > 0. {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
