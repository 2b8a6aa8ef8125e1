// src/error.rs

//! # Configuration Errors
//!
//! The control law itself never fails during a cycle. Malformed tuning or
//! allocation data is rejected once, when the controller is constructed.

use core::fmt;

/// Reasons a [`FlightControlConfig`](crate::FlightControlConfig) is rejected.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A value is NaN or infinite.
    NonFinite {
        /// Name of the offending configuration item.
        field: &'static str,
    },
    /// A value that must be strictly positive is zero or negative.
    NonPositive {
        /// Name of the offending configuration item.
        field: &'static str,
    },
    /// A value that must be non-negative is negative.
    Negative {
        /// Name of the offending configuration item.
        field: &'static str,
    },
    /// A `[min, max]` pair has `min > max`, or a weight lies outside `(0, 1]`.
    InvertedRange {
        /// Name of the offending configuration item.
        field: &'static str,
    },
    /// `flying_for_sure` is not above `on_ground_for_sure`.
    RegimeThresholds,
    /// An allocation inverse has a zero (or non-finite) determinant.
    SingularAllocation {
        /// Name of the offending allocation block.
        field: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field } => write!(f, "{field} is not finite"),
            ConfigError::NonPositive { field } => write!(f, "{field} must be positive"),
            ConfigError::Negative { field } => write!(f, "{field} must not be negative"),
            ConfigError::InvertedRange { field } => write!(f, "{field} range is inverted"),
            ConfigError::RegimeThresholds => {
                write!(f, "flying_for_sure must exceed on_ground_for_sure")
            }
            ConfigError::SingularAllocation { field } => {
                write!(f, "{field} allocation inverse is singular")
            }
        }
    }
}
