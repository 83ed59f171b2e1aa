//! Error types for matrix operations

use std::fmt;
use thiserror::Error;

/// Result type alias using the engine's error
pub type Result<T> = std::result::Result<T, MatError>;

/// Which index of a matrix an out-of-bounds access refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur in matrix operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatError {
    /// Operand shapes are incompatible for the requested operation
    #[error("Shape error in '{op}': {reason}")]
    Shape {
        /// The operation name
        op: &'static str,
        /// What was wrong with the shapes
        reason: String,
    },

    /// Row or column index out of bounds
    #[error("{axis} index {index} out of bounds for size {size}")]
    Index {
        axis: Axis,
        index: usize,
        size: usize,
    },

    /// A pivot could not be resolved during inversion
    #[error("Singular matrix: pivot at index {index} is zero or too small (value: {pivot})")]
    Singular {
        /// Diagonal position of the failing pivot
        index: usize,
        /// Value of the pivot
        pivot: f64,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        arg: &'static str,
        reason: String,
    },
}

impl MatError {
    pub(crate) fn shape(op: &'static str, reason: impl Into<String>) -> Self {
        MatError::Shape {
            op,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(arg: &'static str, reason: impl Into<String>) -> Self {
        MatError::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
