use crate::error::{MatError, Result};
use crate::matrix::dense::Real;
use num_traits::NumCast;
use std::fmt;
use std::str::FromStr;

/// Algorithm used to compute a determinant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetMethod {
    /// Product of the diagonal after Gaussian elimination, O(n^3)
    #[default]
    Gauss,
    /// Recursive expansion along the first row, O(n!).
    /// Only meant as a reference to check `Gauss` against.
    Cofactor,
}

impl FromStr for DetMethod {
    type Err = MatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gauss" => Ok(DetMethod::Gauss),
            "cofactor" | "old" => Ok(DetMethod::Cofactor),
            other => Err(MatError::invalid(
                "method",
                format!("unknown determinant method '{}'", other),
            )),
        }
    }
}

impl fmt::Display for DetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetMethod::Gauss => write!(f, "gauss"),
            DetMethod::Cofactor => write!(f, "cofactor"),
        }
    }
}

/// Numeric settings shared by the elimination based operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Relative pivot threshold. `inverse` treats a pivot as zero when its
    /// magnitude is at or below `pivot_tolerance * max|a_ij|`, so scaling a
    /// matrix does not change whether it is reported singular.
    pub pivot_tolerance: f64,
    pub det_method: DetMethod,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

    pub fn new() -> Self {
        EngineConfig {
            pivot_tolerance: Self::DEFAULT_PIVOT_TOLERANCE,
            det_method: DetMethod::Gauss,
        }
    }

    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Result<Self> {
        self.pivot_tolerance = tolerance;
        self.validate()?;
        Ok(self)
    }

    pub fn with_det_method(mut self, method: DetMethod) -> Self {
        self.det_method = method;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance < 0.0 {
            return Err(MatError::invalid(
                "pivot_tolerance",
                format!(
                    "must be finite and non-negative, got {}",
                    self.pivot_tolerance
                ),
            ));
        }
        Ok(())
    }

    /// The pivot tolerance converted to the element type.
    pub(crate) fn tolerance<T: Real>(&self) -> Result<T> {
        self.validate()?;
        <T as NumCast>::from(self.pivot_tolerance).ok_or_else(|| {
            MatError::invalid("pivot_tolerance", "not representable in the element type")
        })
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
