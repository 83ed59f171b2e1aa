//! Dense real-valued matrices: construction, arithmetic, transposition,
//! Gaussian elimination, determinants and Gauss-Jordan inversion.

pub mod matrix {
    pub mod dense;
    pub mod elimination;
    pub mod inverse;
    pub mod matrix;
}

pub mod config;
pub mod error;

#[cfg(feature = "python")]
pub mod python;

pub use config::{DetMethod, EngineConfig};
pub use error::{Axis, MatError, Result};
pub use matrix::dense::{dot, DenseMatrix, Mat, Real};
pub use matrix::elimination::Echelon;
pub use matrix::matrix::Matrix;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn rust_mat(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyMat>()?;
    Ok(())
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Generic over any storage implementing the trait
    fn inverse_as_list<M: Matrix<f64>>(a: &M) -> Result<Vec<Vec<f64>>> {
        let (rows, cols) = a.shape();
        assert_eq!(rows, cols);
        Ok(a.inverse()?.to_list())
    }

    #[test]
    fn test_scenarios() {
        let a = Mat::from_rows(vec![vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
        assert_eq!(a.shape(), (2, 3));
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(0, 1).unwrap(), 4.);

        let b = Mat::from_rows(vec![vec![7., 8.], vec![9., 10.], vec![11., 12.]]).unwrap();
        assert_eq!(
            a.multiply(&b).unwrap(),
            Mat::from_rows(vec![vec![58., 64.], vec![139., 154.]]).unwrap()
        );

        let c = Mat::from_rows(vec![vec![1., 2.], vec![3., 4.]]).unwrap();
        assert_abs_diff_eq!(c.determinant_with(DetMethod::Gauss).unwrap(), -2., epsilon = 1e-12);
        assert_abs_diff_eq!(
            c.determinant_with(DetMethod::Cofactor).unwrap(),
            -2.,
            epsilon = 1e-12
        );

        let i = Mat::identity(3).unwrap();
        assert_eq!(i.inverse().unwrap(), i);

        let s = Mat::from_rows(vec![vec![1., 0.], vec![0., 0.]]).unwrap();
        assert!(matches!(s.inverse(), Err(MatError::Singular { .. })));
    }

    #[test]
    fn test_matrix_trait() {
        let a = <Mat as Matrix<f64>>::from_list(vec![vec![2., 0.], vec![0., 4.]]).unwrap();
        assert_eq!(a.at(1, 1), 4.);
        assert_eq!(
            inverse_as_list(&a).unwrap(),
            vec![vec![0.5, 0.], vec![0., 0.25]]
        );
        assert_eq!(<Mat as Matrix<f64>>::identity(2).unwrap().to_list()[0], vec![1., 0.]);
        assert_eq!(Matrix::echelon_form(&a).swaps, 0);
        assert_eq!(Matrix::determinant(&a).unwrap(), 8.);
        assert_eq!(Matrix::transpose(&a), a);
    }
}
