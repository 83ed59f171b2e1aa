use log::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::error::{MatError, Result};
use crate::matrix::dense::{DenseMatrix, Real};

impl<T: Real> DenseMatrix<T> {
    pub fn inverse(&self) -> Result<DenseMatrix<T>> {
        self.inverse_with(&EngineConfig::default())
    }

    /// Gauss-Jordan inversion on the augmented matrix `[M | I]`.
    ///
    /// Rows are first ordered bottom-up so that larger leading entries
    /// float toward the top. At each column the row underneath with the
    /// largest magnitude is then swapped in if it beats the current pivot.
    /// A pivot at or below `pivot_tolerance * max|a_ij|` means the matrix is
    /// singular and `MatError::Singular` is returned before anything is
    /// divided by it.
    pub fn inverse_with(&self, config: &EngineConfig) -> Result<DenseMatrix<T>> {
        let n = self.require_square("inverse")?;
        let threshold = config.tolerance::<T>()? * self.max_abs();

        let mut aug = self.augment(&DenseMatrix::identity(n)?)?;
        let width = aug.cols;

        for i in (1..n).rev() {
            if aug.cell(i - 1, 0) < aug.cell(i, 0) {
                aug.swap_rows(i - 1, i);
            }
        }

        for i in 0..n {
            let mut best = i;
            for r in i + 1..n {
                if aug.cell(r, i).abs() > aug.cell(best, i).abs() {
                    best = r;
                }
            }
            if best != i {
                debug!("inverse: swapping rows {} and {}", i, best);
                aug.swap_rows(i, best);
            }

            if !(aug.cell(i, i).abs() > threshold) {
                let pivot = aug.cell(i, i).to_f64().unwrap_or(f64::NAN);
                warn!("inverse: singular pivot {} at index {}", pivot, i);
                return Err(MatError::Singular { index: i, pivot });
            }

            let pivot = aug.cell(i, i);
            trace!("inverse: eliminating column {} with pivot {}", i, pivot);
            for j in 0..n {
                if j == i {
                    continue;
                }
                let factor = aug.cell(j, i) / pivot;
                for k in 0..width {
                    aug.cells[j * width + k] = aug.cells[j * width + k] - aug.cell(i, k) * factor;
                }
            }
        }

        for i in 0..n {
            let pivot = aug.cell(i, i);
            for k in 0..width {
                aug.cells[i * width + k] = aug.cells[i * width + k] / pivot;
            }
        }

        let inverse = aug.columns(n, width)?;
        if let Some(position) = inverse.cells.iter().position(|x| !x.is_finite()) {
            let index = position / n;
            warn!("inverse: non-finite entry in row {}", index);
            return Err(MatError::Singular {
                index,
                pivot: aug.cell(index, index).to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(inverse)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
