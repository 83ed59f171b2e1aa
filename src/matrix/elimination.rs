use log::{debug, trace};

use crate::config::{DetMethod, EngineConfig};
use crate::error::{MatError, Result};
use crate::matrix::dense::{DenseMatrix, Real};

/// Upper-triangular form of a matrix together with the number of row
/// interchanges that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Echelon<M> {
    pub matrix: M,
    pub swaps: usize,
}

impl<T: Real> Echelon<DenseMatrix<T>> {
    /// Number of rows holding at least one entry above `tolerance`.
    pub fn rank(&self, tolerance: T) -> usize {
        self.matrix
            .cells
            .chunks(self.matrix.cols)
            .filter(|line| line.iter().any(|x| x.abs() > tolerance))
            .count()
    }

    /// Determinant of the source matrix, read off the reduced form.
    pub fn determinant(&self) -> T {
        let n = self.matrix.rows.min(self.matrix.cols);
        let d = (0..n).fold(T::one(), |acc, i| acc * self.matrix.cell(i, i));
        if self.swaps % 2 == 1 {
            -d
        } else {
            d
        }
    }
}

impl<T: Real> DenseMatrix<T> {
    /// Gaussian elimination with partial pivoting.
    ///
    /// Works on a copy: `self` is never modified. At each step the row with
    /// the largest magnitude in the pivot column is moved up (the first one
    /// wins on ties). A column without a non-zero candidate is skipped
    /// without consuming a pivot row.
    pub fn gauss(&self) -> Echelon<DenseMatrix<T>> {
        let mut c = self.clone();
        let (m, n) = (c.rows, c.cols);
        let (mut h, mut k) = (0, 0);
        let mut swaps = 0;

        while h < m && k < n {
            let mut i_max = h;
            let mut max_entry = c.cell(h, k).abs();
            for i in h + 1..m {
                let entry = c.cell(i, k).abs();
                if entry > max_entry {
                    max_entry = entry;
                    i_max = i;
                }
            }

            if c.cell(i_max, k) == T::zero() {
                trace!("gauss: column {} has no pivot below row {}", k, h);
                k += 1;
                continue;
            }

            if h != i_max {
                debug!("gauss: swapping rows {} and {}", h, i_max);
                c.swap_rows(h, i_max);
                swaps += 1;
            }

            let pivot = c.cell(h, k);
            for i in h + 1..m {
                let f = c.cell(i, k) / pivot;
                c.cells[i * n + k] = T::zero();
                for j in k + 1..n {
                    c.cells[i * n + j] = c.cells[i * n + j] - c.cell(h, j) * f;
                }
            }

            h += 1;
            k += 1;
        }

        Echelon { matrix: c, swaps }
    }

    pub(crate) fn require_square(&self, op: &'static str) -> Result<usize> {
        if !self.is_square() {
            return Err(MatError::shape(
                op,
                format!("expected a square matrix, got {}x{}", self.rows, self.cols),
            ));
        }
        Ok(self.rows)
    }

    pub fn determinant(&self) -> Result<T> {
        self.determinant_with(DetMethod::default())
    }

    pub fn determinant_with_config(&self, config: &EngineConfig) -> Result<T> {
        self.determinant_with(config.det_method)
    }

    pub fn determinant_with(&self, method: DetMethod) -> Result<T> {
        self.require_square("determinant")?;
        Ok(match method {
            DetMethod::Gauss => self.gauss().determinant(),
            DetMethod::Cofactor => self.cofactor_determinant(),
        })
    }

    fn cofactor_determinant(&self) -> T {
        match self.rows {
            1 => self.cell(0, 0),
            2 => self.cell(0, 0) * self.cell(1, 1) - self.cell(0, 1) * self.cell(1, 0),
            n => (0..n).fold(T::zero(), |acc, i| {
                let term = self.cell(0, i) * self.minor(0, i).cofactor_determinant();
                if i % 2 == 0 {
                    acc + term
                } else {
                    acc - term
                }
            }),
        }
    }

    /// Copy without row `row` and column `col`. Only called on matrices of
    /// order 2 or more.
    fn minor(&self, row: usize, col: usize) -> DenseMatrix<T> {
        DenseMatrix {
            rows: self.rows - 1,
            cols: self.cols - 1,
            cells: (0..self.rows)
                .filter(|r| *r != row)
                .flat_map(|r| {
                    self.row(r)
                        .iter()
                        .enumerate()
                        .filter(move |(c, _)| *c != col)
                        .map(|(_, x)| *x)
                })
                .collect(),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::dense::Mat;
    use crate::matrix::matrix::Matrix;
    use approx::{assert_abs_diff_eq, assert_relative_eq, relative_eq};
    use proptest::prelude::*;

    fn m(lines: Vec<Vec<f64>>) -> Mat {
        Mat::from_rows(lines).unwrap()
    }

    fn square(max_order: usize) -> impl Strategy<Value = Mat> {
        (1..=max_order).prop_flat_map(|n| {
            prop::collection::vec(-10.0f64..10.0, n * n)
                .prop_map(move |cells| Mat::from_flat(n, n, cells).unwrap())
        })
    }

    #[test]
    fn test_gauss_upper_triangular() {
        let a = m(vec![vec![2., 1., -1.], vec![-3., -1., 2.], vec![-2., 1., 2.]]);
        let reduced = a.gauss();

        for i in 0..3 {
            for j in 0..i {
                assert_eq!(reduced.matrix.get(i, j).unwrap(), 0.);
            }
        }
        // Largest magnitude in the first column is -3
        assert_eq!(reduced.matrix.get_row(0).unwrap(), vec![-3., -1., 2.]);
        assert!(reduced.swaps >= 1);
        assert_eq!(reduced.rank(1e-12), 3);

        // Input is untouched
        assert_eq!(
            a,
            m(vec![vec![2., 1., -1.], vec![-3., -1., 2.], vec![-2., 1., 2.]])
        );
    }

    #[test]
    fn test_gauss_ties_keep_first_row() {
        let a = m(vec![vec![1., 2.], vec![-1., 5.]]);
        let reduced = a.gauss();
        assert_eq!(reduced.swaps, 0);
        assert_eq!(reduced.matrix.to_list(), vec![vec![1., 2.], vec![0., 7.]]);
    }

    #[test]
    fn test_gauss_skips_zero_column() {
        let a = m(vec![vec![0., 1., 2.], vec![0., 3., 4.]]);
        let reduced = a.gauss();
        assert_eq!(reduced.swaps, 1);
        assert_eq!(reduced.matrix.get_row(0).unwrap(), vec![0., 3., 4.]);
        assert_eq!(reduced.matrix.get(1, 1).unwrap(), 0.);
        assert_abs_diff_eq!(reduced.matrix.get(1, 2).unwrap(), 2. - 4. / 3., epsilon = 1e-12);
        assert_eq!(reduced.rank(1e-12), 2);
    }

    #[test]
    fn test_gauss_rank_deficient() {
        let a = m(vec![vec![1., 2., 3.], vec![2., 4., 6.], vec![1., 1., 1.]]);
        assert_eq!(a.gauss().rank(1e-9), 2);
        assert_eq!(a.echelon_form().rank(1e-9), 2);
    }

    #[test]
    fn test_determinant_2x2() {
        let a = m(vec![vec![1., 2.], vec![3., 4.]]);
        assert_relative_eq!(a.determinant().unwrap(), -2., epsilon = 1e-12);
        assert_eq!(a.determinant_with(DetMethod::Cofactor).unwrap(), -2.);
    }

    #[test]
    fn test_determinant_known_values() {
        let a = m(vec![vec![5., 7., 9.], vec![4., 3., 8.], vec![7., 5., 6.]]);
        assert_relative_eq!(a.determinant().unwrap(), 105., max_relative = 1e-10);
        assert_relative_eq!(
            a.determinant_with(DetMethod::Cofactor).unwrap(),
            105.,
            max_relative = 1e-12
        );

        assert_eq!(m(vec![vec![-4.5]]).determinant().unwrap(), -4.5);
        assert_eq!(
            m(vec![vec![-4.5]])
                .determinant_with(DetMethod::Cofactor)
                .unwrap(),
            -4.5
        );
        assert_eq!(Mat::identity(5).unwrap().determinant().unwrap(), 1.);
    }

    #[test]
    fn test_determinant_row_swaps_flip_sign() {
        let p = m(vec![vec![0., 1.], vec![1., 0.]]);
        assert_eq!(p.determinant().unwrap(), -1.);

        let p3 = m(vec![vec![0., 0., 1.], vec![1., 0., 0.], vec![0., 1., 0.]]);
        assert_eq!(p3.determinant().unwrap(), 1.);
        assert_eq!(p3.determinant_with(DetMethod::Cofactor).unwrap(), 1.);
    }

    #[test]
    fn test_determinant_singular() {
        let a = m(vec![vec![1., 2., 3.], vec![0., 0., 0.], vec![7., 8., 9.]]);
        assert_abs_diff_eq!(a.determinant().unwrap(), 0., epsilon = 1e-12);
        assert_abs_diff_eq!(
            a.determinant_with(DetMethod::Cofactor).unwrap(),
            0.,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_determinant_config() {
        let a = m(vec![vec![2., 0.], vec![1., 3.]]);
        let config = EngineConfig::new().with_det_method(DetMethod::Cofactor);
        assert_eq!(a.determinant_with_config(&config).unwrap(), 6.);
    }

    #[test]
    fn test_determinant_requires_square() {
        let a = m(vec![vec![1., 2., 3.], vec![4., 5., 6.]]);
        assert!(matches!(
            a.determinant(),
            Err(MatError::Shape { op: "determinant", .. })
        ));
        assert!(a.determinant_with(DetMethod::Cofactor).is_err());
    }

    proptest! {
        #[test]
        fn prop_gauss_agrees_with_cofactor(a in square(5)) {
            let gauss = a.determinant_with(DetMethod::Gauss).unwrap();
            let cofactor = a.determinant_with(DetMethod::Cofactor).unwrap();
            prop_assert!(
                relative_eq!(gauss, cofactor, epsilon = 1e-6, max_relative = 1e-6),
                "gauss {} vs cofactor {}", gauss, cofactor
            );
        }

        #[test]
        fn prop_gauss_is_upper_triangular(a in square(6)) {
            let reduced = a.gauss().matrix;
            for i in 0..reduced.rows() {
                for j in 0..i.min(reduced.cols()) {
                    prop_assert_eq!(reduced.get(i, j).unwrap(), 0.);
                }
            }
        }

        #[test]
        fn prop_transpose_keeps_determinant(a in square(5)) {
            let d = a.determinant().unwrap();
            let dt = a.transpose().determinant().unwrap();
            prop_assert!(relative_eq!(d, dt, epsilon = 1e-6, max_relative = 1e-6));
        }
    }
}
