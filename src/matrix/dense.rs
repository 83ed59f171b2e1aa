use itertools::Itertools;
use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::{Axis, MatError, Result};
use crate::matrix::elimination::Echelon;
use crate::matrix::matrix::Matrix;
use std::fmt;
use std::ops;

pub trait Real:  // Avoid repeating all the traits
    Float
    + SampleUniform
    + std::iter::Sum<Self>
    + std::fmt::Display
    + std::fmt::Debug
{
}

impl<T> Real for T where
    T: Float + SampleUniform + std::iter::Sum<T> + std::fmt::Display + std::fmt::Debug
{
}

/// Dense row-major matrix of real numbers.
///
/// The shape is fixed at creation and both dimensions are positive. Every
/// operation that produces a matrix returns a new value; the few methods
/// that write into `self` say so in their name (`set`, `*_in_place`,
/// `*_assign_checked`).
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cells: Vec<T>,
}

pub type Mat = DenseMatrix<f64>;

impl<T: Real> Matrix<T> for DenseMatrix<T> {
    fn from_list(lines: Vec<Vec<T>>) -> Result<Self> {
        DenseMatrix::from_rows(lines)
    }

    fn to_list(&self) -> Vec<Vec<T>> {
        DenseMatrix::to_list(self)
    }

    fn shape(&self) -> (usize, usize) {
        DenseMatrix::shape(self)
    }

    fn echelon_form(&self) -> Echelon<Self> {
        self.gauss()
    }

    fn determinant(&self) -> Result<T> {
        DenseMatrix::determinant(self)
    }

    fn identity(n: usize) -> Result<Self> {
        DenseMatrix::identity(n)
    }

    fn inverse(&self) -> Result<Self> {
        DenseMatrix::inverse(self)
    }

    fn transpose(&self) -> Self {
        DenseMatrix::transpose(self)
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> T {
        self.cell(row, col)
    }
}

impl<T: Real> DenseMatrix<T> {
    fn check_dims(op: &'static str, rows: usize, cols: usize) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Err(MatError::shape(
                op,
                format!("dimensions must be positive, got {}x{}", rows, cols),
            ));
        }
        Ok(())
    }

    fn check_same_shape(&self, op: &'static str, rhs: &DenseMatrix<T>) -> Result<()> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(MatError::shape(
                op,
                format!(
                    "{}x{} and {}x{} differ",
                    self.rows, self.cols, rhs.rows, rhs.cols
                ),
            ));
        }
        Ok(())
    }

    /// Builds a matrix from rows of possibly different lengths. The column
    /// count is the longest row; shorter rows are padded with zeros.
    pub fn from_rows(lines: Vec<Vec<T>>) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.iter().map(|l| l.len()).max().unwrap_or(0);
        Self::check_dims("from_rows", rows, cols)?;

        Ok(DenseMatrix {
            rows,
            cols,
            cells: lines
                .into_iter()
                .flat_map(|l| {
                    let padding = cols - l.len();
                    l.into_iter()
                        .chain(std::iter::repeat_n(T::zero(), padding))
                })
                .collect(),
        })
    }

    /// Builds a matrix from a flat row-major buffer.
    pub fn from_flat(rows: usize, cols: usize, cells: Vec<T>) -> Result<Self> {
        Self::check_dims("from_flat", rows, cols)?;
        if cells.len() != rows * cols {
            return Err(MatError::shape(
                "from_flat",
                format!("{} values cannot fill a {}x{} matrix", cells.len(), rows, cols),
            ));
        }
        Ok(DenseMatrix { rows, cols, cells })
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self> {
        Self::check_dims("filled", rows, cols)?;
        Ok(DenseMatrix {
            rows,
            cols,
            cells: vec![value; rows * cols],
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, T::zero())
    }

    pub fn identity(n: usize) -> Result<Self> {
        Self::check_dims("identity", n, n)?;
        Ok(DenseMatrix {
            rows: n,
            cols: n,
            cells: (0..n)
                .flat_map(|i| (0..n).map(move |j| if i == j { T::one() } else { T::zero() }))
                .collect(),
        })
    }

    /// Checkerboard of alternating signs, `s[i][j] = (-1)^(i+j)`.
    pub fn signs(n: usize) -> Result<Self> {
        Self::check_dims("signs", n, n)?;
        Ok(DenseMatrix {
            rows: n,
            cols: n,
            cells: (0..n)
                .flat_map(|i| {
                    (0..n).map(move |j| if (i + j) % 2 == 0 { T::one() } else { -T::one() })
                })
                .collect(),
        })
    }

    /// Entries drawn uniformly from `[0, 1)`.
    pub fn random(rows: usize, cols: usize) -> Result<Self> {
        Self::random_range(rows, cols, T::zero(), T::one())
    }

    /// Entries drawn uniformly from `[min, max)`.
    pub fn random_range(rows: usize, cols: usize, min: T, max: T) -> Result<Self> {
        Self::random_with(&mut rand::thread_rng(), rows, cols, min, max)
    }

    pub fn random_with<R: Rng + ?Sized>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        min: T,
        max: T,
    ) -> Result<Self> {
        Self::check_dims("random", rows, cols)?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(MatError::invalid(
                "min",
                format!("expected finite bounds with min <= max, got [{}, {})", min, max),
            ));
        }
        if !(max - min).is_finite() {
            return Err(MatError::invalid(
                "max",
                format!("width of [{}, {}) overflows", min, max),
            ));
        }
        if min == max {
            return Self::filled(rows, cols, min);
        }

        let distribution = Uniform::new(min, max);
        Ok(DenseMatrix {
            rows,
            cols,
            cells: (0..rows * cols).map(|_| distribution.sample(rng)).collect(),
        })
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major view of every entry.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    #[inline(always)]
    pub(crate) fn cell(&self, row: usize, col: usize) -> T {
        self.cells[row * self.cols + col]
    }

    #[inline(always)]
    pub(crate) fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        for k in 0..self.cols {
            self.cells.swap(a * self.cols + k, b * self.cols + k);
        }
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows {
            return Err(MatError::Index {
                axis: Axis::Row,
                index: row,
                size: self.rows,
            });
        }
        if col >= self.cols {
            return Err(MatError::Index {
                axis: Axis::Column,
                index: col,
                size: self.cols,
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self.cell(row, col))
    }

    /// Writes one entry in place.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<&mut Self> {
        self.check_index(row, col)?;
        self.cells[row * self.cols + col] = value;
        Ok(self)
    }

    pub fn get_row(&self, row: usize) -> Result<Vec<T>> {
        self.check_index(row, 0)?;
        Ok(self.row(row).to_vec())
    }

    pub fn get_column(&self, col: usize) -> Result<Vec<T>> {
        self.check_index(0, col)?;
        Ok((0..self.rows).map(|r| self.cell(r, col)).collect())
    }

    pub fn add(&self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        self.check_same_shape("add", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    pub fn subtract(&self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        self.check_same_shape("subtract", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    fn zip_with(&self, rhs: &DenseMatrix<T>, f: impl Fn(T, T) -> T) -> DenseMatrix<T> {
        DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| f(*a, *b))
                .collect(),
        }
    }

    pub fn map(&self, f: impl Fn(T) -> T) -> DenseMatrix<T> {
        DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|x| f(*x)).collect(),
        }
    }

    pub fn scale(&self, scalar: T) -> DenseMatrix<T> {
        self.map(|x| x * scalar)
    }

    pub fn negate(&self) -> DenseMatrix<T> {
        self.map(|x| -x)
    }

    /// In-place `self += rhs`, only `self` is written.
    pub fn add_assign_checked(&mut self, rhs: &DenseMatrix<T>) -> Result<&mut Self> {
        self.check_same_shape("add", rhs)?;
        self.cells
            .iter_mut()
            .zip(rhs.cells.iter())
            .for_each(|(a, b)| *a = *a + *b);
        Ok(self)
    }

    /// In-place `self -= rhs`, only `self` is written.
    pub fn sub_assign_checked(&mut self, rhs: &DenseMatrix<T>) -> Result<&mut Self> {
        self.check_same_shape("subtract", rhs)?;
        self.cells
            .iter_mut()
            .zip(rhs.cells.iter())
            .for_each(|(a, b)| *a = *a - *b);
        Ok(self)
    }

    pub fn scale_in_place(&mut self, scalar: T) -> &mut Self {
        self.cells.iter_mut().for_each(|x| *x = *x * scalar);
        self
    }

    pub fn transpose(&self) -> DenseMatrix<T> {
        DenseMatrix {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.cell(r, c)))
                .collect(),
        }
    }

    pub fn multiply(&self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        if self.cols != rhs.rows {
            return Err(MatError::shape(
                "multiply",
                format!(
                    "cannot multiply {}x{} by {}x{}",
                    self.rows, self.cols, rhs.rows, rhs.cols
                ),
            ));
        }

        // Columns of rhs become contiguous rows
        let rot = rhs.transpose();

        Ok(DenseMatrix {
            rows: self.rows,
            cols: rhs.cols,
            cells: self
                .cells
                .chunks(self.cols)
                .flat_map(|line| {
                    rot.cells
                        .chunks(rot.cols)
                        .map(move |col| line.iter().zip(col).map(|(a, b)| *a * *b).sum())
                })
                .collect(),
        })
    }

    /// Concatenates `rhs` to the right of `self`.
    pub fn augment(&self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        if self.rows != rhs.rows {
            return Err(MatError::shape(
                "augment",
                format!("row counts {} and {} differ", self.rows, rhs.rows),
            ));
        }

        Ok(DenseMatrix {
            rows: self.rows,
            cols: self.cols + rhs.cols,
            cells: (0..self.rows)
                .flat_map(|r| self.row(r).iter().chain(rhs.row(r)).copied())
                .collect(),
        })
    }

    /// Keeps the columns in `start..end`.
    pub fn columns(&self, start: usize, end: usize) -> Result<DenseMatrix<T>> {
        if start >= end || end > self.cols {
            return Err(MatError::shape(
                "columns",
                format!("range {}..{} invalid for {} columns", start, end, self.cols),
            ));
        }

        Ok(DenseMatrix {
            rows: self.rows,
            cols: end - start,
            cells: (0..self.rows)
                .flat_map(|r| self.row(r)[start..end].iter().copied())
                .collect(),
        })
    }

    pub fn max(&self) -> T {
        self.cells.iter().copied().fold(T::neg_infinity(), T::max)
    }

    /// Largest magnitude of any entry.
    pub fn max_abs(&self) -> T {
        self.cells.iter().fold(T::zero(), |acc, x| acc.max(x.abs()))
    }

    pub fn min(&self) -> T {
        self.cells.iter().copied().fold(T::infinity(), T::min)
    }

    /// Text layout used by reports: a shape header, then each row as
    /// bordered cells with three decimals.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

/// Dot product of two equal-length vectors.
pub fn dot<T: Real>(u: &[T], v: &[T]) -> Result<T> {
    if u.len() != v.len() {
        return Err(MatError::shape(
            "dot",
            format!("vector lengths {} and {} differ", u.len(), v.len()),
        ));
    }
    Ok(u.iter().zip(v).map(|(a, b)| *a * *b).sum())
}

impl<T: Real> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = " -------".repeat(self.cols);
        writeln!(f, "rows: {}, columns: {}", self.rows, self.cols)?;
        for line in self.cells.chunks(self.cols) {
            writeln!(f, "{}", border)?;
            writeln!(
                f,
                "|{}",
                line.iter()
                    .map(|x| format!(" {:.3} |", *x + T::zero())) // -0.0 prints as 0.000
                    .join("")
            )?;
        }
        write!(f, "{}", border)
    }
}

impl<T: Real> ops::Add<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn add(self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        DenseMatrix::add(self, rhs)
    }
}

impl<T: Real> ops::Sub<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn sub(self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        self.subtract(rhs)
    }
}

impl<T: Real> ops::Mul<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn mul(self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        self.multiply(rhs)
    }
}

impl<T: Real> ops::Neg for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn neg(self) -> DenseMatrix<T> {
        self.negate()
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
