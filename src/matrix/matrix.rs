use crate::error::Result;
use crate::matrix::elimination::Echelon;

pub trait Matrix<T>
where
    Self: Sized,
{
    fn from_list(lines: Vec<Vec<T>>) -> Result<Self>;
    fn to_list(&self) -> Vec<Vec<T>>;

    fn shape(&self) -> (usize, usize);
    fn echelon_form(&self) -> Echelon<Self>;
    fn determinant(&self) -> Result<T>;
    fn identity(n: usize) -> Result<Self>;
    fn inverse(&self) -> Result<Self>;
    fn transpose(&self) -> Self;

    /// Reads one entry without a bounds check: panics when `row` or `col`
    /// is out of range.
    fn at(&self, row: usize, col: usize) -> T;
}
