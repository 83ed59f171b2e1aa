use pyo3::exceptions::{PyIndexError, PyValueError, PyZeroDivisionError};
use pyo3::prelude::*;
use pyo3::types::PyType;

use crate::config::DetMethod;
use crate::error::MatError;
use crate::matrix::dense::Mat;

// --------------------------------------------------
//                      PYTHON
// --------------------------------------------------

fn py_err(error: MatError) -> PyErr {
    match error {
        MatError::Index { .. } => PyIndexError::new_err(error.to_string()),
        MatError::Singular { .. } => PyZeroDivisionError::new_err(error.to_string()),
        _ => PyValueError::new_err(error.to_string()),
    }
}

#[derive(Debug, Clone)]
#[pyclass(frozen, name = "Mat")]
pub struct PyMat {
    inner: Mat,
}

#[derive(FromPyObject)]
pub enum MatOrFloat<'a> {
    Mat(Bound<'a, PyMat>),
    Float(f64),
}

impl From<Mat> for PyMat {
    fn from(inner: Mat) -> Self {
        PyMat { inner }
    }
}

#[pymethods]
impl PyMat {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Self> {
        Mat::from_rows(lines).map(PyMat::from).map_err(py_err)
    }

    #[classmethod]
    pub fn identity(_cls: &Bound<PyType>, n: usize) -> PyResult<Self> {
        Mat::identity(n).map(PyMat::from).map_err(py_err)
    }

    #[classmethod]
    #[pyo3(signature = (rows, cols, value=0.0))]
    pub fn filled(_cls: &Bound<PyType>, rows: usize, cols: usize, value: f64) -> PyResult<Self> {
        Mat::filled(rows, cols, value).map(PyMat::from).map_err(py_err)
    }

    #[classmethod]
    #[pyo3(signature = (rows, cols, min=0.0, max=1.0))]
    pub fn random(
        _cls: &Bound<PyType>,
        rows: usize,
        cols: usize,
        min: f64,
        max: f64,
    ) -> PyResult<Self> {
        Mat::random_range(rows, cols, min, max)
            .map(PyMat::from)
            .map_err(py_err)
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    pub fn get(&self, row: usize, col: usize) -> PyResult<f64> {
        self.inner.get(row, col).map_err(py_err)
    }

    pub fn __add__(&self, rhs: &PyMat) -> PyResult<PyMat> {
        self.inner.add(&rhs.inner).map(PyMat::from).map_err(py_err)
    }

    pub fn __sub__(&self, rhs: &PyMat) -> PyResult<PyMat> {
        self.inner
            .subtract(&rhs.inner)
            .map(PyMat::from)
            .map_err(py_err)
    }

    pub fn __mul__(&self, rhs: MatOrFloat) -> PyResult<PyMat> {
        match rhs {
            MatOrFloat::Mat(rhs) => self
                .inner
                .multiply(&rhs.get().inner)
                .map(PyMat::from)
                .map_err(py_err),
            MatOrFloat::Float(s) => Ok(self.inner.scale(s).into()),
        }
    }

    pub fn __rmul__(&self, lhs: f64) -> PyMat {
        self.inner.scale(lhs).into()
    }

    pub fn __neg__(&self) -> PyMat {
        self.inner.negate().into()
    }

    #[getter]
    pub fn T(&self) -> PyMat {
        self.inner.transpose().into()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    #[getter]
    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    #[pyo3(signature = (method="gauss"))]
    pub fn det(&self, method: &str) -> PyResult<f64> {
        let method: DetMethod = method.parse().map_err(py_err)?;
        self.inner.determinant_with(method).map_err(py_err)
    }

    pub fn inv(&self) -> PyResult<PyMat> {
        self.inner.inverse().map(PyMat::from).map_err(py_err)
    }

    /// Returns the row-echelon form and the number of row swaps.
    pub fn gauss(&self) -> (PyMat, usize) {
        let echelon = self.inner.gauss();
        (echelon.matrix.into(), echelon.swaps)
    }

    pub fn __eq__(&self, other: &PyMat) -> bool {
        self.inner == other.inner
    }

    pub fn __str__(&self) -> String {
        self.inner.format()
    }

    pub fn __repr__(&self) -> String {
        format!("Mat({:?})", self.inner.to_list())
    }
}
