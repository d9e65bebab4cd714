use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

use crate::error::LinalgError;
use crate::gauss::derived;
use crate::gauss::eliminate::eliminate;
use crate::gauss::factor::lu;
use crate::gauss::pivot::{FirstNonzeroPivot, PartialPivot, PivotSelector};
use crate::matrix::matrix::Matrix;
use crate::utils::DEFAULT_EPSILON;

impl From<LinalgError> for PyErr {
    fn from(error: LinalgError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

fn selector(partial: bool) -> Box<dyn PivotSelector<f64>> {
    if partial {
        Box::new(PartialPivot::default())
    } else {
        Box::new(FirstNonzeroPivot::default())
    }
}

/// Python view of a `Matrix<f64>`. Every contract the kernel asserts is
/// checked here first and raised as `ValueError`.
#[derive(Debug, Clone)]
#[pyclass(frozen, name = "Matrix")]
pub struct PyMatrix {
    inner: Matrix<f64>,
}

impl From<Matrix<f64>> for PyMatrix {
    fn from(inner: Matrix<f64>) -> Self {
        PyMatrix { inner }
    }
}

#[pymethods]
impl PyMatrix {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(Matrix::try_from_rows(lines)?.into())
    }

    #[classmethod]
    pub fn identity(_cls: &Bound<PyType>, n: usize) -> PyResult<Self> {
        Ok(Matrix::try_identity(n)?.into())
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
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
    #[allow(non_snake_case)]
    pub fn T(&self) -> PyMatrix {
        self.inner.transpose().into()
    }

    pub fn __add__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        self.inner.check_same_size(&rhs.inner)?;
        Ok((&self.inner + &rhs.inner).into())
    }

    pub fn __sub__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        self.inner.check_same_size(&rhs.inner)?;
        Ok((&self.inner - &rhs.inner).into())
    }

    pub fn __mul__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        self.inner.check_product(&rhs.inner)?;
        Ok((&self.inner * &rhs.inner).into())
    }

    pub fn __repr__(&self) -> String {
        format!("{}", self.inner)
    }

    #[pyo3(signature = (partial = true))]
    pub fn eliminate(&self, partial: bool) -> PyMatrix {
        let mut ret = self.inner.clone();
        eliminate(&mut ret, &*selector(partial));
        ret.into()
    }

    #[pyo3(signature = (partial = true))]
    pub fn factor(&self, partial: bool) -> (PyMatrix, PyMatrix) {
        let (l, u) = lu(&self.inner, &*selector(partial));
        (l.into(), u.into())
    }

    pub fn det(&self) -> PyResult<f64> {
        self.inner.check_square()?;
        Ok(derived::det(&self.inner))
    }

    pub fn inverse(&self) -> PyResult<PyMatrix> {
        Ok(derived::try_inverse(&self.inner)?.into())
    }

    pub fn pow(&self, k: u32) -> PyResult<PyMatrix> {
        self.inner.check_square()?;
        Ok(derived::pow(&self.inner, k).into())
    }

    #[pyo3(signature = (epsilon = DEFAULT_EPSILON))]
    pub fn round(&self, epsilon: f64) -> PyMatrix {
        self.inner.round(epsilon).into()
    }

    #[pyo3(signature = (rhs, epsilon = DEFAULT_EPSILON))]
    pub fn approx_eq(&self, rhs: &PyMatrix, epsilon: f64) -> bool {
        self.inner.approx_eq(&rhs.inner, epsilon)
    }
}
