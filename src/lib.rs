#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod error;
pub mod scalar;
pub mod utils;

pub mod matrix {
    pub mod matrix;
    pub mod matrix_ops;
    pub mod vector;
}
pub mod gauss {
    pub mod derived;
    pub mod eliminate;
    pub mod factor;
    pub mod pivot;
}
pub mod rings {
    pub mod rational;
}

#[cfg(feature = "python")]
pub mod python;

pub use error::{LinalgError, Result};
pub use gauss::derived::{
    det, inverse, inverse_with, is_invertible, pow, rank, solve, transpose, try_inverse,
};
pub use gauss::eliminate::{backward_reduce, eliminate, forward_reduce, normalize_rows};
pub use gauss::factor::{factor, lu, permute};
pub use gauss::pivot::{FirstNonzeroPivot, PartialPivot, PivotSelector};
pub use matrix::matrix::Matrix;
pub use matrix::vector::Vector;
pub use rings::rational::Rational;
pub use scalar::Scalar;
pub use utils::{approx_equal, DEFAULT_EPSILON};

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn rust_linalg(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    let _ = env_logger::try_init();
    m.add_class::<python::PyMatrix>()?;
    Ok(())
}
