use std::fmt::Debug;

use ndarray::{Array1, Array2, ScalarOperand};
use num_traits::{Float, FromPrimitive, NumAssign};

use crate::error::Result;

/// Floating point element usable by the dense statistics in this crate.
pub trait FloatOps:
    Float + FromPrimitive + NumAssign + ScalarOperand + Send + Sync + Debug + 'static
{
}

impl<T> FloatOps for T where
    T: Float + FromPrimitive + NumAssign + ScalarOperand + Send + Sync + Debug + 'static
{
}

pub trait Standardize<T: FloatOps> {
    /// Column means and population standard deviations (divisor `N`).
    fn column_moments(&self) -> Result<(Array1<T>, Array1<T>)>;

    /// Z-scores per column. Constant columns divide by zero and come out non-finite.
    fn standardize(&self) -> Result<Array2<T>>;

    /// Z-scores per column against precomputed moments.
    fn standardize_with(&self, mean: &Array1<T>, std_dev: &Array1<T>) -> Result<Array2<T>>;
}

pub trait Covariance<T: FloatOps> {
    /// Feature-by-feature covariance of the columns, normalized by `N - ddof`.
    fn covariance(&self, ddof: usize) -> Result<Array2<T>>;
}
