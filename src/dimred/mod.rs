//! # Dimensionality Reduction
//!
//! Maps dense document feature matrices (documents × features) to a handful of coordinates
//! per document, one output row per input row in the same order.
//!
//! ## Available
//! - **PCA** ([`pca`]): covariance-matrix eigendecomposition of standardized features
//!
//! ## External reducers
//! Nonlinear methods such as t-SNE (2 output dimensions, perplexity 3) are not implemented
//! here. They plug in through [`Reducer`] and are held to the same shape contract by
//! [`reduce_with`].

use ndarray::{Array2, ArrayView2};

use crate::error::Error;

pub mod pca;

/// A dimensionality reduction routine: `rows(X) × features` in, `rows(X) × n_components` out.
pub trait Reducer {
    fn n_components(&self) -> usize;

    fn reduce(&mut self, x: ArrayView2<f64>) -> anyhow::Result<Array2<f64>>;
}

/// Runs `reducer` on `x` and rejects output that breaks the row/column contract.
pub fn reduce_with<R>(reducer: &mut R, x: ArrayView2<f64>) -> anyhow::Result<Array2<f64>>
where
    R: Reducer + ?Sized,
{
    let n_components = reducer.n_components();
    let reduced = reducer.reduce(x)?;

    if reduced.nrows() != x.nrows() {
        return Err(Error::DimensionMismatch {
            expected: x.nrows(),
            found: reduced.nrows(),
        }
        .into());
    }
    if reduced.ncols() != n_components {
        return Err(Error::DimensionMismatch {
            expected: n_components,
            found: reduced.ncols(),
        }
        .into());
    }
    Ok(reduced)
}
