use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::utils::{Covariance, FloatOps, Standardize};

impl<S, T> Standardize<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
    T: FloatOps,
{
    fn column_moments(&self) -> Result<(Array1<T>, Array1<T>)> {
        let mean = self.mean_axis(Axis(0)).ok_or(Error::EmptyMatrix)?;
        let std_dev = self.std_axis(Axis(0), T::zero());
        Ok((mean, std_dev))
    }

    fn standardize(&self) -> Result<Array2<T>> {
        let (mean, std_dev) = self.column_moments()?;
        self.standardize_with(&mean, &std_dev)
    }

    fn standardize_with(&self, mean: &Array1<T>, std_dev: &Array1<T>) -> Result<Array2<T>> {
        if mean.len() != self.ncols() || std_dev.len() != self.ncols() {
            return Err(Error::DimensionMismatch {
                expected: self.ncols(),
                found: mean.len().min(std_dev.len()),
            });
        }

        let mut standardized = self.to_owned();
        standardized
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                row -= mean;
                row /= std_dev;
            });

        Ok(standardized)
    }
}

impl<S, T> Covariance<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
    T: FloatOps,
{
    fn covariance(&self, ddof: usize) -> Result<Array2<T>> {
        let n_samples = self.nrows();
        let mean = self.mean_axis(Axis(0)).ok_or(Error::EmptyMatrix)?;

        let mut centered = self.to_owned();
        centered
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                row -= &mean;
            });

        let divisor = T::from_usize(n_samples.saturating_sub(ddof)).unwrap_or_else(T::zero);
        Ok(centered.t().dot(&centered) / divisor)
    }
}
