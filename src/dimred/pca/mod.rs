//! # Principal Component Analysis
//!
//! Dense PCA by eigendecomposition of the covariance matrix of standardized features:
//!
//! 1. standardize every column (population standard deviation, divisor `N`)
//! 2. sample covariance of the standardized data (divisor `N - 1`)
//! 3. symmetric eigendecomposition, eigenpairs reordered by descending eigenvalue
//! 4. project the standardized data onto the leading eigenvectors
//!
//! Constant columns are not special-cased. Their standard deviation is zero, so the
//! projection comes out non-finite and it is up to the caller to detect that.

use log::{debug, info, warn};
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{s, Array1, Array2, ArrayView2};

use crate::dimred::Reducer;
use crate::error::{Error, Result};
use crate::utils::{Covariance, Standardize};

const MAX_EIGEN_ITERATIONS: usize = 100_000;

pub struct PcaBuilder {
    n_components: usize,
}

impl PcaBuilder {
    pub fn new() -> Self {
        PcaBuilder { n_components: 2 }
    }

    pub fn n_components(mut self, n_components: usize) -> Self {
        self.n_components = n_components;
        self
    }

    pub fn build(self) -> Pca {
        Pca {
            n_components: self.n_components,
            components: None,
            mean: None,
            std_dev: None,
            eigenvalues: None,
            explained_variance_ratio: None,
        }
    }
}

impl Default for PcaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// PCA fitted by [`Pca::fit_transform`].
///
/// A fit on data whose covariance is not finite (for example a constant column) keeps only
/// the column moments: `components`, `eigenvalues` and `explained_variance_ratio` are `None`
/// and the returned projection is all NaN. The moments show which columns have zero spread.
pub struct Pca {
    n_components: usize,
    components: Option<Array2<f64>>,
    mean: Option<Array1<f64>>,
    std_dev: Option<Array1<f64>>,
    eigenvalues: Option<Array1<f64>>,
    explained_variance_ratio: Option<Array1<f64>>,
}

impl Pca {
    /// Fits on `x` (samples × features) and returns its projection (samples × n_components).
    pub fn fit_transform(&mut self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let (n_samples, n_features) = x.dim();
        if self.n_components == 0 || self.n_components > n_features {
            return Err(Error::InvalidComponentCount {
                requested: self.n_components,
                features: n_features,
            });
        }

        info!("Standardizing {} samples × {} features", n_samples, n_features);
        let (mean, std_dev) = x.column_moments()?;
        let standardized = x.standardize_with(&mean, &std_dev)?;
        self.mean = Some(mean);
        self.std_dev = Some(std_dev);

        info!("Calculating covariance matrix...");
        let covariance = standardized.covariance(1)?;

        if covariance.iter().any(|v| !v.is_finite()) {
            warn!("Covariance matrix has non-finite entries, projection will not be finite");
            self.components = None;
            self.eigenvalues = None;
            self.explained_variance_ratio = None;
            return Ok(Array2::from_elem((n_samples, self.n_components), f64::NAN));
        }

        info!("Calculating eigenvalues and eigenvectors...");
        let (eigenvalues, eigenvectors) = symmetric_eigen(&covariance)?;
        let order = descending_order(&eigenvalues.to_vec());

        let sorted_eigenvalues: Array1<f64> = order.iter().map(|&i| eigenvalues[i]).collect();
        let components = Array2::from_shape_fn((n_features, self.n_components), |(row, c)| {
            eigenvectors[[row, order[c]]]
        });

        let total_variance = sorted_eigenvalues.sum();
        let explained_variance_ratio = sorted_eigenvalues
            .slice(s![..self.n_components])
            .mapv(|v| v / total_variance);
        debug!("Explained variance ratio: {}", explained_variance_ratio);

        let projected = standardized.dot(&components);

        self.components = Some(components);
        self.eigenvalues = Some(sorted_eigenvalues);
        self.explained_variance_ratio = Some(explained_variance_ratio);

        Ok(projected)
    }

    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Projection matrix, features × n_components, columns by descending eigenvalue.
    pub fn components(&self) -> Option<&Array2<f64>> {
        self.components.as_ref()
    }

    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.mean.as_ref()
    }

    pub fn std_dev(&self) -> Option<&Array1<f64>> {
        self.std_dev.as_ref()
    }

    /// All covariance eigenvalues, descending.
    pub fn eigenvalues(&self) -> Option<&Array1<f64>> {
        self.eigenvalues.as_ref()
    }

    pub fn explained_variance_ratio(&self) -> Option<&Array1<f64>> {
        self.explained_variance_ratio.as_ref()
    }
}

impl Reducer for Pca {
    fn n_components(&self) -> usize {
        self.n_components
    }

    fn reduce(&mut self, x: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
        Ok(self.fit_transform(x)?)
    }
}

/// Projects `x` onto its top `n_components` principal directions.
pub fn reduce(x: ArrayView2<f64>, n_components: usize) -> Result<Array2<f64>> {
    PcaBuilder::new()
        .n_components(n_components)
        .build()
        .fit_transform(x)
}

/// Eigenvalues and column eigenvectors of a symmetric matrix, in solver order.
fn symmetric_eigen(matrix: &Array2<f64>) -> Result<(Array1<f64>, Array2<f64>)> {
    let (n, _) = matrix.dim();
    let dense = DMatrix::from_fn(n, n, |i, j| matrix[[i, j]]);

    let eigen = SymmetricEigen::try_new(dense, f64::EPSILON, MAX_EIGEN_ITERATIONS)
        .ok_or(Error::EigenDecomposition)?;

    let eigenvalues = Array1::from_iter(eigen.eigenvalues.iter().copied());
    let eigenvectors = Array2::from_shape_fn((n, n), |(i, j)| eigen.eigenvectors[(i, j)]);
    Ok((eigenvalues, eigenvectors))
}

/// Indices of `values` by descending value. Equal values keep ascending index order.
fn descending_order(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    order
}
