use ndarray::{Array1, ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2};

use crate::datasets::DatasetBase;
use crate::helpers::linalg::{cholesky_solve, pivoted_cholesky};
use crate::traits::{Fit, Predict};
use crate::Float;


pub mod error;
pub mod hyperparams;

pub use error::{RegressionError, Result};
pub use hyperparams::{LinearRegressionParams, LinearRegressionValidParams};

/// Ordinary least squares
///
/// A fitted linear model `y = Xw + b`. Predictors that are linearly dependent
/// on the predictors before them (for instance a complete one-hot block next
/// to the intercept) are aliased: they are left out of the fit and get a zero
/// coefficient, which leaves the fitted values unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression<F> {
    coefficients: Array1<F>,
    intercept: F,
    aliased: Vec<usize>,
}

impl<F: Float> LinearRegression<F> {
    /// This method instantiates linear regression hyperparameters with their
    /// default values.
    pub fn params() -> LinearRegressionParams<F> {
        LinearRegressionParams::new()
    }

    /// This method is a getter for the coefficients vector.
    pub fn coefficients(&self) -> ArrayView1<F> {
        self.coefficients.view()
    }

    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// Positions of the predictors excluded from the fit.
    pub fn aliased(&self) -> &[usize] {
        &self.aliased
    }
}

/// This implements the least-squares fit on dense design matrices by solving
/// the normal equations of the centered problem.
impl<F: Float, S: Data<Elem = F>, T: Data<Elem = F>>
    Fit<ArrayBase<S, Ix2>, ArrayBase<T, Ix1>, RegressionError> for LinearRegressionValidParams<F>
{
    type Object = LinearRegression<F>;

    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<S, Ix2>, ArrayBase<T, Ix1>>,
    ) -> Result<Self::Object> {
        let X = dataset.design_matrix();
        let y = dataset.targets();
        let n_samples = X.nrows();
        let n_features = X.ncols();

        if n_samples == 0 {
            return Err(RegressionError::EmptyInput);
        }
        if y.len() != n_samples {
            return Err(RegressionError::SampleMismatch {
                design: n_samples,
                targets: y.len(),
            });
        }

        let (x_mean, y_mean) = if self.fit_intercept() {
            let x_mean = X
                .mean_axis(Axis(0))
                .ok_or(RegressionError::EmptyInput)?;
            let y_mean = y.mean().ok_or(RegressionError::EmptyInput)?;
            (x_mean, y_mean)
        } else {
            (Array1::<F>::zeros(n_features), F::zero())
        };

        let Xc = X - &x_mean;
        let yc = y - y_mean;
        let gram = Xc.t().dot(&Xc);
        let Xty = Xc.t().dot(&yc);

        let factor = pivoted_cholesky(gram.view(), self.tolerance());
        let Xty_kept: Array1<F> = factor.kept.iter().map(|&j| Xty[j]).collect();
        let w_kept =
            cholesky_solve(factor.L.view(), Xty_kept.view()).map_err(RegressionError::SingularSystem)?;

        let mut coefficients = Array1::<F>::zeros(n_features);
        for (&j, &w) in factor.kept.iter().zip(w_kept.iter()) {
            coefficients[j] = w;
        }
        let intercept = if self.fit_intercept() {
            y_mean - x_mean.dot(&coefficients)
        } else {
            F::zero()
        };

        if !factor.aliased.is_empty() {
            log::warn!(
                "{} of {} predictors are linearly dependent and were aliased: {:?}",
                factor.aliased.len(),
                n_features,
                factor.aliased
            );
        }
        log::debug!(
            "fitted least squares on {} samples, {} predictors",
            n_samples,
            n_features
        );

        Ok(LinearRegression {
            coefficients,
            intercept,
            aliased: factor.aliased,
        })
    }
}

impl<F: Float, S: Data<Elem = F>> Predict<ArrayBase<S, Ix2>, RegressionError>
    for LinearRegression<F>
{
    fn predict(&self, design_matrix: &ArrayBase<S, Ix2>) -> Result<Array1<F>> {
        if design_matrix.ncols() != self.coefficients.len() {
            return Err(RegressionError::FeatureMismatch {
                expected: self.coefficients.len(),
                found: design_matrix.ncols(),
            });
        }
        Ok(design_matrix.dot(&self.coefficients) + self.intercept)
    }
}
