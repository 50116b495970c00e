use ndarray::{ArrayBase, Data, Ix1};
use ndarray_stats::DeviationExt;
use std::fmt;

use crate::Float;


pub mod error;

pub use error::{MetricsError, Result};

/// Combined scores of a set of predictions against their labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub rmse: f64,
    pub r_squared: f64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RMSE: {:.4}, R2: {:.4}", self.rmse, self.r_squared)
    }
}

impl Metrics {
    /// Scores `predictions` against `labels` with both metrics.
    pub fn compute<F, S1, S2>(
        predictions: &ArrayBase<S1, Ix1>,
        labels: &ArrayBase<S2, Ix1>,
    ) -> Result<Metrics>
    where
        F: Float,
        S1: Data<Elem = F>,
        S2: Data<Elem = F>,
    {
        Ok(Metrics {
            rmse: rmse(predictions, labels)?,
            r_squared: r2_score(predictions, labels)?,
        })
    }
}

fn check_shapes<F, S1, S2>(predictions: &ArrayBase<S1, Ix1>, labels: &ArrayBase<S2, Ix1>) -> Result<()>
where
    S1: Data<Elem = F>,
    S2: Data<Elem = F>,
{
    if predictions.len() != labels.len() {
        return Err(MetricsError::ShapeMismatch {
            predictions: predictions.len(),
            labels: labels.len(),
        });
    }
    if labels.is_empty() {
        return Err(MetricsError::EmptyInput);
    }
    Ok(())
}

/// Root mean squared error: `sqrt(mean((p_i - y_i)^2))`.
pub fn rmse<F, S1, S2>(predictions: &ArrayBase<S1, Ix1>, labels: &ArrayBase<S2, Ix1>) -> Result<f64>
where
    F: Float,
    S1: Data<Elem = F>,
    S2: Data<Elem = F>,
{
    check_shapes(predictions, labels)?;
    Ok(predictions.root_mean_sq_err(labels)?)
}

/// Coefficient of determination: `1 - SS_res / SS_tot`, where `SS_tot` is
/// taken around the mean label. Undefined with fewer than two samples or
/// constant labels.
pub fn r2_score<F, S1, S2>(predictions: &ArrayBase<S1, Ix1>, labels: &ArrayBase<S2, Ix1>) -> Result<f64>
where
    F: Float,
    S1: Data<Elem = F>,
    S2: Data<Elem = F>,
{
    check_shapes(predictions, labels)?;
    let n_samples = labels.len();
    if n_samples < 2 {
        return Err(MetricsError::TooFewSamples(n_samples));
    }

    let y_mean: f64 = labels.iter().map(|y| y.as_()).sum::<f64>() / n_samples as f64;
    let ss_tot: f64 = labels.iter().map(|y| (y.as_() - y_mean).powi(2)).sum();
    if ss_tot == 0. {
        return Err(MetricsError::ZeroVariance);
    }
    let ss_res: f64 = predictions
        .iter()
        .zip(labels.iter())
        .map(|(p, y)| {
            let p: f64 = p.as_();
            let y: f64 = y.as_();
            (p - y).powi(2)
        })
        .sum();

    Ok(1. - ss_res / ss_tot)
}
