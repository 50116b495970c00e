//! Split-by-category regression
//!
//! Rows of a training and a testing table are partitioned on a binary
//! indicator column (for instance `smoker_yes`), and one independent
//! regression is fitted per group. The workflow moves through four stages:
//!
//! ```text
//! Constructed --fit()--> Fitted --predict()--> Predicted --evaluate()--> Evaluated
//! ```
//!
//! Calling `predict()` before `fit()`, or `evaluate()` before `predict()`,
//! fails with [`SplitError::NotFitted`] or [`SplitError::NotPredicted`].

use ndarray::{Array1, Array2};
use std::fmt;

use crate::datasets::{DatasetBase, DenseDataset};
use crate::linear::{LinearRegressionParams, RegressionError};
use crate::metrics::Metrics;
use crate::param_guard::ParamGuard;
use crate::table::{ColumnData, Table, TableError};
use crate::traits::{Fit, Predict};

#[cfg(test)]
mod tests;

pub mod error;
pub mod hyperparams;

pub use error::{Result, SplitError};
pub use hyperparams::{SplitRegressionParams, SplitRegressionValidParams};

/// The two groups of a split. Group A holds the rows whose indicator is 1,
/// group B the rows whose indicator is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    A,
    B,
}

impl Group {
    fn indicator_value(self) -> f64 {
        match self {
            Group::A => 1.,
            Group::B => 0.,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::A => write!(f, "A"),
            Group::B => write!(f, "B"),
        }
    }
}

/// One value per group.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups<T> {
    pub a: T,
    pub b: T,
}

impl<T> Groups<T> {
    pub fn get(&self, group: Group) -> &T {
        match group {
            Group::A => &self.a,
            Group::B => &self.b,
        }
    }

    fn try_build<E, B: FnMut(Group) -> std::result::Result<T, E>>(
        mut build: B,
    ) -> std::result::Result<Groups<T>, E> {
        Ok(Groups {
            a: build(Group::A)?,
            b: build(Group::B)?,
        })
    }
}

/// The training and testing rows of one group, without the indicator column.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub train: Table,
    pub test: Table,
}

/// Where a [`SplitRegressor`] stands in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Constructed,
    Fitted,
    Predicted,
    Evaluated,
}

/// Each variant carries exactly the data that is valid at that stage.
#[derive(Debug, Clone)]
enum Stage<M> {
    Constructed,
    Fitted {
        models: Groups<M>,
    },
    Predicted {
        models: Groups<M>,
        predictions: Groups<Array1<f64>>,
    },
    Evaluated {
        models: Groups<M>,
        predictions: Groups<Array1<f64>>,
        metrics: Metrics,
    },
}

impl<M> Stage<M> {
    fn kind(&self) -> StageKind {
        match self {
            Stage::Constructed => StageKind::Constructed,
            Stage::Fitted { .. } => StageKind::Fitted,
            Stage::Predicted { .. } => StageKind::Predicted,
            Stage::Evaluated { .. } => StageKind::Evaluated,
        }
    }

    fn models(&self) -> Option<&Groups<M>> {
        match self {
            Stage::Constructed => None,
            Stage::Fitted { models }
            | Stage::Predicted { models, .. }
            | Stage::Evaluated { models, .. } => Some(models),
        }
    }

    fn predictions(&self) -> Option<&Groups<Array1<f64>>> {
        match self {
            Stage::Constructed | Stage::Fitted { .. } => None,
            Stage::Predicted { predictions, .. } | Stage::Evaluated { predictions, .. } => {
                Some(predictions)
            }
        }
    }
}

/// Split regression
///
/// Fits one regression per group of a binary indicator and scores the
/// combined predictions. `R` is the regression to fit, ordinary least
/// squares by default.
pub struct SplitRegressor<R = LinearRegressionParams<f64>>
where
    R: Fit<Array2<f64>, Array1<f64>, RegressionError>,
{
    params: SplitRegressionValidParams,
    regressor: R,
    predictors: Vec<String>,
    partitions: Groups<Partition>,
    stage: Stage<R::Object>,
}

impl SplitRegressor<LinearRegressionParams<f64>> {
    /// Partitions both tables and prepares one least-squares fit per group.
    pub fn new(training: &Table, testing: &Table, params: SplitRegressionParams) -> Result<Self> {
        Self::with_regressor(training, testing, params, LinearRegressionParams::new())
    }
}

impl<R> SplitRegressor<R>
where
    R: Fit<Array2<f64>, Array1<f64>, RegressionError>,
    R::Object: Predict<Array2<f64>, RegressionError>,
{
    /// Partitions `training` and `testing` on the indicator column: rows where
    /// it equals 1 go to group A, rows where it equals 0 to group B. The
    /// indicator is dropped from the four resulting tables.
    pub fn with_regressor(
        training: &Table,
        testing: &Table,
        params: SplitRegressionParams,
        regressor: R,
    ) -> Result<Self> {
        let params = params.check()?;

        let train_names = training.column_names();
        let test_names = testing.column_names();
        if train_names != test_names {
            return Err(SplitError::SchemaMismatch {
                train: train_names.iter().map(|s| s.to_string()).collect(),
                test: test_names.iter().map(|s| s.to_string()).collect(),
            });
        }
        training.column(params.label())?;

        // Everything but the indicator and the label is a predictor and must
        // be numeric.
        let predictors: Vec<String> = training
            .columns()
            .iter()
            .filter(|c| c.name != params.indicator() && c.name != params.label())
            .map(|c| c.name.clone())
            .collect();
        for column in training.columns().iter().chain(testing.columns().iter()) {
            if column.name != params.indicator() {
                if let ColumnData::Nominal(_) = column.data {
                    return Err(TableError::NotNumeric(column.name.clone()).into());
                }
            }
        }

        let train = split_on_indicator(training, params.indicator())?;
        let test = split_on_indicator(testing, params.indicator())?;
        let partitions = Groups {
            a: Partition {
                train: train.a,
                test: test.a,
            },
            b: Partition {
                train: train.b,
                test: test.b,
            },
        };

        log::debug!(
            "split on {:?}: group A {} train / {} test rows, group B {} train / {} test rows",
            params.indicator(),
            partitions.a.train.n_rows(),
            partitions.a.test.n_rows(),
            partitions.b.train.n_rows(),
            partitions.b.test.n_rows()
        );

        Ok(SplitRegressor {
            params,
            regressor,
            predictors,
            partitions,
            stage: Stage::Constructed,
        })
    }

    /// Fits one model per group on its training rows. Refitting discards any
    /// previous predictions and metrics.
    pub fn fit(&mut self) -> Result<()> {
        let models = Groups::try_build(|group| -> Result<R::Object> {
            let train = &self.partitions.get(group).train;
            let dataset = self.dataset(train)?;
            log::debug!("fitting group {} on {} rows", group, dataset.n_samples());
            self.regressor
                .fit(&dataset)
                .map_err(|source| SplitError::Regression { group, source })
        })?;
        self.stage = Stage::Fitted { models };
        Ok(())
    }

    /// Predicts each group's testing rows with that group's model, keeping
    /// row order within the group.
    pub fn predict(&mut self) -> Result<Groups<Array1<f64>>> {
        let models = self.stage.models().ok_or(SplitError::NotFitted)?;
        let predictions = Groups::try_build(|group| -> Result<Array1<f64>> {
            let X = self.partitions.get(group).test.to_matrix(&self.predictors)?;
            models
                .get(group)
                .predict(&X)
                .map_err(|source| SplitError::Regression { group, source })
        })?;

        let models = match std::mem::replace(&mut self.stage, Stage::Constructed) {
            Stage::Fitted { models }
            | Stage::Predicted { models, .. }
            | Stage::Evaluated { models, .. } => models,
            Stage::Constructed => unreachable!("models are checked before predicting"),
        };
        self.stage = Stage::Predicted {
            models,
            predictions: predictions.clone(),
        };
        Ok(predictions)
    }

    /// Scores group A's then group B's predictions against the matching
    /// testing labels.
    pub fn evaluate(&mut self) -> Result<Metrics> {
        let predictions = self.stage.predictions().ok_or(SplitError::NotPredicted)?;
        let y_pred: Array1<f64> = predictions
            .a
            .iter()
            .chain(predictions.b.iter())
            .copied()
            .collect();
        let labels_a = self.partitions.a.test.numeric_column(self.params.label())?;
        let labels_b = self.partitions.b.test.numeric_column(self.params.label())?;
        let y_true: Array1<f64> = labels_a.iter().chain(labels_b.iter()).copied().collect();

        let metrics = Metrics::compute(&y_pred, &y_true)?;
        log::info!("split regression on {:?}: {}", self.params.indicator(), metrics);

        self.stage = match std::mem::replace(&mut self.stage, Stage::Constructed) {
            Stage::Predicted {
                models,
                predictions,
            }
            | Stage::Evaluated {
                models,
                predictions,
                ..
            } => Stage::Evaluated {
                models,
                predictions,
                metrics,
            },
            stage => {
                self.stage = stage;
                return Err(SplitError::NotPredicted);
            }
        };
        Ok(metrics)
    }

    pub fn params(&self) -> &SplitRegressionValidParams {
        &self.params
    }

    /// Names of the predictor columns, in the order they enter the design
    /// matrix.
    pub fn predictors(&self) -> &[String] {
        &self.predictors
    }

    pub fn partitions(&self) -> &Groups<Partition> {
        &self.partitions
    }

    pub fn stage(&self) -> StageKind {
        self.stage.kind()
    }

    pub fn models(&self) -> Option<&Groups<R::Object>> {
        self.stage.models()
    }

    pub fn predictions(&self) -> Option<&Groups<Array1<f64>>> {
        self.stage.predictions()
    }

    pub fn metrics(&self) -> Option<Metrics> {
        match self.stage {
            Stage::Evaluated { metrics, .. } => Some(metrics),
            _ => None,
        }
    }

    fn dataset(&self, table: &Table) -> Result<DenseDataset<f64>> {
        let X = table.to_matrix(&self.predictors)?;
        let y = table.numeric_column(self.params.label())?.to_owned();
        Ok(DatasetBase::new(X, y))
    }
}

/// This function partitions the rows of `table` on a 0/1 indicator column and
/// drops the indicator. Any other indicator value is an error.
fn split_on_indicator(table: &Table, indicator: &str) -> Result<Groups<Table>> {
    let values = table.numeric_column(indicator)?;
    if let Some(&value) = values.iter().find(|&&v| v != 0. && v != 1.) {
        return Err(SplitError::InvalidIndicator {
            column: indicator.to_string(),
            value,
        });
    }

    Groups::try_build(|group| -> Result<Table> {
        let target = group.indicator_value();
        let rows = table.filter_rows(|i| values[i] == target);
        Ok(rows.drop_columns(&[indicator])?)
    })
}
