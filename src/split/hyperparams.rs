use super::error::{Result, SplitError};
use crate::param_guard::ParamGuard;

/// A verified set of column roles for a [`SplitRegressor`](super::SplitRegressor)
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRegressionValidParams {
    indicator: String,
    label: String,
}

impl SplitRegressionValidParams {
    /// The binary column rows are split on.
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// The numeric column each group's regression predicts.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Column roles during construction
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRegressionParams(SplitRegressionValidParams);

impl SplitRegressionParams {
    pub fn new<I: Into<String>, L: Into<String>>(indicator: I, label: L) -> SplitRegressionParams {
        Self(SplitRegressionValidParams {
            indicator: indicator.into(),
            label: label.into(),
        })
    }

    pub fn indicator<I: Into<String>>(mut self, indicator: I) -> Self {
        self.0.indicator = indicator.into();
        self
    }

    pub fn label<L: Into<String>>(mut self, label: L) -> Self {
        self.0.label = label.into();
        self
    }
}

impl ParamGuard for SplitRegressionParams {
    type Checked = SplitRegressionValidParams;
    type Error = SplitError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.indicator.is_empty() {
            Err(SplitError::EmptyColumnName("indicator"))
        } else if self.0.label.is_empty() {
            Err(SplitError::EmptyColumnName("label"))
        } else if self.0.indicator == self.0.label {
            Err(SplitError::IndicatorIsLabel(self.0.label.clone()))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
