use crate::datasets::{DatasetBase, DesignMatrix, Targets};
use crate::traits::Fit;
use std::error::Error;

/// Parameters that must be validated before use
///
/// Builders such as [`LinearRegressionParams`](crate::linear::LinearRegressionParams)
/// and [`SplitRegressionParams`](crate::split::SplitRegressionParams) hand out
/// their checked counterpart only once validation succeeded. Whatever is
/// implemented on the checked parameters through [`Fit`] is implemented on
/// the unchecked ones too, with validation run first.
pub trait ParamGuard {
    /// The validated parameters
    type Checked;
    /// Error raised by a failed validation
    type Error: Error;

    /// Validates and borrows the checked parameters
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Validates and returns the checked parameters
    fn check(self) -> Result<Self::Checked, Self::Error>;
}

/// Validates, then fits with the checked parameters. A validation error is
/// converted into the error type of the underlying `Fit`.
impl<DM: DesignMatrix, T: Targets, E, P: ParamGuard> Fit<DM, T, E> for P
where
    P::Checked: Fit<DM, T, E>,
    E: Error + From<P::Error>,
{
    type Object = <<P as ParamGuard>::Checked as Fit<DM, T, E>>::Object;

    fn fit(&self, dataset: &DatasetBase<DM, T>) -> Result<Self::Object, E> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}
