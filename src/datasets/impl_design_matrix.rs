use super::{DesignMatrix, Targets};
use ndarray::{ArrayBase, Axis, Data, Ix1, Ix2};

/// This implements the [`DesignMatrix`] trait for dense matrices.
impl<F, S: Data<Elem = F>> DesignMatrix for ArrayBase<S, Ix2> {
    type Elem = F;

    fn n_samples(&self) -> usize {
        self.len_of(Axis(0))
    }

    fn n_features(&self) -> usize {
        self.len_of(Axis(1))
    }
}

/// This implements the [`Targets`] trait for single-task targets.
impl<F, S: Data<Elem = F>> Targets for ArrayBase<S, Ix1> {
    type Elem = F;

    fn n_samples(&self) -> usize {
        self.len_of(Axis(0))
    }
}
