extern crate ndarray;

mod impl_datasets;
mod impl_design_matrix;

/// A design matrix paired with its targets.
pub struct DatasetBase<DM, T>
where
    DM: DesignMatrix,
    T: Targets,
{
    pub design_matrix: DM,
    pub targets: T,
}

pub type DenseDataset<F> = DatasetBase<ndarray::Array2<F>, ndarray::Array1<F>>;

pub trait DesignMatrix: Sized {
    type Elem;

    fn n_samples(&self) -> usize;
    fn n_features(&self) -> usize;
}

pub trait Targets: Sized {
    type Elem;

    fn n_samples(&self) -> usize;
}
