
/// This module contains the dense linear algebra routines used to solve the
/// least-squares normal equations.
pub mod linalg {
    use crate::Float;
    use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

    /// Result of [`pivoted_cholesky`]: the lower triangular factor of the
    /// sub-matrix made of the `kept` rows and columns, in that order.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CholeskyFactor<F> {
        pub L: Array2<F>,
        pub kept: Vec<usize>,
        pub aliased: Vec<usize>,
    }

    /// This function factorizes a symmetric positive semi-definite matrix
    /// column by column. A column whose residual diagonal falls below
    /// `tolerance` times its original diagonal is linearly dependent on the
    /// columns kept before it: it is skipped and reported as aliased.
    pub fn pivoted_cholesky<F: 'static + Float>(A: ArrayView2<F>, tolerance: F) -> CholeskyFactor<F> {
        let size = A.shape()[0];
        let mut L = Array2::<F>::zeros((size, size));
        let mut kept: Vec<usize> = Vec::with_capacity(size);
        let mut aliased = Vec::new();

        for j in 0..size {
            let r = kept.len();
            // Solve L[..r, ..r] z = A[kept, j]
            let mut z = Array1::<F>::zeros(r);
            for (i, &ki) in kept.iter().enumerate() {
                let mut s = A[[ki, j]];
                for k in 0..i {
                    s -= L[[i, k]] * z[k];
                }
                z[i] = s / L[[i, i]];
            }
            let diag = A[[j, j]] - z.dot(&z);

            if A[[j, j]] <= F::zero() || diag <= tolerance * A[[j, j]] {
                aliased.push(j);
                continue;
            }
            for k in 0..r {
                L[[r, k]] = z[k];
            }
            L[[r, r]] = diag.sqrt();
            kept.push(j);
        }

        let r = kept.len();
        let L = L.slice(ndarray::s![..r, ..r]).to_owned();
        CholeskyFactor { L, kept, aliased }
    }

    /// Solves `L x = b` for a lower triangular `L`.
    pub fn forward_substitution<F: 'static + Float>(
        L: ArrayView2<F>,
        b: ArrayView1<F>,
    ) -> Result<Array1<F>, &'static str> {
        let size = b.len();
        let mut x = Array1::<F>::zeros(size);
        for i in 0..size {
            if L[[i, i]] == F::zero() {
                return Err("Singular triangular matrix");
            }
            let mut s = b[i];
            for k in 0..i {
                s -= L[[i, k]] * x[k];
            }
            x[i] = s / L[[i, i]];
        }
        Ok(x)
    }

    /// Solves `L^T x = b` for a lower triangular `L`.
    pub fn backward_substitution<F: 'static + Float>(
        L: ArrayView2<F>,
        b: ArrayView1<F>,
    ) -> Result<Array1<F>, &'static str> {
        let size = b.len();
        let mut x = Array1::<F>::zeros(size);
        for i in (0..size).rev() {
            if L[[i, i]] == F::zero() {
                return Err("Singular triangular matrix");
            }
            let mut s = b[i];
            for k in (i + 1)..size {
                s -= L[[k, i]] * x[k];
            }
            x[i] = s / L[[i, i]];
        }
        Ok(x)
    }

    /// Solves `L L^T x = b` from a Cholesky factor.
    pub fn cholesky_solve<F: 'static + Float>(
        L: ArrayView2<F>,
        b: ArrayView1<F>,
    ) -> Result<Array1<F>, &'static str> {
        let y = forward_substitution(L, b)?;
        backward_substitution(L, y.view())
    }
}

/// This module contains helpers functions to efficiently write tests.
pub mod test_helpers {
    use crate::table::{Column, Table};
    use crate::Float;
    use approx::AbsDiffEq;
    use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    pub fn assert_array_all_close<F>(x: ArrayView1<F>, y: ArrayView1<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.len(), y.len());
        for i in 0..x.len() {
            if x[i].abs_diff_ne(&y[i], delta) {
                panic!("x: {}, y: {} ; with precision level {}", x[i], y[i], delta);
            }
        }
    }

    pub fn assert_array2d_all_close<F>(x: ArrayView2<F>, y: ArrayView2<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.shape(), y.shape());
        for ((i, j), xij) in x.indexed_iter() {
            if xij.abs_diff_ne(&y[[i, j]], delta) {
                panic!(
                    "x: {}, y: {} ; with precision level {}",
                    xij,
                    y[[i, j]],
                    delta
                );
            }
        }
    }

    pub fn fill_random_vector(capacity: usize, seed: u64) -> Vec<f64> {
        let mut r = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0., 1.).unwrap();

        let mut data_x: Vec<f64> = Vec::with_capacity(capacity);
        for _ in 0..data_x.capacity() {
            data_x.push(normal.sample(&mut r));
        }
        data_x
    }

    /// Generates a linear problem `y = X w + b + noise` with Gaussian design,
    /// weights and noise scaled by `noise_scale`.
    pub fn generate_random_data(
        n_samples: usize,
        n_features: usize,
        noise_scale: f64,
    ) -> (Array2<f64>, Array1<f64>) {
        let data_x = fill_random_vector(n_samples * n_features, 42);
        let data_w = fill_random_vector(n_features, 43);
        let data_e = fill_random_vector(n_samples, 44);
        let X = Array2::from_shape_vec((n_samples, n_features), data_x).unwrap();
        let true_w = Array1::from_shape_vec(n_features, data_w).unwrap();
        let noise = Array1::from_shape_vec(n_samples, data_e).unwrap() * noise_scale;
        let y = X.dot(&true_w) + noise + 1.;

        (X, y)
    }

    /// Generates an insurance-like table with columns `age`, `bmi`, `sex`,
    /// `smoker_yes` and `charges`. Smokers and non-smokers follow two distinct
    /// linear charge models so that splitting on `smoker_yes` pays off.
    pub fn generate_insurance_table(n_samples: usize, seed: u64) -> Table {
        let mut r = StdRng::seed_from_u64(seed);
        let noise = Normal::new(0., 250.).unwrap();

        let mut age = Vec::with_capacity(n_samples);
        let mut bmi = Vec::with_capacity(n_samples);
        let mut sex = Vec::with_capacity(n_samples);
        let mut smoker = Vec::with_capacity(n_samples);
        let mut charges = Vec::with_capacity(n_samples);

        for i in 0..n_samples {
            let a: f64 = r.gen_range(18.0..65.0);
            let b: f64 = r.gen_range(16.0..45.0);
            // Alternate so that both groups are populated even for tiny tables
            let s = if i % 3 == 0 { 1. } else { 0. };
            let base = if s == 1. {
                20000. + 250. * a + 800. * (b - 30.)
            } else {
                2000. + 260. * a + 20. * b
            };
            age.push(a);
            bmi.push(b);
            sex.push(if r.gen_bool(0.5) { "female" } else { "male" });
            smoker.push(s);
            charges.push(base + noise.sample(&mut r));
        }

        Table::new(vec![
            Column::numeric("age", age),
            Column::numeric("bmi", bmi),
            Column::nominal("sex", sex),
            Column::numeric("smoker_yes", smoker),
            Column::numeric("charges", charges),
        ])
        .unwrap()
    }
}
