use super::*;
use crate::encoding::{encode_features, OneHotEncoder};
use crate::helpers::test_helpers::generate_insurance_table;
use crate::linear::LinearRegression;
use crate::metrics::MetricsError;
use crate::table::Column;
use approx::assert_abs_diff_eq;
use std::collections::HashSet;

fn two_policyholders() -> Table {
    Table::new(vec![
        Column::numeric("smoker_yes", vec![1., 0.]),
        Column::numeric("age", vec![30., 40.]),
        Column::numeric("charges", vec![5000., 3000.]),
    ])
    .unwrap()
}

fn smoker_params() -> SplitRegressionParams {
    SplitRegressionParams::new("smoker_yes", "charges")
}

#[test]
fn test_partition_two_rows() {
    let table = two_policyholders();
    let split = SplitRegressor::new(&table, &table, smoker_params()).unwrap();
    let partitions = split.partitions();

    for partition in [&partitions.a, &partitions.b] {
        assert_eq!(partition.train.n_rows(), 1);
        assert_eq!(partition.test.n_rows(), 1);
        assert!(!partition.train.has_column("smoker_yes"));
        assert!(!partition.test.has_column("smoker_yes"));
    }
    assert_eq!(partitions.a.train.index(), &[0]);
    assert_eq!(partitions.b.train.index(), &[1]);
    assert_eq!(split.predictors(), &["age".to_string()]);
    assert_eq!(split.stage(), StageKind::Constructed);
}

#[test]
fn test_partitions_are_disjoint_and_complete() {
    let train = generate_insurance_table(60, 1).drop_columns(&["sex"]).unwrap();
    let test = generate_insurance_table(30, 2).drop_columns(&["sex"]).unwrap();
    let split = SplitRegressor::new(&train, &test, smoker_params()).unwrap();
    let partitions = split.partitions();

    for (original, a, b) in [
        (&train, &partitions.a.train, &partitions.b.train),
        (&test, &partitions.a.test, &partitions.b.test),
    ] {
        let a: HashSet<usize> = a.index().iter().copied().collect();
        let b: HashSet<usize> = b.index().iter().copied().collect();
        assert!(a.is_disjoint(&b));
        let union: HashSet<usize> = a.union(&b).copied().collect();
        let expected: HashSet<usize> = original.index().iter().copied().collect();
        assert_eq!(union, expected);
    }
}

#[test]
fn test_predict_before_fit() {
    let table = two_policyholders();
    let mut split = SplitRegressor::new(&table, &table, smoker_params()).unwrap();
    assert_eq!(split.predict(), Err(SplitError::NotFitted));
    assert_eq!(split.stage(), StageKind::Constructed);
    assert!(split.predictions().is_none());
}

#[test]
fn test_evaluate_before_predict() {
    let table = generate_insurance_table(30, 3).drop_columns(&["sex"]).unwrap();
    let mut split = SplitRegressor::new(&table, &table, smoker_params()).unwrap();
    assert_eq!(split.evaluate(), Err(SplitError::NotPredicted));

    split.fit().unwrap();
    assert_eq!(split.evaluate(), Err(SplitError::NotPredicted));
    assert_eq!(split.stage(), StageKind::Fitted);
    assert!(split.models().is_some());
}

#[test]
fn test_full_workflow() {
    let nominal = ["sex"];
    let train = generate_insurance_table(200, 4);
    let test = generate_insurance_table(80, 5);
    let encoder = OneHotEncoder::params().fit(&train, &nominal).unwrap();
    let train = encode_features(&train, &encoder, &nominal).unwrap();
    let test = encode_features(&test, &encoder, &nominal).unwrap();

    let mut split = SplitRegressor::new(&train, &test, smoker_params()).unwrap();
    assert_eq!(
        split.predictors(),
        &["age", "bmi", "sex_female", "sex_male"]
    );

    split.fit().unwrap();
    let models = split.models().unwrap();
    // Complete one-hot block next to the intercept
    assert_eq!(models.a.aliased(), &[3]);
    assert_abs_diff_eq!(models.a.coefficients()[0], 250., epsilon = 15.);
    assert_abs_diff_eq!(models.b.coefficients()[0], 260., epsilon = 15.);

    let predictions = split.predict().unwrap();
    assert_eq!(predictions.a.len(), split.partitions().a.test.n_rows());
    assert_eq!(predictions.b.len(), split.partitions().b.test.n_rows());
    assert_eq!(split.stage(), StageKind::Predicted);

    let metrics = split.evaluate().unwrap();
    assert!(metrics.rmse < 400.);
    assert!(metrics.r_squared > 0.99);
    assert_eq!(split.metrics(), Some(metrics));
    assert_eq!(split.stage(), StageKind::Evaluated);
}

#[test]
fn test_perfect_fit_scores() {
    // Each group follows an exact line
    let train = Table::new(vec![
        Column::numeric("smoker_yes", vec![1., 1., 1., 0., 0., 0.]),
        Column::numeric("age", vec![20., 30., 40., 20., 30., 40.]),
        Column::numeric("charges", vec![21000., 21500., 22000., 3000., 3200., 3400.]),
    ])
    .unwrap();
    let test = Table::new(vec![
        Column::numeric("smoker_yes", vec![0., 1., 1., 0.]),
        Column::numeric("age", vec![50., 50., 60., 60.]),
        Column::numeric("charges", vec![3600., 22500., 23000., 3800.]),
    ])
    .unwrap();

    let mut split = SplitRegressor::new(&train, &test, smoker_params()).unwrap();
    split.fit().unwrap();
    let predictions = split.predict().unwrap();
    assert_abs_diff_eq!(predictions.a[0], 22500., epsilon = 1e-6);
    assert_abs_diff_eq!(predictions.a[1], 23000., epsilon = 1e-6);
    assert_abs_diff_eq!(predictions.b[0], 3600., epsilon = 1e-6);
    assert_abs_diff_eq!(predictions.b[1], 3800., epsilon = 1e-6);

    let metrics = split.evaluate().unwrap();
    assert_abs_diff_eq!(metrics.rmse, 0., epsilon = 1e-6);
    assert_abs_diff_eq!(metrics.r_squared, 1., epsilon = 1e-9);
}

#[test]
fn test_refit_resets_stage() {
    let table = generate_insurance_table(30, 6).drop_columns(&["sex"]).unwrap();
    let mut split = SplitRegressor::new(&table, &table, smoker_params()).unwrap();
    split.fit().unwrap();
    split.predict().unwrap();
    split.evaluate().unwrap();

    split.fit().unwrap();
    assert_eq!(split.stage(), StageKind::Fitted);
    assert!(split.predictions().is_none());
    assert!(split.metrics().is_none());
}

#[test]
fn test_degenerate_evaluation() {
    let train = generate_insurance_table(30, 7).drop_columns(&["sex"]).unwrap();
    let test = two_policyholders()
        .filter_rows(|i| i == 0)
        .select(&["smoker_yes", "age", "charges"])
        .unwrap();
    let train = train.select(&["smoker_yes", "age", "charges"]).unwrap();

    let mut split = SplitRegressor::new(&train, &test, smoker_params()).unwrap();
    split.fit().unwrap();
    let predictions = split.predict().unwrap();
    assert_eq!(predictions.a.len(), 1);
    assert_eq!(predictions.b.len(), 0);
    assert_eq!(
        split.evaluate(),
        Err(SplitError::Metrics(MetricsError::TooFewSamples(1)))
    );
    assert_eq!(split.stage(), StageKind::Predicted);
}

#[test]
fn test_empty_group_cannot_be_fitted() {
    let train = two_policyholders().filter_rows(|i| i == 0);
    let test = two_policyholders();
    let mut split = SplitRegressor::new(&train, &test, smoker_params()).unwrap();
    assert_eq!(
        split.fit(),
        Err(SplitError::Regression {
            group: Group::B,
            source: RegressionError::EmptyInput
        })
    );
    assert_eq!(split.stage(), StageKind::Constructed);
}

#[test]
fn test_invalid_indicator() {
    let table = Table::new(vec![
        Column::numeric("smoker_yes", vec![1., 2.]),
        Column::numeric("charges", vec![5000., 3000.]),
    ])
    .unwrap();
    assert_eq!(
        SplitRegressor::new(&table, &table, smoker_params()).err(),
        Some(SplitError::InvalidIndicator {
            column: "smoker_yes".to_string(),
            value: 2.
        })
    );
}

#[test]
fn test_construction_errors() {
    let table = two_policyholders();

    let missing = SplitRegressionParams::new("smoker", "charges");
    assert_eq!(
        SplitRegressor::new(&table, &table, missing).err(),
        Some(SplitError::Table(TableError::MissingColumn(
            "smoker".to_string()
        )))
    );

    let same = SplitRegressionParams::new("charges", "charges");
    assert_eq!(
        SplitRegressor::new(&table, &table, same).err(),
        Some(SplitError::IndicatorIsLabel("charges".to_string()))
    );

    let other = table.drop_columns(&["age"]).unwrap();
    assert!(matches!(
        SplitRegressor::new(&table, &other, smoker_params()).err(),
        Some(SplitError::SchemaMismatch { .. })
    ));

    let nominal = table
        .concat_columns(&Table::new(vec![Column::nominal("sex", vec!["male", "female"])]).unwrap())
        .unwrap();
    assert_eq!(
        SplitRegressor::new(&nominal, &nominal, smoker_params()).err(),
        Some(SplitError::Table(TableError::NotNumeric("sex".to_string())))
    );
}

#[test]
fn test_custom_regressor() {
    let table = generate_insurance_table(40, 8).drop_columns(&["sex"]).unwrap();
    let regressor = LinearRegression::<f64>::params().fit_intercept(false);
    let mut split =
        SplitRegressor::with_regressor(&table, &table, smoker_params(), regressor).unwrap();
    split.fit().unwrap();
    assert_eq!(split.models().unwrap().a.intercept(), 0.);
}

#[test]
fn test_predict_again_after_evaluate() {
    let table = generate_insurance_table(30, 9).drop_columns(&["sex"]).unwrap();
    let mut split = SplitRegressor::new(&table, &table, smoker_params()).unwrap();
    split.fit().unwrap();
    let first = split.predict().unwrap();
    split.evaluate().unwrap();

    let second = split.predict().unwrap();
    assert_eq!(first, second);
    assert_eq!(split.stage(), StageKind::Predicted);
    assert!(split.metrics().is_none());
    assert!(split.models().is_some());
}
