use super::*;
use crate::table::TableError;
use ndarray::array;

fn insurance() -> Table {
    Table::with_index(
        vec![
            Column::numeric("age", vec![19., 18., 28., 33.]),
            Column::nominal("sex", vec!["female", "male", "male", "male"]),
            Column::nominal("region", vec!["southwest", "southeast", "southeast", "northwest"]),
            Column::numeric("charges", vec![16884.92, 1725.55, 4449.46, 21984.47]),
        ],
        vec![10, 11, 12, 13],
    )
    .unwrap()
}

#[test]
fn test_fit_sorts_categories() {
    let table = insurance();
    let encoder = OneHotEncoder::params()
        .fit(&table, &["region", "sex"])
        .unwrap();
    assert_eq!(
        encoder.categories()[0],
        vec![
            Value::from("northwest"),
            Value::from("southeast"),
            Value::from("southwest")
        ]
    );
    assert_eq!(encoder.categories()[1], vec![Value::from("female"), Value::from("male")]);
    assert_eq!(encoder.n_features_out(), 5);
}

#[test]
fn test_feature_names_out() {
    let table = insurance();
    let encoder = OneHotEncoder::params().fit(&table, &["sex"]).unwrap();
    let names = encoder.feature_names_out(&["sex".to_string()]).unwrap();
    assert_eq!(names, vec!["sex_female", "sex_male"]);
}

#[test]
fn test_transform() {
    let table = insurance();
    let encoder = OneHotEncoder::params().fit(&table, &["sex"]).unwrap();
    let encoded = encoder.transform(&table.select(&["sex"]).unwrap()).unwrap();
    assert_eq!(encoded, array![[1., 0.], [0., 1.], [0., 1.], [0., 1.]]);
}

#[test]
fn test_encode_features_layout() {
    let table = insurance();
    let nominal = ["sex", "region"];
    let encoder = OneHotEncoder::params().fit(&table, &nominal).unwrap();
    let encoded = encode_features(&table, &encoder, &nominal).unwrap();

    assert_eq!(
        encoded.column_names(),
        vec![
            "age",
            "charges",
            "sex_female",
            "sex_male",
            "region_northwest",
            "region_southeast",
            "region_southwest"
        ]
    );
    // (original - nominal) + levels
    assert_eq!(encoded.n_columns(), (4 - 2) + (2 + 3));
    assert_eq!(encoded.n_rows(), table.n_rows());
    assert_eq!(encoded.index(), &[10, 11, 12, 13]);
    assert_eq!(
        encoded.numeric_column("age").unwrap(),
        table.numeric_column("age").unwrap()
    );
    assert_eq!(
        encoded.numeric_column("region_southeast").unwrap(),
        array![0., 1., 1., 0.].view()
    );
}

#[test]
fn test_one_indicator_per_feature_row() {
    let table = insurance();
    let encoder = OneHotEncoder::params()
        .fit(&table, &["sex", "region"])
        .unwrap();
    let encoded = encoder
        .transform(&table.select(&["sex", "region"]).unwrap())
        .unwrap();
    for row in encoded.rows() {
        assert_eq!(row.sum(), 2.);
    }
}

#[test]
fn test_unknown_level() {
    let train = insurance();
    let test = Table::new(vec![Column::nominal("region", vec!["northeast", "southwest"])]).unwrap();

    let strict = OneHotEncoder::params().fit(&train, &["region"]).unwrap();
    assert_eq!(
        encode_features(&test, &strict, &["region"]),
        Err(EncoderError::UnknownLevel {
            feature: "region".to_string(),
            level: "northeast".to_string()
        })
    );

    let lenient = OneHotEncoder::params()
        .handle_unknown(UnknownLevel::Ignore)
        .fit(&train, &["region"])
        .unwrap();
    let encoded = encode_features(&test, &lenient, &["region"]).unwrap();
    assert_eq!(
        encoded.to_matrix(&encoded.column_names()).unwrap(),
        array![[0., 0., 0.], [0., 0., 1.]]
    );
}

#[test]
fn test_feature_mismatch() {
    let table = insurance();
    let encoder = OneHotEncoder::params().fit(&table, &["sex"]).unwrap();
    assert_eq!(
        encode_features(&table, &encoder, &["region"]),
        Err(EncoderError::FeatureMismatch {
            expected: vec!["sex".to_string()],
            found: vec!["region".to_string()]
        })
    );
}

#[test]
fn test_missing_nominal_feature() {
    let table = insurance();
    let encoder = OneHotEncoder::params().fit(&table, &["sex"]).unwrap();
    let without_sex = table.drop_columns(&["sex"]).unwrap();
    assert_eq!(
        encode_features(&without_sex, &encoder, &["sex"]),
        Err(EncoderError::Table(TableError::MissingColumn(
            "sex".to_string()
        )))
    );
}

#[test]
fn test_empty_features() {
    let table = insurance();
    let features: [&str; 0] = [];
    assert_eq!(
        OneHotEncoder::params().fit(&table, &features),
        Err(EncoderError::EmptyFeatures)
    );
}

#[test]
fn test_many_distinct_levels() {
    let n = 2_000;
    let ids: Vec<String> = (0..n).rev().map(|i| format!("id{:05}", i)).collect();
    let table = Table::new(vec![Column::nominal("policy", ids)]).unwrap();
    let encoder = OneHotEncoder::params().fit(&table, &["policy"]).unwrap();
    assert_eq!(encoder.n_features_out(), n);
    assert_eq!(encoder.categories()[0][0], Value::from("id00000"));

    let encoded = encoder.transform(&table).unwrap();
    assert_eq!(encoded.dim(), (n, n));
    // Rows hold ids in descending order, categories are ascending
    for (i, row) in encoded.rows().into_iter().enumerate() {
        assert_eq!(row.sum(), 1.);
        assert_eq!(row[n - 1 - i], 1.);
    }
}

#[test]
fn test_numeric_levels_fold_zeros_and_nan() {
    let table = Table::new(vec![Column::numeric(
        "children",
        vec![0., f64::NAN, -0., 2., f64::NAN],
    )])
    .unwrap();
    let encoder = OneHotEncoder::params().fit(&table, &["children"]).unwrap();
    assert_eq!(encoder.categories()[0].len(), 3);
    assert_eq!(encoder.categories()[0][0], Value::Number(0.));

    let encoded = encoder.transform(&table).unwrap();
    assert_eq!(
        encoded,
        array![
            [1., 0., 0.],
            [0., 0., 1.],
            [1., 0., 0.],
            [0., 1., 0.],
            [0., 0., 1.]
        ]
    );
}
