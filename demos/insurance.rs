extern crate splitlm;

use splitlm::{
    count_levels, encode_features, helpers::test_helpers::generate_insurance_table,
    OneHotEncoder, SplitRegressionParams, SplitRegressor,
};

fn main() {
    let train = generate_insurance_table(500, 0);
    let test = generate_insurance_table(120, 1);

    // Level counts
    let report = count_levels(&train, &["sex", "smoker_yes"]).unwrap();
    println!("{}", report);

    // One-hot encoding of the nominal features
    let nominal = ["sex"];
    let encoder = OneHotEncoder::params().fit(&train, &nominal).unwrap();
    let train = encode_features(&train, &encoder, &nominal).unwrap();
    let test = encode_features(&test, &encoder, &nominal).unwrap();

    // One regression for smokers, one for non-smokers
    let params = SplitRegressionParams::new("smoker_yes", "charges");
    let mut split = SplitRegressor::new(&train, &test, params).unwrap();
    split.fit().unwrap();
    split.predict().unwrap();
    let metrics = split.evaluate().unwrap();

    let models = split.models().unwrap();
    println!("predictors: {:?}", split.predictors());
    println!("smokers:     {}", models.a.coefficients());
    println!("non-smokers: {}", models.b.coefficients());
    println!("{}", metrics);
}
