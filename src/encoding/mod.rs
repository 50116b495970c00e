use ndarray::Array2;

use crate::table::{Column, ColumnData, LevelKey, Table, Value};
use std::collections::{HashMap, HashSet};

#[cfg(test)]
mod tests;

pub mod error;

pub use error::{EncoderError, Result};

/// A fitted categorical-to-binary transform
///
/// `transform` receives a table made of exactly the columns the encoder was
/// fitted on and returns one 0/1 column per known level.
pub trait CategoricalEncoder {
    fn transform(&self, table: &Table) -> Result<Array2<f64>>;

    /// Names of the columns produced by `transform`, given the input column
    /// names.
    fn feature_names_out(&self, input_features: &[String]) -> Result<Vec<String>>;
}

/// What to do with a level not seen during fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownLevel {
    /// Fail the transform
    #[default]
    Error,
    /// Encode the row as all zeros for that feature
    Ignore,
}

/// Configure a [`OneHotEncoder`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OneHotEncoderParams {
    handle_unknown: UnknownLevel,
}

impl OneHotEncoderParams {
    pub fn new() -> OneHotEncoderParams {
        Self::default()
    }

    /// Defaults to [`UnknownLevel::Error`] if not set.
    pub fn handle_unknown(mut self, handle_unknown: UnknownLevel) -> Self {
        self.handle_unknown = handle_unknown;
        self
    }

    /// Learns the levels of each feature. Categories are sorted: text
    /// lexicographically, numbers ascending.
    pub fn fit<S: AsRef<str>>(&self, table: &Table, features: &[S]) -> Result<OneHotEncoder> {
        if features.is_empty() {
            return Err(EncoderError::EmptyFeatures);
        }

        let mut categories = Vec::with_capacity(features.len());
        for feature in features {
            let column = table.column(feature.as_ref())?;
            let mut seen: HashSet<LevelKey> = HashSet::new();
            let mut levels: Vec<Value> = Vec::new();
            for key in column.data.level_keys() {
                if seen.insert(key) {
                    levels.push(key.to_value());
                }
            }
            levels.sort_by(|a, b| a.level_cmp(b));
            categories.push(levels);
        }

        Ok(OneHotEncoder {
            features: features.iter().map(|f| f.as_ref().to_string()).collect(),
            categories,
            handle_unknown: self.handle_unknown,
        })
    }
}

/// A one-hot encoder fitted on a set of nominal features.
#[derive(Debug, Clone, PartialEq)]
pub struct OneHotEncoder {
    features: Vec<String>,
    categories: Vec<Vec<Value>>,
    handle_unknown: UnknownLevel,
}

impl OneHotEncoder {
    pub fn params() -> OneHotEncoderParams {
        OneHotEncoderParams::new()
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Known levels, one list per fitted feature.
    pub fn categories(&self) -> &[Vec<Value>] {
        &self.categories
    }

    pub fn n_features_out(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    fn check_features<S: AsRef<str>>(&self, found: &[S]) -> Result<()> {
        let matches = found.len() == self.features.len()
            && found
                .iter()
                .zip(self.features.iter())
                .all(|(f, expected)| f.as_ref() == expected);
        if matches {
            Ok(())
        } else {
            Err(EncoderError::FeatureMismatch {
                expected: self.features.clone(),
                found: found.iter().map(|f| f.as_ref().to_string()).collect(),
            })
        }
    }
}

impl CategoricalEncoder for OneHotEncoder {
    fn transform(&self, table: &Table) -> Result<Array2<f64>> {
        self.check_features(&table.column_names())?;

        let mut encoded = Array2::<f64>::zeros((table.n_rows(), self.n_features_out()));
        let mut offset = 0;
        for (column, levels) in table.columns().iter().zip(self.categories.iter()) {
            let positions: HashMap<LevelKey, usize> = levels
                .iter()
                .enumerate()
                .map(|(k, level)| (level.level_key(), k))
                .collect();
            for (i, key) in column.data.level_keys().enumerate() {
                match positions.get(&key) {
                    Some(&k) => encoded[[i, offset + k]] = 1.,
                    None if self.handle_unknown == UnknownLevel::Ignore => {}
                    None => {
                        return Err(EncoderError::UnknownLevel {
                            feature: column.name.clone(),
                            level: key.to_value().to_string(),
                        })
                    }
                }
            }
            offset += levels.len();
        }
        Ok(encoded)
    }

    fn feature_names_out(&self, input_features: &[String]) -> Result<Vec<String>> {
        self.check_features(input_features)?;
        Ok(self
            .features
            .iter()
            .zip(self.categories.iter())
            .flat_map(|(feature, levels)| {
                levels
                    .iter()
                    .map(move |level| format!("{}_{}", feature, level))
            })
            .collect())
    }
}

/// This function replaces the nominal features of a table by the binary
/// columns produced by a fitted encoder. The remaining columns keep their
/// order and the encoded columns are appended after them. Row order and row
/// index are preserved.
pub fn encode_features<E, S>(table: &Table, encoder: &E, nominal_features: &[S]) -> Result<Table>
where
    E: CategoricalEncoder + ?Sized,
    S: AsRef<str>,
{
    let subset = table.select(nominal_features)?;
    let encoded = encoder.transform(&subset)?;
    let names: Vec<String> = nominal_features
        .iter()
        .map(|f| f.as_ref().to_string())
        .collect();
    let names_out = encoder.feature_names_out(&names)?;
    if names_out.len() != encoded.ncols() {
        return Err(EncoderError::OutputMismatch {
            columns: encoded.ncols(),
            names: names_out.len(),
        });
    }

    let columns = names_out
        .into_iter()
        .zip(encoded.columns())
        .map(|(name, values)| Column {
            name,
            data: ColumnData::Numeric(values.to_owned()),
        })
        .collect();
    let encoded = Table::with_index(columns, table.index().to_vec())?;

    log::debug!(
        "encoded {} nominal features into {} binary columns",
        names.len(),
        encoded.n_columns()
    );

    Ok(table.drop_columns(nominal_features)?.concat_columns(&encoded)?)
}
