use crate::table::{LevelKey, Result, Table, Value};
use std::collections::hash_map::{Entry, HashMap};
use std::fmt;


/// One row of a [`LevelReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCount {
    pub feature: String,
    pub level: Value,
    pub count: usize,
}

/// Level frequencies of several features, concatenated top to bottom in the
/// order the features were requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelReport {
    entries: Vec<LevelCount>,
}

impl LevelReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LevelCount] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelCount> {
        self.entries.iter()
    }

    /// Looks up the count of `level` for `feature`.
    pub fn count(&self, feature: &str, level: &Value) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.feature == feature && e.level.same_level(level))
            .map(|e| e.count)
    }

    /// The entries belonging to `feature`, by descending count.
    pub fn levels_of<'a>(&'a self, feature: &'a str) -> impl Iterator<Item = &'a LevelCount> {
        self.entries.iter().filter(move |e| e.feature == feature)
    }
}

impl<'a> IntoIterator for &'a LevelReport {
    type Item = &'a LevelCount;
    type IntoIter = std::slice::Iter<'a, LevelCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for LevelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels: Vec<String> = self.entries.iter().map(|e| e.level.to_string()).collect();
        let w_feature = self
            .entries
            .iter()
            .map(|e| e.feature.len())
            .chain(std::iter::once("feature".len()))
            .max()
            .unwrap_or(0);
        let w_level = levels
            .iter()
            .map(String::len)
            .chain(std::iter::once("level".len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{:<w_feature$}  {:<w_level$}  Count", "feature", "level")?;
        for (entry, level) in self.entries.iter().zip(levels.iter()) {
            writeln!(f, "{:<w_feature$}  {:<w_level$}  {}", entry.feature, level, entry.count)?;
        }
        Ok(())
    }
}

/// This function computes the frequency of every distinct value of each
/// feature. Within a feature, levels are ordered by descending count, ties
/// keeping the order in which levels are first encountered. Missing (NaN)
/// cells are not counted.
pub fn count_levels<S: AsRef<str>>(table: &Table, features: &[S]) -> Result<LevelReport> {
    let mut entries = Vec::new();

    for feature in features {
        let feature = feature.as_ref();
        let column = table.column(feature)?;

        let mut counts: Vec<(LevelKey, usize)> = Vec::new();
        let mut positions: HashMap<LevelKey, usize> = HashMap::new();
        for key in column.data.level_keys() {
            if key.is_missing() {
                continue;
            }
            match positions.entry(key) {
                Entry::Occupied(position) => counts[*position.get()].1 += 1,
                Entry::Vacant(position) => {
                    position.insert(counts.len());
                    counts.push((key, 1));
                }
            }
        }
        // Stable: ties keep encounter order
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        log::debug!("{} distinct levels for feature {:?}", counts.len(), feature);

        entries.extend(counts.into_iter().map(|(key, count)| LevelCount {
            feature: feature.to_string(),
            level: key.to_value(),
            count,
        }));
    }

    Ok(LevelReport { entries })
}
