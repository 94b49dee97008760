//! Median discretization of numeric columns.
//!
//! ID3 only splits on categorical values, so numeric columns are bucketed
//! first. Each numeric column is cut once, globally, at its median:
//!
//! ```text
//! value <= m  →  "<=m"
//! value >  m  →  ">m"
//! missing     →  "missing"
//! ```
//!
//! The median is the upper median of the sorted non-missing values
//! (`sorted[len / 2]`), so it is always a value that occurs in the column.

use super::Row;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Bucket label for a missing value.
pub const MISSING: &str = "missing";

/// A cell before discretization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Categorical value, used as is.
    Category(String),
    /// Numeric value, bucketed around the column median.
    Number(f64),
    /// No value.
    Missing,
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Category(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        RawValue::Number(x)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Missing, Into::into)
    }
}

/// A row before discretization.
pub type RawRow = BTreeMap<String, RawValue>;

/// Output of [`discretize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Discretized {
    /// Fully categorical rows, in input order.
    pub rows: Vec<Row>,
    /// Split point of every numeric column that had at least one value.
    pub medians: BTreeMap<String, f64>,
}

/// Bucket one numeric column around its upper median.
///
/// `None` entries (and NaN) become [`MISSING`]. Returns `None` when the
/// column holds no numbers at all.
pub fn median_split(values: &[Option<f64>]) -> Option<(f64, Vec<String>)> {
    let mut present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|x| !x.is_nan())
        .collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(f64::total_cmp);
    let median = present[present.len() / 2];

    let labels = values
        .iter()
        .map(|v| match v {
            Some(x) if !x.is_nan() => bucket(*x, median),
            _ => MISSING.to_string(),
        })
        .collect();
    Some((median, labels))
}

fn bucket(x: f64, median: f64) -> String {
    if x <= median {
        format!("<={median}")
    } else {
        format!(">{median}")
    }
}

/// Turn raw rows into categorical rows.
///
/// A column is numeric when it holds at least one [`RawValue::Number`] and no
/// [`RawValue::Category`]; numeric columns are median-split, categorical
/// columns pass through. A column absent from a row counts as missing there.
/// Columns that mix numbers and categories are rejected.
pub fn discretize(raw: &[RawRow]) -> Result<Discretized> {
    if raw.is_empty() {
        return Err(Error::EmptyInput);
    }

    let columns: BTreeSet<&str> = raw
        .iter()
        .flat_map(|r| r.keys().map(String::as_str))
        .collect();

    let mut rows: Vec<Row> = vec![Row::new(); raw.len()];
    let mut medians = BTreeMap::new();

    for column in columns {
        // `None` when the row lacks the column entirely.
        let cells: Vec<Option<&RawValue>> = raw.iter().map(|r| r.get(column)).collect();
        let has_number = cells.iter().any(|c| matches!(c, Some(RawValue::Number(_))));
        let has_category = cells.iter().any(|c| matches!(c, Some(RawValue::Category(_))));

        let labels: Vec<String> = match (has_number, has_category) {
            (true, true) => {
                return Err(Error::MixedColumn {
                    column: column.to_string(),
                })
            }
            (true, false) => {
                let values: Vec<Option<f64>> = cells
                    .iter()
                    .map(|c| match c {
                        Some(RawValue::Number(x)) => Some(*x),
                        _ => None,
                    })
                    .collect();
                match median_split(&values) {
                    Some((median, labels)) => {
                        medians.insert(column.to_string(), median);
                        labels
                    }
                    None => vec![MISSING.to_string(); cells.len()],
                }
            }
            (false, _) => cells
                .iter()
                .map(|c| match c {
                    Some(RawValue::Category(s)) => s.clone(),
                    _ => MISSING.to_string(),
                })
                .collect(),
        };

        for (row, label) in rows.iter_mut().zip(labels) {
            row.insert(column.to_string(), label);
        }
    }

    Ok(Discretized { rows, medians })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: Vec<(&str, RawValue)>) -> RawRow {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_upper_median_split() {
        let (median, labels) =
            median_split(&[Some(4.0), Some(1.0), Some(3.0), Some(2.0)]).unwrap();
        // sorted [1, 2, 3, 4], index 2
        assert_eq!(median, 3.0);
        assert_eq!(labels, vec![">3", "<=3", "<=3", "<=3"]);
    }

    #[test]
    fn test_missing_bucket() {
        let (median, labels) = median_split(&[Some(0.5), None, Some(2.5), Some(f64::NAN)]).unwrap();
        assert_eq!(median, 2.5);
        assert_eq!(labels, vec!["<=2.5", MISSING, "<=2.5", MISSING]);
    }

    #[test]
    fn test_all_missing() {
        assert_eq!(median_split(&[None, None]), None);
    }

    #[test]
    fn test_discretize_mixed_table() -> Result<()> {
        let table = vec![
            raw(vec![("age", 18.0.into()), ("income", "Low".into()), ("buys", "No".into())]),
            raw(vec![("age", 35.0.into()), ("income", "High".into()), ("buys", "Yes".into())]),
            raw(vec![("age", RawValue::Missing), ("income", "High".into()), ("buys", "Yes".into())]),
            raw(vec![("age", 52.0.into()), ("buys", "No".into())]),
        ];

        let out = discretize(&table)?;

        assert_eq!(out.medians.get("age"), Some(&35.0));
        assert!(!out.medians.contains_key("income"));
        let ages: Vec<&str> = out.rows.iter().map(|r| r["age"].as_str()).collect();
        assert_eq!(ages, vec!["<=35", "<=35", MISSING, ">35"]);
        assert_eq!(out.rows[3]["income"], MISSING);
        assert_eq!(out.rows[1]["buys"], "Yes");
        Ok(())
    }

    #[test]
    fn test_mixed_column_rejected() {
        let table = vec![
            raw(vec![("x", 1.0.into())]),
            raw(vec![("x", "one".into())]),
        ];
        assert_eq!(
            discretize(&table),
            Err(Error::MixedColumn {
                column: "x".into()
            })
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(RawValue::from(None::<f64>), RawValue::Missing);
        assert_eq!(RawValue::from(Some(2.0)), RawValue::Number(2.0));
    }
}
