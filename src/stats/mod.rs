//! Column statistics: type inference and per-column descriptive metrics.
//!
//! The entry point is [`infer_column_stats`], which classifies each column
//! of a row set and computes the descriptive statistics appropriate for its
//! type. Correlation lives in the [`correlation`] submodule.

pub mod correlation;
pub mod infer;

pub use correlation::{correlation_matrix, CorrelationEntry};
pub use infer::{infer_column_type, ColumnType};

use crate::dataset::Row;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Descriptive statistics for one column.
///
/// `min`/`max`/`mean`/`median` are populated for numeric columns;
/// `most_frequent` for everything else. Stats are computed once at dataset
/// construction and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Column name.
    pub name: String,
    /// Inferred type tag.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Count of distinct raw values (a null counts as one distinct value).
    pub unique: usize,
    /// Count of missing cells (null or empty string).
    pub missing: usize,
    /// Minimum, for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum, for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Arithmetic mean, for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// Median, for numeric columns. Taken as the element at index
    /// `count / 2` of the ascending sort, which for even-length input is the
    /// upper-middle element rather than the midpoint average. Downstream
    /// consumers depend on this exact choice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    /// Most frequent value, for non-numeric columns. Ties go to the value
    /// encountered first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_frequent: Option<String>,
}

/// Compute one [`ColumnStats`] per column, preserving column order.
///
/// Rows with divergent key sets are tolerated: extra keys are ignored and a
/// missing key reads as null. An empty row set yields an entry per column
/// with type `Unknown`.
pub fn infer_column_stats(rows: &[Row], columns: &[String]) -> Vec<ColumnStats> {
    columns
        .iter()
        .map(|col| {
            let values: Vec<Value> = rows
                .iter()
                .map(|row| row.get(col).cloned().unwrap_or(Value::Null))
                .collect();
            column_stats(col, &values)
        })
        .collect()
}

fn column_stats(name: &str, values: &[Value]) -> ColumnStats {
    let column_type = infer_column_type(values);
    let unique = values.iter().collect::<HashSet<&Value>>().len();
    let missing = values.iter().filter(|v| v.is_missing()).count();

    let mut stats = ColumnStats {
        name: name.to_string(),
        column_type,
        unique,
        missing,
        min: None,
        max: None,
        mean: None,
        median: None,
        most_frequent: None,
    };

    if column_type == ColumnType::Numeric {
        let mut nums: Vec<f64> = values
            .iter()
            .filter(|v| !v.is_missing())
            .filter_map(Value::to_number)
            .collect();
        if !nums.is_empty() {
            nums.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let sum: f64 = nums.iter().sum();
            stats.min = Some(nums[0]);
            stats.max = Some(nums[nums.len() - 1]);
            stats.mean = Some(sum / nums.len() as f64);
            stats.median = Some(nums[nums.len() / 2]);
        }
    } else {
        stats.most_frequent = most_frequent(values);
    }

    stats
}

/// Highest-count label among the non-missing values, first-encountered
/// winning ties.
fn most_frequent(values: &[Value]) -> Option<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for value in values.iter().filter(|v| !v.is_missing()) {
        let key = value.label();
        if !counts.contains_key(&key) {
            order.push(key.clone());
        }
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for key in &order {
        let count = counts[key];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key.to_string())
}
