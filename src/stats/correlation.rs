// Pairwise Pearson correlation over numeric columns

use crate::dataset::Row;
use crate::value::Value;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Row cap for correlation input. Larger datasets are truncated to this
/// prefix (deterministically, not sampled at random) to bound the cost of
/// the k² pair computations.
pub const CORRELATION_SAMPLE_LIMIT: usize = 500;

/// One cell of the pairwise correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    /// First column of the ordered pair.
    pub x: String,
    /// Second column of the ordered pair.
    pub y: String,
    /// Pearson coefficient in [-1, 1], or 0.0 when either column has zero
    /// variance over the sampled rows.
    pub value: f64,
}

/// Compute the full k² correlation matrix over the given numeric columns.
///
/// Every ordered pair is emitted, self-pairs and both orderings included, in
/// row-major order over `numeric_columns`. Cells that fail numeric coercion
/// (and cells absent from a row) enter the computation as 0.0 rather than
/// being excluded; callers that need unbiased coefficients must clean their
/// columns first. A zero-variance column correlates to 0.0 against
/// everything, itself included.
///
/// The pair computations are independent and run on the rayon thread pool;
/// output order does not depend on scheduling.
pub fn correlation_matrix(rows: &[Row], numeric_columns: &[String]) -> Vec<CorrelationEntry> {
    let sample = if rows.len() > CORRELATION_SAMPLE_LIMIT {
        debug!(
            "correlation: sampling first {} of {} rows",
            CORRELATION_SAMPLE_LIMIT,
            rows.len()
        );
        &rows[..CORRELATION_SAMPLE_LIMIT]
    } else {
        rows
    };

    // Coerce each column once, up front, so pairs share the same buffers.
    let series: Vec<Vec<f64>> = numeric_columns
        .iter()
        .map(|col| {
            sample
                .iter()
                .map(|row| row.get(col).and_then(Value::to_number).unwrap_or(0.0))
                .collect()
        })
        .collect();

    let k = numeric_columns.len();
    (0..k)
        .into_par_iter()
        .flat_map_iter(|i| {
            let series = &series;
            (0..k).map(move |j| CorrelationEntry {
                x: numeric_columns[i].clone(),
                y: numeric_columns[j].clone(),
                value: pearson(&series[i], &series[j]),
            })
        })
        .collect()
}

/// Pearson correlation coefficient over two equal-length samples, using the
/// raw-sums form:
///
/// ```text
/// r = (n·Σxy − Σx·Σy) / sqrt((n·Σx² − (Σx)²) · (n·Σy² − (Σy)²))
/// ```
///
/// Returns 0.0 for empty input and whenever the denominator is zero. The
/// zero-variance rule applies to self-pairs too: a constant sample
/// correlated with itself is 0.0, not 1.0.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(xi, yi)| xi * yi).sum();
    let sum_x2: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_y2: f64 = y.iter().map(|yi| yi * yi).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
