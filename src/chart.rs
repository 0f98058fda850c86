//! Chart aggregation: turning raw rows plus a column selection into a
//! renderable point sequence.
//!
//! The pipeline is independent of the statistics side of the crate and is
//! recomputed from scratch whenever the user's selection changes; the only
//! caching is the single-entry [`ChartMemo`]. Three modes exist:
//!
//! - **count**: group by the x label, sort descending by group size, keep
//!   the top [`COUNT_GROUP_LIMIT`] groups;
//! - **numeric aggregation** (bar/line/area/pie with a real y column):
//!   group by the x label, average the y values that coerce numerically,
//!   keep the first [`VALUE_GROUP_LIMIT`] groups in encounter order;
//! - **scatter**: no grouping, the first [`SCATTER_POINT_LIMIT`] rows as
//!   raw (x, y) pairs.
//!
//! The two grouped modes deliberately order and truncate differently, and
//! their y-coercion policy (drop unparsable values) deliberately differs
//! from the correlation engine's zero-substitution. Both contracts are load
//! bearing for callers comparing output against the upstream app.

use crate::dataset::Row;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of groups emitted in count mode.
pub const COUNT_GROUP_LIMIT: usize = 20;
/// Maximum number of groups emitted in numeric aggregation mode.
pub const VALUE_GROUP_LIMIT: usize = 30;
/// Maximum number of points emitted in scatter mode.
pub const SCATTER_POINT_LIMIT: usize = 100;

/// Fixed slice palette, cycled by group index for pie charts.
pub const PALETTE: [&str; 6] = [
    "#6366f1", "#8b5cf6", "#ec4899", "#f43f5e", "#10b981", "#3b82f6",
];

/// The chart kinds the aggregation pipeline can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie,
    Scatter,
}

/// The y-axis selection: a real column, or the count-of-rows sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YAxis {
    /// Count rows per x group instead of aggregating a column.
    Count,
    /// Average this column's values per x group.
    Column(String),
}

impl YAxis {
    /// Column name read from rows. The count sentinel reads a literal
    /// `"count"` key, which scatter mode (the one mode that bypasses
    /// grouping) resolves against rows directly.
    fn key(&self) -> &str {
        match self {
            YAxis::Count => "count",
            YAxis::Column(name) => name,
        }
    }
}

impl From<&str> for YAxis {
    /// The upstream calling convention: the string `"count"` selects count
    /// mode, anything else names a column.
    fn from(s: &str) -> Self {
        if s == "count" {
            YAxis::Count
        } else {
            YAxis::Column(s.to_string())
        }
    }
}

/// One renderable point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPoint {
    /// A labeled group value (bar/line/area/pie).
    Labeled { label: String, value: f64 },
    /// A raw coordinate pair (scatter).
    Xy { x: f64, y: f64 },
}

/// A pie slice: a labeled group plus its palette color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

/// Aggregate rows into an ordered point sequence for the given selection.
///
/// Scatter bypasses grouping entirely; otherwise the mode follows the y
/// selection. Produces fresh output on every call — wrap in a [`ChartMemo`]
/// if the caller re-renders without changing the selection.
pub fn aggregate_for_chart(
    rows: &[Row],
    x_column: &str,
    y: &YAxis,
    kind: ChartKind,
) -> Vec<ChartPoint> {
    match (kind, y) {
        (ChartKind::Scatter, y) => scatter_points(rows, x_column, y.key()),
        (_, YAxis::Count) => count_groups(rows, x_column),
        (_, YAxis::Column(y_column)) => mean_groups(rows, x_column, y_column),
    }
}

/// Map grouped output to pie slices, colors cycling through [`PALETTE`] by
/// group index. Scatter points carry no label and are skipped.
pub fn pie_slices(points: &[ChartPoint]) -> Vec<PieSlice> {
    points
        .iter()
        .filter_map(|p| match p {
            ChartPoint::Labeled { label, value } => Some((label.clone(), *value)),
            ChartPoint::Xy { .. } => None,
        })
        .enumerate()
        .map(|(i, (label, value))| PieSlice {
            label,
            value,
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}

fn x_label(row: &Row, x_column: &str) -> String {
    row.get(x_column).map_or_else(|| "null".to_string(), Value::label)
}

fn count_groups(rows: &[Row], x_column: &str) -> Vec<ChartPoint> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let label = x_label(row, x_column);
        if !counts.contains_key(&label) {
            order.push(label.clone());
        }
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut groups: Vec<(String, usize)> = order
        .into_iter()
        .map(|label| {
            let count = counts[&label];
            (label, count)
        })
        .collect();
    // Stable sort: equal counts keep encounter order
    groups.sort_by(|a, b| b.1.cmp(&a.1));

    groups
        .into_iter()
        .take(COUNT_GROUP_LIMIT)
        .map(|(label, count)| ChartPoint::Labeled {
            label,
            value: count as f64,
        })
        .collect()
}

fn mean_groups(rows: &[Row], x_column: &str, y_column: &str) -> Vec<ChartPoint> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();

    for row in rows {
        // Unparsable y values are dropped from both the sum and the count;
        // a group whose every y fails coercion never appears at all.
        let Some(y_value) = row.get(y_column).and_then(Value::to_number) else {
            continue;
        };
        let label = x_label(row, x_column);
        if !sums.contains_key(&label) {
            order.push(label.clone());
        }
        let entry = sums.entry(label).or_insert((0.0, 0));
        entry.0 += y_value;
        entry.1 += 1;
    }

    // First VALUE_GROUP_LIMIT groups in encounter order, not sorted
    order
        .into_iter()
        .take(VALUE_GROUP_LIMIT)
        .map(|label| {
            let (sum, count) = sums[&label];
            ChartPoint::Labeled {
                label,
                value: sum / count as f64,
            }
        })
        .collect()
}

fn scatter_points(rows: &[Row], x_column: &str, y_column: &str) -> Vec<ChartPoint> {
    rows.iter()
        .take(SCATTER_POINT_LIMIT)
        .map(|row| ChartPoint::Xy {
            x: row.get(x_column).and_then(Value::to_number).unwrap_or(0.0),
            y: row.get(y_column).and_then(Value::to_number).unwrap_or(0.0),
        })
        .collect()
}

/// Single-entry memo over [`aggregate_for_chart`].
///
/// Keyed by the identity of the row slice plus the full selection; any
/// change to the selection recomputes from scratch. Row identity is the
/// slice's address and length — sufficient for the intended use, where the
/// caller holds an immutable [`crate::Dataset`] for the memo's lifetime.
#[derive(Debug, Default)]
pub struct ChartMemo {
    key: Option<MemoKey>,
    points: Vec<ChartPoint>,
}

#[derive(Debug, PartialEq)]
struct MemoKey {
    rows_ptr: usize,
    rows_len: usize,
    x_column: String,
    y: YAxis,
    kind: ChartKind,
}

impl ChartMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate, reusing the previous result when the selection and row
    /// identity both match.
    pub fn aggregate(
        &mut self,
        rows: &[Row],
        x_column: &str,
        y: &YAxis,
        kind: ChartKind,
    ) -> &[ChartPoint] {
        let key = MemoKey {
            rows_ptr: rows.as_ptr() as usize,
            rows_len: rows.len(),
            x_column: x_column.to_string(),
            y: y.clone(),
            kind,
        };
        if self.key.as_ref() != Some(&key) {
            self.points = aggregate_for_chart(rows, x_column, y, kind);
            self.key = Some(key);
        }
        &self.points
    }
}
