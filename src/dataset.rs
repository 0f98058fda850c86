use crate::stats::{infer_column_stats, ColumnStats, ColumnType};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One record of scalar cells keyed by column name.
pub type Row = HashMap<String, Value>;

/// An immutable row collection with its ordered column list and
/// per-column statistics.
///
/// Constructed once per ingestion event; derived views (correlation
/// matrices, chart aggregations) read it without ever mutating it. The
/// column list comes from the ingestion adapter (CSV headers, or the first
/// JSON record's key order) rather than being re-derived per row; rows with
/// divergent keys are tolerated — extra keys are ignored and missing keys
/// read as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    name: String,
    rows: Vec<Row>,
    columns: Vec<String>,
    stats: Vec<ColumnStats>,
}

impl Dataset {
    /// Build a dataset from decoded rows and an explicit ordered column
    /// list, computing column statistics once.
    pub fn new(name: impl Into<String>, rows: Vec<Row>, columns: Vec<String>) -> Self {
        let stats = infer_column_stats(&rows, &columns);
        Dataset {
            name: name.into(),
            rows,
            columns,
            stats,
        }
    }

    /// Dataset name (typically the uploaded file's stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw rows, in ingestion order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Per-column statistics, in column order.
    pub fn stats(&self) -> &[ColumnStats] {
        &self.stats
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Names of the columns classified numeric, in column order. This is
    /// the subset the correlation matrix operates on.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.stats
            .iter()
            .filter(|s| s.column_type == ColumnType::Numeric)
            .map(|s| s.name.clone())
            .collect()
    }

    /// The full pairwise correlation matrix over this dataset's numeric
    /// columns.
    pub fn correlation_matrix(&self) -> Vec<crate::stats::CorrelationEntry> {
        crate::stats::correlation_matrix(&self.rows, &self.numeric_columns())
    }

    /// All raw values of one column, missing keys reading as null. Returns
    /// `None` for a column not in the dataset's column list.
    pub fn column_values(&self, name: &str) -> Option<Vec<Value>> {
        if !self.contains_column(name) {
            return None;
        }
        Some(
            self.rows
                .iter()
                .map(|row| row.get(name).cloned().unwrap_or(Value::Null))
                .collect(),
        )
    }
}
