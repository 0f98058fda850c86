//! DataLens: the analytics core behind a tabular-data exploration app.
//!
//! The crate ingests rows of heterogeneous scalar fields (as decoded from an
//! uploaded CSV or a JSON record array) and produces three derived views:
//!
//! - per-column type classification and descriptive statistics
//!   ([`infer_column_stats`]),
//! - a full pairwise correlation matrix over the numeric columns
//!   ([`correlation_matrix`]),
//! - aggregated point series for rendering under several chart kinds
//!   ([`aggregate_for_chart`]).
//!
//! All analytics entry points are pure, synchronous functions over
//! already-materialized row collections. They never perform I/O, never panic
//! on conforming input, and hold no state between calls, so a caller may
//! invoke them from multiple threads against independent datasets without
//! coordination. File decoding lives in [`io`] and is the only fallible
//! surface.

pub mod chart;
pub mod dataset;
pub mod error;
pub mod io;
pub mod stats;
pub mod value;

// Re-export commonly used types
pub use chart::{
    aggregate_for_chart, pie_slices, ChartKind, ChartMemo, ChartPoint, PieSlice, YAxis, PALETTE,
};
pub use dataset::{Dataset, Row};
pub use error::{Error, Result};
pub use stats::correlation::{correlation_matrix, CorrelationEntry};
pub use stats::{infer_column_stats, infer_column_type, ColumnStats, ColumnType};
pub use value::Value;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
