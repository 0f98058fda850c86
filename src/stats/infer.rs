// Column type inference

use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag assigned to a column by [`infer_column_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Date,
    Unknown,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Date => "date",
            ColumnType::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Classify a column from its full list of raw values (missing cells
/// included).
///
/// Null and empty-string cells are discarded first. An all-missing column is
/// `Unknown`. If every remaining value coerces to a finite number the column
/// is `Numeric`; the numeric check runs before the date check, so a token
/// like `"2020"` classifies as numeric, never as a date. A column is `Date`
/// only if every remaining value parses as a date and at least one of them
/// is a string containing `-` or `/`. Everything else is `Categorical`.
pub fn infer_column_type(values: &[Value]) -> ColumnType {
    let present: Vec<&Value> = values.iter().filter(|v| !v.is_missing()).collect();
    if present.is_empty() {
        return ColumnType::Unknown;
    }

    if present.iter().all(|v| v.to_number().is_some()) {
        return ColumnType::Numeric;
    }

    let all_dates = present.iter().all(|v| is_date_like(v));
    let has_date_separator = present
        .iter()
        .any(|v| v.as_text().is_some_and(|s| s.contains('-') || s.contains('/')));
    if all_dates && has_date_separator {
        return ColumnType::Date;
    }

    ColumnType::Categorical
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn is_date_like(value: &Value) -> bool {
    let Some(s) = value.as_text() else {
        return false;
    };
    let s = s.trim();

    if DateTime::parse_from_rfc3339(s).is_ok() {
        return true;
    }
    if DATE_FORMATS.iter().any(|f| NaiveDate::parse_from_str(s, f).is_ok()) {
        return true;
    }
    DATETIME_FORMATS
        .iter()
        .any(|f| NaiveDateTime::parse_from_str(s, f).is_ok())
}
