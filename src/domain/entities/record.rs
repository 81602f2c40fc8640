use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::list::text::fold;

/// A single named field read off a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(Cow<'a, str>),
    Number(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl FieldValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Date(_) | FieldValue::Timestamp(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }

    /// Calendar day of a date-like value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(date) => Some(*date),
            FieldValue::Timestamp(ts) => Some(ts.date()),
            _ => None,
        }
    }

    fn as_instant(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Date(date) => date.and_hms_opt(0, 0, 0),
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            FieldValue::Missing => String::new(),
            FieldValue::Text(text) => text.to_string(),
            FieldValue::Number(value) => format_number(*value),
            FieldValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            FieldValue::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Total order over field values. Missing values sort first.
pub fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) => collate(x, y),
        _ => match (a.as_instant(), b.as_instant()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a.rank().cmp(&b.rank()),
        },
    }
}

/// Case and accent insensitive ordering with a byte-order fallback so that
/// distinct strings never compare equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

/// Expected value of an equality filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(f64),
}

impl FilterValue {
    pub fn matches(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (FilterValue::Text(expected), FieldValue::Text(actual)) => expected == actual.as_ref(),
            (FilterValue::Number(expected), FieldValue::Number(actual)) => expected == actual,
            (FilterValue::Number(expected), FieldValue::Text(actual)) => actual
                .trim()
                .parse::<f64>()
                .map(|parsed| parsed == *expected)
                .unwrap_or(false),
            (FilterValue::Text(expected), FieldValue::Number(actual)) => expected
                .trim()
                .parse::<f64>()
                .map(|parsed| parsed == *actual)
                .unwrap_or(false),
            (FilterValue::Text(expected), other @ (FieldValue::Date(_) | FieldValue::Timestamp(_))) => {
                *expected == other.display()
            }
            _ => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value as f64)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

/// A ledger-like row the list engine can filter and order.
pub trait Record {
    fn field(&self, name: &str) -> FieldValue<'_>;
}
