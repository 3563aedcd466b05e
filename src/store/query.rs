use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::record::Record;

#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Neq(String, Value),
    Gte(String, Value),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_owned(), value.into())
    }

    pub fn neq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Neq(field.to_owned(), value.into())
    }

    pub fn gte(field: &str, value: impl Into<Value>) -> Self {
        Filter::Gte(field.to_owned(), value.into())
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::Eq(field, expected) => record.value_of(field).as_ref() == Some(expected),
            // A missing field is "not equal", same as `NOT (data @> ...)` in Postgres.
            Filter::Neq(field, expected) => record.value_of(field).as_ref() != Some(expected),
            Filter::Gte(field, bound) => match record.value_of(field) {
                Some(value) => compare_values(&value, bound) != Ordering::Less,
                None => false,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub ascending: bool,
}

/// Filters, ordering and limit for a `find`. Filters are ANDed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: &str, ascending: bool) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_owned(),
            ascending,
        });
        self
    }

    pub fn newest_first(self) -> Self {
        self.order_by("created_at", false)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Runs the query against an in-memory slice. Sorting is stable, so records
    /// that compare equal keep the order they came in.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        let mut matched: Vec<Record> = records
            .iter()
            .filter(|record| self.filters.iter().all(|f| f.matches(record)))
            .cloned()
            .collect();

        if let Some(order) = &self.order_by {
            matched.sort_by(|a, b| {
                let ordering = compare_optional(
                    a.value_of(&order.field).as_ref(),
                    b.value_of(&order.field).as_ref(),
                );
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }

        matched
    }
}

// Missing values sort after present ones ascending, before them descending (Postgres NULL order).
fn compare_optional(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_values(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => {
            match (
                DateTime::parse_from_rfc3339(a),
                DateTime::parse_from_rfc3339(b),
            ) {
                (Ok(a), Ok(b)) => a.with_timezone(&Utc).cmp(&b.with_timezone(&Utc)),
                _ => a.cmp(b),
            }
        }
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => a.to_string().cmp(&b.to_string()),
    }
}
