use serde_json::{Map, Value};

use crate::errors::BackendError;

/// One table row as a JSON object.
pub type Row = Map<String, Value>;

/// Row filter understood by the table API.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `col=eq.value`
    Eq { column: String, value: String },
    /// `col=ilike.pattern`; `*` and `%` match any run of characters.
    ILike { column: String, pattern: String },
    /// `col=not.is.null`
    NotNull { column: String },
    /// `or=(a,b,...)`
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self::Eq {
            column: column.into(),
            value: value.to_string(),
        }
    }

    pub fn ilike(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::ILike {
            column: column.into(),
            pattern: pattern.into(),
        }
    }

    pub fn not_null(column: impl Into<String>) -> Self {
        Self::NotNull {
            column: column.into(),
        }
    }

    /// Evaluates the filter against a row held in memory.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Eq { column, value } => {
                cell_text(row.get(column)).is_some_and(|cell| cell == *value)
            }
            Self::ILike { column, pattern } => cell_text(row.get(column))
                .is_some_and(|cell| like_match(&pattern.to_lowercase(), &cell.to_lowercase())),
            Self::NotNull { column } => row.get(column).is_some_and(|v| !v.is_null()),
            Self::Or(filters) => filters.iter().any(|f| f.matches(row)),
        }
    }
}

/// Text form of a scalar cell, as the table API compares it.
fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn like_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split(['*', '%']).collect();
    if parts.len() == 1 {
        return pattern == text;
    }
    let mut rest = text;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            match rest.strip_prefix(part) {
                Some(r) => rest = r,
                None => return false,
            }
        } else if i == parts.len() - 1 {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(idx) => rest = &rest[idx + part.len()..],
                None => return false,
            }
        }
    }
    true
}

/// Select query: filters are AND-ed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    /// Column list for `select=`; `None` selects `*`.
    pub columns: Option<String>,
    /// `(column, ascending)`
    pub order: Option<(String, bool)>,
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

    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order = Some((column.into(), true));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }
}

/// Table-style access to the relational backend.
pub trait IRecordStore: Send + Sync {
    fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, BackendError>;

    /// Inserts one row and returns it as stored (including its generated id).
    fn insert(&self, table: &str, row: &Row) -> Result<Row, BackendError>;

    /// Applies `patch` to every row matching `filters`; returns updated rows.
    fn update(&self, table: &str, filters: &[Filter], patch: &Row) -> Result<Vec<Row>, BackendError>;

    /// Inserts, or merges into the row whose `on_conflict` column matches.
    fn upsert(&self, table: &str, row: &Row, on_conflict: &str) -> Result<Row, BackendError>;

    /// Deletes rows matching `filters`; returns how many were removed.
    fn delete(&self, table: &str, filters: &[Filter]) -> Result<usize, BackendError>;
}
