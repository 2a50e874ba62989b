//! [`IRecordStore`] over a PostgREST table API (`/rest/v1/{table}`).

use serde_json::Value;
use tracing::debug;

use metlab_core::config::BackendConfig;
use metlab_core::errors::BackendError;
use metlab_core::traits::{Filter, IRecordStore, Query, Row};

use super::http_client::{HttpClient, HttpClientConfig};
use super::request::{Endpoint, HttpMethod, RequestSpec};

const RETURN_REPRESENTATION: &str = "return=representation";

pub struct PostgrestStore {
    endpoint: Endpoint,
    client: HttpClient,
}

impl PostgrestStore {
    pub fn new(endpoint: Endpoint, client: HttpClient) -> Self {
        Self { endpoint, client }
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Ok(Self::new(
            Endpoint::from_config(config)?,
            HttpClient::new(HttpClientConfig::from_backend(config)),
        ))
    }

    fn table_request(&self, method: HttpMethod, table: &str) -> RequestSpec {
        self.endpoint.request(method, &format!("/rest/v1/{table}"))
    }

    pub fn select_request(&self, table: &str, query: &Query) -> RequestSpec {
        let columns = query.columns.as_deref().unwrap_or("*");
        let mut spec = with_filters(self.table_request(HttpMethod::Get, table), &query.filters)
            .query("select", columns);
        if let Some((column, ascending)) = &query.order {
            let direction = if *ascending { "asc" } else { "desc" };
            spec = spec.query("order", format!("{column}.{direction}"));
        }
        if let Some(limit) = query.limit {
            spec = spec.query("limit", limit.to_string());
        }
        spec
    }

    pub fn insert_request(&self, table: &str, row: &Row) -> RequestSpec {
        self.table_request(HttpMethod::Post, table)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(Value::Object(row.clone()))
    }

    pub fn update_request(&self, table: &str, filters: &[Filter], patch: &Row) -> RequestSpec {
        with_filters(self.table_request(HttpMethod::Patch, table), filters)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(Value::Object(patch.clone()))
    }

    pub fn upsert_request(&self, table: &str, row: &Row, on_conflict: &str) -> RequestSpec {
        self.table_request(HttpMethod::Post, table)
            .query("on_conflict", on_conflict)
            .header("Prefer", format!("resolution=merge-duplicates,{RETURN_REPRESENTATION}"))
            .json(Value::Object(row.clone()))
    }

    pub fn delete_request(&self, table: &str, filters: &[Filter]) -> RequestSpec {
        with_filters(self.table_request(HttpMethod::Delete, table), filters)
            .header("Prefer", RETURN_REPRESENTATION)
    }

    fn rows(&self, spec: &RequestSpec) -> Result<Vec<Row>, BackendError> {
        debug!(method = spec.method.as_str(), url = %spec.url, "table request");
        let response = self.client.execute(spec)?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        response.json()
    }

    fn first_row(&self, spec: &RequestSpec, operation: &str, table: &str) -> Result<Row, BackendError> {
        self.rows(spec)?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Rejected {
                operation: operation.to_string(),
                target: table.to_string(),
                message: "no row returned".to_string(),
            })
    }
}

impl IRecordStore for PostgrestStore {
    fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, BackendError> {
        self.rows(&self.select_request(table, query))
    }

    fn insert(&self, table: &str, row: &Row) -> Result<Row, BackendError> {
        self.first_row(&self.insert_request(table, row), "insert", table)
    }

    fn update(&self, table: &str, filters: &[Filter], patch: &Row) -> Result<Vec<Row>, BackendError> {
        self.rows(&self.update_request(table, filters, patch))
    }

    fn upsert(&self, table: &str, row: &Row, on_conflict: &str) -> Result<Row, BackendError> {
        self.first_row(&self.upsert_request(table, row, on_conflict), "upsert", table)
    }

    fn delete(&self, table: &str, filters: &[Filter]) -> Result<usize, BackendError> {
        self.rows(&self.delete_request(table, filters)).map(|rows| rows.len())
    }
}

fn with_filters(mut spec: RequestSpec, filters: &[Filter]) -> RequestSpec {
    for filter in filters {
        let (key, value) = filter_param(filter);
        spec = spec.query(key, value);
    }
    spec
}

/// Query parameter for one filter, e.g. `("slug", "eq.abc")` or
/// `("or", "(slug.eq.abc,item_id.ilike.ABC)")`.
pub fn filter_param(filter: &Filter) -> (String, String) {
    match filter {
        Filter::Eq { column, value } => (column.clone(), format!("eq.{value}")),
        Filter::ILike { column, pattern } => (column.clone(), format!("ilike.{pattern}")),
        Filter::NotNull { column } => (column.clone(), "not.is.null".to_string()),
        Filter::Or(inner) => {
            let parts: Vec<String> = inner.iter().map(or_term).collect();
            ("or".to_string(), format!("({})", parts.join(",")))
        }
    }
}

fn or_term(filter: &Filter) -> String {
    match filter {
        Filter::Eq { column, value } => format!("{column}.eq.{}", quote_reserved(value)),
        Filter::ILike { column, pattern } => format!("{column}.ilike.{}", quote_reserved(pattern)),
        Filter::NotNull { column } => format!("{column}.not.is.null"),
        Filter::Or(inner) => {
            let parts: Vec<String> = inner.iter().map(or_term).collect();
            format!("or({})", parts.join(","))
        }
    }
}

/// Values inside `or=(...)` that contain reserved characters are
/// double-quoted.
fn quote_reserved(value: &str) -> String {
    if value.contains([',', '(', ')', '.', ':', '"', '\\']) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}
