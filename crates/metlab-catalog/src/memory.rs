//! In-process record and object stores, with per-operation failure
//! injection for exercising error paths.

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use metlab_core::errors::BackendError;
use metlab_core::traits::{Filter, IObjectStore, IRecordStore, Query, Row, StoredObject};

/// Operation names used for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Select,
    Insert,
    Update,
    Upsert,
    Delete,
    List,
    Put,
    Remove,
}

impl StoreOp {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Upsert => "upsert",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Put => "put",
            Self::Remove => "remove",
        }
    }
}

#[derive(Debug, Default)]
struct Failures(DashMap<(String, StoreOp), String>);

impl Failures {
    fn check(&self, target: &str, op: StoreOp) -> Result<(), BackendError> {
        match self.0.get(&(target.to_string(), op)) {
            Some(message) => Err(BackendError::Rejected {
                operation: op.as_str().to_string(),
                target: target.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Tables of JSON rows. Inserted rows without an `id` get a fresh UUID.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: DashMap<String, Vec<Row>>,
    failures: Failures,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `op` on `table` fail with `message` until cleared.
    pub fn fail(&self, table: &str, op: StoreOp, message: impl Into<String>) {
        self.failures.0.insert((table.to_string(), op), message.into());
    }

    pub fn clear_failure(&self, table: &str, op: StoreOp) {
        self.failures.0.remove(&(table.to_string(), op));
    }

    /// Snapshot of a table's rows in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.get(table).map(|t| t.clone()).unwrap_or_default()
    }

    fn insert_row(&self, table: &str, row: &Row) -> Row {
        let mut stored = row.clone();
        if !stored.get("id").is_some_and(|v| !v.is_null()) {
            stored.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        self.tables.entry(table.to_string()).or_default().push(stored.clone());
        stored
    }
}

impl IRecordStore for InMemoryRecordStore {
    fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, BackendError> {
        self.failures.check(table, StoreOp::Select)?;
        let mut rows: Vec<Row> = self
            .rows(table)
            .into_iter()
            .filter(|row| query.matches(row))
            .collect();

        if let Some((column, ascending)) = &query.order {
            rows.sort_by(|a, b| {
                let ord = sort_key(a.get(column)).cmp(&sort_key(b.get(column)));
                if *ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        if let Some(columns) = query.columns.as_deref().filter(|c| c.trim() != "*") {
            let wanted: Vec<&str> = columns.split(',').map(str::trim).collect();
            for row in &mut rows {
                row.retain(|k, _| wanted.contains(&k.as_str()));
            }
        }
        Ok(rows)
    }

    fn insert(&self, table: &str, row: &Row) -> Result<Row, BackendError> {
        self.failures.check(table, StoreOp::Insert)?;
        Ok(self.insert_row(table, row))
    }

    fn update(&self, table: &str, filters: &[Filter], patch: &Row) -> Result<Vec<Row>, BackendError> {
        self.failures.check(table, StoreOp::Update)?;
        let mut updated = Vec::new();
        if let Some(mut rows) = self.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| filters.iter().all(|f| f.matches(r))) {
                for (k, v) in patch {
                    row.insert(k.clone(), v.clone());
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    fn upsert(&self, table: &str, row: &Row, on_conflict: &str) -> Result<Row, BackendError> {
        self.failures.check(table, StoreOp::Upsert)?;
        if let Some(key) = row.get(on_conflict) {
            if let Some(mut rows) = self.tables.get_mut(table) {
                if let Some(existing) = rows.iter_mut().find(|r| r.get(on_conflict) == Some(key)) {
                    for (k, v) in row {
                        existing.insert(k.clone(), v.clone());
                    }
                    return Ok(existing.clone());
                }
            }
        }
        Ok(self.insert_row(table, row))
    }

    fn delete(&self, table: &str, filters: &[Filter]) -> Result<usize, BackendError> {
        self.failures.check(table, StoreOp::Delete)?;
        let Some(mut rows) = self.tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| !filters.iter().all(|f| f.matches(r)));
        Ok(before - rows.len())
    }
}

/// Strings sort case-insensitively; numbers before strings; nulls last.
fn sort_key(value: Option<&Value>) -> (u8, String) {
    match value {
        Some(Value::Number(n)) => (0, format!("{:020.6}", n.as_f64().unwrap_or_default())),
        Some(Value::String(s)) => (1, s.to_lowercase()),
        Some(Value::Bool(b)) => (1, b.to_string()),
        _ => (2, String::new()),
    }
}

#[derive(Debug, Clone)]
struct StoredBlob {
    bytes: Vec<u8>,
    content_type: String,
}

/// Buckets of named objects with public URLs under `base_url`.
#[derive(Debug)]
pub struct InMemoryObjectStore {
    base_url: String,
    objects: DashMap<(String, String), StoredBlob>,
    failures: Failures,
}

impl InMemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: DashMap::new(),
            failures: Failures::default(),
        }
    }

    pub fn fail(&self, bucket: &str, op: StoreOp, message: impl Into<String>) {
        self.failures.0.insert((bucket.to_string(), op), message.into());
    }

    pub fn clear_failure(&self, bucket: &str, op: StoreOp) {
        self.failures.0.remove(&(bucket.to_string(), op));
    }

    /// Sorted object names in `bucket`.
    pub fn names(&self, bucket: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .objects
            .iter()
            .filter(|e| e.key().0 == bucket)
            .map(|e| e.key().1.clone())
            .collect();
        names.sort();
        names
    }

    pub fn get(&self, bucket: &str, path: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .get(&(bucket.to_string(), path.to_string()))
            .map(|b| (b.bytes.clone(), b.content_type.clone()))
    }
}

impl IObjectStore for InMemoryObjectStore {
    fn list(&self, bucket: &str, search: &str) -> Result<Vec<StoredObject>, BackendError> {
        self.failures.check(bucket, StoreOp::List)?;
        let mut found: Vec<StoredObject> = self
            .objects
            .iter()
            .filter(|e| e.key().0 == bucket && !e.key().1.contains('/') && e.key().1.contains(search))
            .map(|e| StoredObject {
                name: e.key().1.clone(),
                size: Some(e.value().bytes.len() as u64),
            })
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    fn put(&self, bucket: &str, path: &str, bytes: &[u8], content_type: &str) -> Result<(), BackendError> {
        self.failures.check(bucket, StoreOp::Put)?;
        let key = (bucket.to_string(), path.to_string());
        if self.objects.contains_key(&key) {
            return Err(BackendError::Rejected {
                operation: StoreOp::Put.as_str().to_string(),
                target: format!("{bucket}/{path}"),
                message: "The resource already exists".to_string(),
            });
        }
        self.objects.insert(
            key,
            StoredBlob {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError> {
        self.failures.check(bucket, StoreOp::Remove)?;
        for path in paths {
            self.objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }
}
