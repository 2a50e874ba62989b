use crate::errors::BackendError;

/// An entry returned by a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredObject {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Bucket-based object storage.
pub trait IObjectStore: Send + Sync {
    /// Top-level objects of `bucket` whose names contain `search`.
    fn list(&self, bucket: &str, search: &str) -> Result<Vec<StoredObject>, BackendError>;

    /// Stores a new object. Fails if `path` already exists.
    fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), BackendError>;

    fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError>;

    /// Publicly reachable URL of an object. Does not check existence.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
