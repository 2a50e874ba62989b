//! [`IObjectStore`] over the hosted bucket storage API
//! (`/storage/v1/object/...`).

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use metlab_core::config::BackendConfig;
use metlab_core::errors::BackendError;
use metlab_core::traits::{IObjectStore, StoredObject};

use super::http_client::{HttpClient, HttpClientConfig};
use super::request::{encode_object_path, Endpoint, HttpMethod, RequestSpec};

const LIST_LIMIT: u32 = 100;

pub struct StorageStore {
    endpoint: Endpoint,
    client: HttpClient,
}

#[derive(Deserialize)]
struct ListedObject {
    name: String,
    #[serde(default)]
    metadata: Option<ObjectMetadata>,
}

#[derive(Deserialize)]
struct ObjectMetadata {
    #[serde(default)]
    size: Option<u64>,
}

impl StorageStore {
    pub fn new(endpoint: Endpoint, client: HttpClient) -> Self {
        Self { endpoint, client }
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Ok(Self::new(
            Endpoint::from_config(config)?,
            HttpClient::new(HttpClientConfig::from_backend(config)),
        ))
    }

    pub fn list_request(&self, bucket: &str, search: &str) -> RequestSpec {
        self.endpoint
            .request(HttpMethod::Post, &format!("/storage/v1/object/list/{bucket}"))
            .json(json!({
                "prefix": "",
                "search": search,
                "limit": LIST_LIMIT,
                "offset": 0,
            }))
    }

    pub fn put_request(&self, bucket: &str, path: &str, bytes: &[u8], content_type: &str) -> RequestSpec {
        self.endpoint
            .request(
                HttpMethod::Post,
                &format!("/storage/v1/object/{bucket}/{}", encode_object_path(path)),
            )
            .header("x-upsert", "false")
            .header("cache-control", "max-age=3600")
            .bytes(bytes.to_vec(), content_type)
    }

    pub fn remove_request(&self, bucket: &str, paths: &[String]) -> RequestSpec {
        self.endpoint
            .request(HttpMethod::Delete, &format!("/storage/v1/object/{bucket}"))
            .json(json!({ "prefixes": paths }))
    }
}

impl IObjectStore for StorageStore {
    fn list(&self, bucket: &str, search: &str) -> Result<Vec<StoredObject>, BackendError> {
        let response = self.client.execute(&self.list_request(bucket, search))?;
        let listed: Vec<ListedObject> = response.json()?;
        Ok(listed
            .into_iter()
            .map(|o| StoredObject {
                name: o.name,
                size: o.metadata.and_then(|m| m.size),
            })
            .collect())
    }

    fn put(&self, bucket: &str, path: &str, bytes: &[u8], content_type: &str) -> Result<(), BackendError> {
        debug!(bucket, path, size = bytes.len(), "storage upload");
        self.client
            .execute(&self.put_request(bucket, path, bytes, content_type))
            .map(|_| ())
    }

    fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError> {
        if paths.is_empty() {
            return Ok(());
        }
        self.client.execute(&self.remove_request(bucket, paths)).map(|_| ())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{}",
            self.endpoint.base_url,
            encode_object_path(path)
        )
    }
}
