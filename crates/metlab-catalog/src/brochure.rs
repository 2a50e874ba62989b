//! Brochure PDFs in object storage: one `{item-id}.pdf` per product,
//! replaced on re-upload.

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use tracing::{debug, info};

use metlab_core::constants::{BROCHURE_BUCKET, BROCHURE_CONTENT_TYPE, MAX_BROCHURE_BYTES};
use metlab_core::errors::CatalogError;
use metlab_core::traits::IObjectStore;

use crate::form::slugify;

/// A file chosen for upload.
#[derive(Debug, Clone)]
pub struct BrochureUpload {
    pub item_id: Option<String>,
    pub slug: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl BrochureUpload {
    /// Checks type and size. Runs before any storage call.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let content_type = self.content_type.trim();
        let base_type = content_type.split(';').next().unwrap_or_default().trim();
        if !base_type.eq_ignore_ascii_case(BROCHURE_CONTENT_TYPE) {
            return Err(CatalogError::BrochureNotPdf {
                content_type: content_type.to_string(),
            });
        }
        let size = self.bytes.len() as u64;
        if size > MAX_BROCHURE_BYTES {
            return Err(CatalogError::BrochureTooLarge {
                size,
                limit: MAX_BROCHURE_BYTES,
            });
        }
        Ok(())
    }

    /// Object name stem: the slugified item id, else the slugified slug.
    pub fn stem(&self) -> String {
        let source = self
            .item_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.slug.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or_default();
        let stem = slugify(source);
        if stem.is_empty() {
            "unknown".to_string()
        } else {
            stem
        }
    }

    pub fn object_name(&self) -> String {
        format!("{}.pdf", self.stem())
    }
}

pub struct BrochureService {
    store: Arc<dyn IObjectStore>,
    bucket: String,
}

impl BrochureService {
    pub fn new(store: Arc<dyn IObjectStore>) -> Self {
        Self::with_bucket(store, BROCHURE_BUCKET)
    }

    pub fn with_bucket(store: Arc<dyn IObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Validates, removes any earlier brochure for the same product, stores
    /// the file and returns its public URL.
    pub fn upload(&self, upload: &BrochureUpload) -> Result<String, CatalogError> {
        upload.validate()?;
        let path = upload.object_name();

        // The listing search is a prefix match; only this product's own file is stale.
        let stale: Vec<String> = self
            .store
            .list(&self.bucket, &upload.stem())?
            .into_iter()
            .map(|o| o.name)
            .filter(|name| *name == path)
            .collect();
        if !stale.is_empty() {
            debug!(bucket = %self.bucket, count = stale.len(), "removing previous brochures");
            self.store.remove(&self.bucket, &stale)?;
        }

        self.store
            .put(&self.bucket, &path, &upload.bytes, BROCHURE_CONTENT_TYPE)?;
        let url = self.store.public_url(&self.bucket, &path);
        info!(bucket = %self.bucket, %path, size = upload.bytes.len(), "brochure uploaded");
        Ok(url)
    }

    /// Deletes the object a public URL points at.
    pub fn delete_by_url(&self, url: &str) -> Result<(), CatalogError> {
        let path = object_path_from_url(url, &self.bucket)?;
        self.store.remove(&self.bucket, &[path.clone()])?;
        info!(bucket = %self.bucket, %path, "brochure deleted");
        Ok(())
    }
}

/// Object path inside `bucket` for a public storage URL: everything after
/// the bucket segment, percent-decoded, without query or fragment.
pub fn object_path_from_url(url: &str, bucket: &str) -> Result<String, CatalogError> {
    let invalid = || CatalogError::InvalidBrochureUrl { url: url.to_string() };

    let trimmed = url.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .ok_or_else(invalid)?;
    let path = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let (_, path) = path.split_once('/').ok_or_else(invalid)?;

    let segments: Vec<&str> = path.split('/').collect();
    let idx = segments.iter().position(|s| *s == bucket).ok_or_else(invalid)?;
    let rest = &segments[idx + 1..];
    if rest.is_empty() || rest.iter().any(|s| s.is_empty()) {
        return Err(invalid());
    }
    let joined = rest.join("/");
    let decoded = percent_decode_str(&joined)
        .decode_utf8()
        .map_err(|_| invalid())?
        .into_owned();
    Ok(decoded)
}
