use std::sync::Arc;

use metlab_catalog::{object_path_from_url, BrochureService, BrochureUpload, InMemoryObjectStore, StoreOp};
use metlab_core::constants::{BROCHURE_BUCKET, MAX_BROCHURE_BYTES};
use metlab_core::errors::CatalogError;
use test_fixtures::tiny_pdf;

const BASE: &str = "https://lab.example.co";

fn service() -> (Arc<InMemoryObjectStore>, BrochureService) {
    let store = Arc::new(InMemoryObjectStore::new(BASE));
    (store.clone(), BrochureService::new(store))
}

fn upload(item_id: Option<&str>, slug: Option<&str>) -> BrochureUpload {
    BrochureUpload {
        item_id: item_id.map(str::to_string),
        slug: slug.map(str::to_string),
        content_type: "application/pdf".into(),
        bytes: tiny_pdf(),
    }
}

#[test]
fn upload_stores_under_lowercased_item_id() {
    let (store, svc) = service();
    let url = svc.upload(&upload(Some("MEGA-T300"), Some("ignored"))).unwrap();

    assert_eq!(url, format!("{BASE}/storage/v1/object/public/brochures/mega-t300.pdf"));
    let (bytes, content_type) = store.get(BROCHURE_BUCKET, "mega-t300.pdf").unwrap();
    assert_eq!(bytes, tiny_pdf());
    assert_eq!(content_type, "application/pdf");
}

#[test]
fn upload_falls_back_to_slug_then_unknown() {
    let (store, svc) = service();
    svc.upload(&upload(None, Some("nano-polisher"))).unwrap();
    svc.upload(&upload(Some("  "), None)).unwrap();
    assert_eq!(store.names(BROCHURE_BUCKET), ["nano-polisher.pdf", "unknown.pdf"]);
}

#[test]
fn reupload_replaces_previous_file() {
    let (store, svc) = service();
    svc.upload(&upload(Some("ABC-1"), None)).unwrap();

    let mut newer = upload(Some("abc-1"), None);
    newer.bytes.extend_from_slice(b"% revised\n");
    svc.upload(&newer).unwrap();

    assert_eq!(store.names(BROCHURE_BUCKET), ["abc-1.pdf"]);
    let (bytes, _) = store.get(BROCHURE_BUCKET, "abc-1.pdf").unwrap();
    assert!(bytes.ends_with(b"% revised\n"));
}

#[test]
fn stem_collapses_separators_like_the_slug() {
    assert_eq!(upload(Some("PACE_X  1"), None).object_name(), "pace-x-1.pdf");
    assert_eq!(upload(Some("--Ø 40/B--"), None).stem(), "40-b");
}

#[test]
fn reupload_leaves_products_sharing_a_prefix_alone() {
    let (store, svc) = service();
    svc.upload(&upload(Some("MEGA-T300A"), None)).unwrap();
    svc.upload(&upload(Some("MEGA-T300"), None)).unwrap();
    svc.upload(&upload(Some("MEGA-T300"), None)).unwrap();
    assert_eq!(store.names(BROCHURE_BUCKET), ["mega-t300.pdf", "mega-t300a.pdf"]);
}

#[test]
fn non_pdf_is_rejected_before_storage_is_touched() {
    let (store, svc) = service();
    for op in [StoreOp::List, StoreOp::Put, StoreOp::Remove] {
        store.fail(BROCHURE_BUCKET, op, "must not be called");
    }
    let mut file = upload(Some("X1"), None);
    file.content_type = "image/png".into();

    let err = svc.upload(&file).unwrap_err();
    assert_eq!(
        err,
        CatalogError::BrochureNotPdf {
            content_type: "image/png".into()
        }
    );
}

#[test]
fn oversized_file_is_rejected_before_storage_is_touched() {
    let (store, svc) = service();
    store.fail(BROCHURE_BUCKET, StoreOp::List, "must not be called");
    let mut file = upload(Some("X1"), None);
    file.bytes = vec![0; MAX_BROCHURE_BYTES as usize + 1];

    let err = svc.upload(&file).unwrap_err();
    assert_eq!(
        err,
        CatalogError::BrochureTooLarge {
            size: MAX_BROCHURE_BYTES + 1,
            limit: MAX_BROCHURE_BYTES
        }
    );
}

#[test]
fn file_at_the_limit_is_accepted() {
    let file = BrochureUpload {
        item_id: Some("big".into()),
        slug: None,
        content_type: "application/pdf; charset=binary".into(),
        bytes: vec![0; MAX_BROCHURE_BYTES as usize],
    };
    assert!(file.validate().is_ok());
}

#[test]
fn storage_failure_surfaces_as_backend_error() {
    let (store, svc) = service();
    store.fail(BROCHURE_BUCKET, StoreOp::Put, "quota exceeded");
    let err = svc.upload(&upload(Some("Q1"), None)).unwrap_err();
    assert!(matches!(err, CatalogError::Backend(_)));
    assert!(err.to_string().contains("quota exceeded"));
}

#[test]
fn delete_by_url_removes_object() {
    let (store, svc) = service();
    let url = svc.upload(&upload(Some("DEL-9"), None)).unwrap();
    svc.delete_by_url(&url).unwrap();
    assert!(store.names(BROCHURE_BUCKET).is_empty());
}

#[test]
fn object_path_handles_nesting_encoding_and_query() {
    let path = object_path_from_url(
        "https://x.supabase.co/storage/v1/object/public/brochures/2024/My%20Saw.pdf?t=123#top",
        "brochures",
    )
    .unwrap();
    assert_eq!(path, "2024/My Saw.pdf");
}

#[test]
fn object_path_rejects_foreign_urls() {
    for url in [
        "not a url",
        "https://x.supabase.co/storage/v1/object/public/images/a.pdf",
        "https://x.supabase.co/storage/v1/object/public/brochures/",
        "https://x.supabase.co",
    ] {
        let err = object_path_from_url(url, "brochures").unwrap_err();
        assert_eq!(err, CatalogError::InvalidBrochureUrl { url: url.into() });
    }
}
