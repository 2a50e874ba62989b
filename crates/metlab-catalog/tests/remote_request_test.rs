use metlab_catalog::remote::postgrest::filter_param;
use metlab_catalog::remote::{
    Endpoint, HttpClient, HttpClientConfig, HttpMethod, HttpResponse, PostgrestStore, RequestBody, StorageStore,
};
use metlab_core::config::BackendConfig;
use metlab_core::errors::BackendError;
use metlab_core::traits::{Filter, IObjectStore, Query, Row};
use serde_json::json;

fn config() -> BackendConfig {
    BackendConfig {
        url: Some("https://proj.supabase.co/".into()),
        api_key: Some("anon-key".into()),
        access_token: Some("user-jwt".into()),
        ..Default::default()
    }
}

fn tables() -> PostgrestStore {
    PostgrestStore::from_config(&config()).unwrap()
}

fn storage() -> StorageStore {
    StorageStore::from_config(&config()).unwrap()
}

#[test]
fn endpoint_requires_url_and_key() {
    let err = Endpoint::from_config(&BackendConfig::default()).unwrap_err();
    assert!(matches!(err, BackendError::NotConfigured { .. }));

    let no_key = BackendConfig {
        url: Some("https://proj.supabase.co".into()),
        ..Default::default()
    };
    assert!(matches!(Endpoint::from_config(&no_key), Err(BackendError::NotConfigured { .. })));
}

#[test]
fn bearer_token_falls_back_to_api_key() {
    let cfg = BackendConfig {
        access_token: None,
        ..config()
    };
    let endpoint = Endpoint::from_config(&cfg).unwrap();
    assert_eq!(endpoint.base_url, "https://proj.supabase.co");
    assert_eq!(endpoint.bearer_token, "anon-key");
}

#[test]
fn select_request_carries_filters_order_and_auth() {
    let query = Query::new()
        .filter(Filter::eq("status", "active"))
        .filter(Filter::not_null("category"))
        .order_asc("name")
        .limit(20);
    let spec = tables().select_request("equipment", &query);

    assert_eq!(spec.method, HttpMethod::Get);
    assert_eq!(
        spec.full_url(),
        "https://proj.supabase.co/rest/v1/equipment?status=eq.active&category=not.is.null&select=*&order=name.asc&limit=20"
    );
    assert_eq!(spec.header_value("apikey"), Some("anon-key"));
    assert_eq!(spec.header_value("authorization"), Some("Bearer user-jwt"));
    assert_eq!(spec.body, RequestBody::None);
}

#[test]
fn or_filter_quotes_reserved_values() {
    let filter = Filter::Or(vec![
        Filter::eq("slug", "mega-t300"),
        Filter::ilike("item_id", "MEGA.T300"),
    ]);
    let (key, value) = filter_param(&filter);
    assert_eq!(key, "or");
    assert_eq!(value, r#"(slug.eq.mega-t300,item_id.ilike."MEGA.T300")"#);
}

#[test]
fn query_values_are_percent_encoded() {
    let spec = tables().select_request("equipment", &Query::new().filter(Filter::eq("name", "Saw & Co")));
    assert!(spec.full_url().contains("name=eq.Saw%20%26%20Co"));
}

#[test]
fn write_requests_ask_for_representation() {
    let mut row = Row::new();
    row.insert("equipment_id".into(), json!("abc"));
    row.insert("blade_size_inches".into(), json!(12));

    let insert = tables().insert_request("equipment_sectioning", &row);
    assert_eq!(insert.method, HttpMethod::Post);
    assert_eq!(insert.header_value("Prefer"), Some("return=representation"));
    assert_eq!(insert.body, RequestBody::Json(json!({"equipment_id": "abc", "blade_size_inches": 12})));

    let upsert = tables().upsert_request("equipment_sectioning", &row, "equipment_id");
    assert_eq!(
        upsert.full_url(),
        "https://proj.supabase.co/rest/v1/equipment_sectioning?on_conflict=equipment_id"
    );
    assert_eq!(
        upsert.header_value("prefer"),
        Some("resolution=merge-duplicates,return=representation")
    );

    let update = tables().update_request("equipment", &[Filter::eq("id", "abc")], &row);
    assert_eq!(update.method, HttpMethod::Patch);
    assert!(update.full_url().ends_with("/rest/v1/equipment?id=eq.abc"));

    let delete = tables().delete_request("equipment", &[Filter::eq("id", "abc")]);
    assert_eq!(delete.method, HttpMethod::Delete);
    assert_eq!(delete.body, RequestBody::None);
}

#[test]
fn storage_requests() {
    let store = storage();

    let list = store.list_request("brochures", "mega-t300");
    assert_eq!(list.url, "https://proj.supabase.co/storage/v1/object/list/brochures");
    assert_eq!(
        list.body,
        RequestBody::Json(json!({"prefix": "", "search": "mega-t300", "limit": 100, "offset": 0}))
    );

    let put = store.put_request("brochures", "dir/my saw.pdf", b"%PDF", "application/pdf");
    assert_eq!(put.url, "https://proj.supabase.co/storage/v1/object/brochures/dir/my%20saw.pdf");
    assert_eq!(put.header_value("x-upsert"), Some("false"));
    assert_eq!(
        put.body,
        RequestBody::Bytes {
            data: b"%PDF".to_vec(),
            content_type: "application/pdf".into()
        }
    );

    let remove = store.remove_request("brochures", &["a.pdf".to_string()]);
    assert_eq!(remove.method, HttpMethod::Delete);
    assert_eq!(remove.body, RequestBody::Json(json!({"prefixes": ["a.pdf"]})));

    assert_eq!(
        store.public_url("brochures", "a b.pdf"),
        "https://proj.supabase.co/storage/v1/object/public/brochures/a%20b.pdf"
    );
}

#[test]
fn error_responses_prefer_backend_message() {
    let resp = HttpResponse {
        status: 409,
        body: br#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#.to_vec(),
    };
    assert_eq!(
        resp.into_result().unwrap_err(),
        BackendError::Http {
            status: 409,
            message: "The resource already exists".into()
        }
    );

    let plain = HttpResponse {
        status: 500,
        body: b"upstream timeout".to_vec(),
    };
    assert!(matches!(plain.into_result(), Err(BackendError::Http { status: 500, ref message }) if message == "upstream timeout"));
}

#[test]
fn client_config_follows_backend_settings() {
    let cfg = BackendConfig {
        timeout_secs: Some(5),
        max_retries: Some(2),
        backoff_ms: Some(100),
        ..config()
    };
    let client = HttpClient::new(HttpClientConfig::from_backend(&cfg));
    assert_eq!(client.config().timeout.as_secs(), 5);
    assert_eq!(client.config().max_retries, 2);
    assert_eq!(client.config().initial_backoff.as_millis(), 100);
}

#[cfg(not(feature = "remote"))]
#[test]
fn transport_is_disabled_without_feature() {
    let err = storage().list("brochures", "x").unwrap_err();
    assert!(matches!(err, BackendError::NotConfigured { .. }));
}
