//! Hosted backend access: a PostgREST-style table API and a bucket storage
//! API behind the store traits.
//!
//! Request construction is plain data ([`RequestSpec`]) so it can be checked
//! without a network. Sending needs the `remote` feature.

pub mod http_client;
pub mod postgrest;
pub mod request;
pub mod storage;

pub use http_client::{HttpClient, HttpClientConfig, HttpResponse};
pub use postgrest::PostgrestStore;
pub use request::{Endpoint, HttpMethod, RequestBody, RequestSpec};
pub use storage::StorageStore;
