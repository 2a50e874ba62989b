use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use metlab_core::config::BackendConfig;
use metlab_core::errors::BackendError;

/// Characters left as-is in query values. Filter syntax (`eq.`, `or=(..)`,
/// `*` wildcards) stays readable.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'*')
    .remove(b',')
    .remove(b'(')
    .remove(b')')
    .remove(b':');

/// Characters left as-is in one object-path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    None,
    Json(Value),
    Bytes { data: Vec<u8>, content_type: String },
}

/// A fully described HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    /// URL without query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn bytes(mut self, data: Vec<u8>, content_type: impl Into<String>) -> Self {
        self.body = RequestBody::Bytes {
            data,
            content_type: content_type.into(),
        };
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL with the encoded query string appended.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, QUERY_VALUE)))
            .collect();
        format!("{}?{}", self.url, query.join("&"))
    }
}

/// Where the backend lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub api_key: String,
    pub bearer_token: String,
}

impl Endpoint {
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = config
            .url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .ok_or_else(|| BackendError::NotConfigured {
                what: "backend url".to_string(),
            })?;
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| BackendError::NotConfigured {
                what: "api key".to_string(),
            })?;
        let bearer_token = config.bearer_token().unwrap_or(api_key).trim().to_string();
        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            bearer_token,
        })
    }

    /// Starts a request to `path` (leading slash) with auth headers set.
    pub fn request(&self, method: HttpMethod, path: &str) -> RequestSpec {
        RequestSpec::new(method, format!("{}{}", self.base_url, path))
            .header("apikey", self.api_key.clone())
            .header("Authorization", format!("Bearer {}", self.bearer_token))
    }
}

/// Percent-encodes each `/`-separated segment of an object path.
pub fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
