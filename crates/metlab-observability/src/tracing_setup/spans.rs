//! Span definitions per operation: recommend, catalog, export.

/// Span around one recommendation run.
#[macro_export]
macro_rules! recommend_span {
    ($stage_count:expr) => {
        tracing::info_span!("metlab.recommend", stage_count = $stage_count)
    };
}

/// Span around a catalog operation on one record or key.
#[macro_export]
macro_rules! catalog_span {
    ($operation:expr, $key:expr) => {
        tracing::info_span!("metlab.catalog", operation = %$operation, key = %$key)
    };
}

/// Span around an export in one format.
#[macro_export]
macro_rules! export_span {
    ($format:expr) => {
        tracing::info_span!("metlab.export", format = %$format)
    };
}

pub mod names {
    pub const RECOMMEND: &str = "metlab.recommend";
    pub const CATALOG: &str = "metlab.catalog";
    pub const EXPORT: &str = "metlab.export";
}
