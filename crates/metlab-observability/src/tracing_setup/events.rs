//! Structured log events for key operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

pub fn recommendations_generated(count: usize, stages: &[&str]) {
    tracing::info!(
        event = "recommendations_generated",
        count = count,
        stages = ?stages,
        "recommendations generated"
    );
}

pub fn review_composed(recipient: &str, items: usize) {
    tracing::info!(
        event = "review_composed",
        recipient = %recipient,
        items = items,
        "review request composed"
    );
}

pub fn pdf_exported(path: &str, pages: usize, bytes: usize) {
    tracing::info!(
        event = "pdf_exported",
        path = %path,
        pages = pages,
        bytes = bytes,
        "recommendations exported to PDF"
    );
}

pub fn equipment_changed(equipment_id: &str, action: &str) {
    tracing::info!(
        event = "equipment_changed",
        equipment_id = %equipment_id,
        action = %action,
        "equipment catalog changed"
    );
}

pub fn brochure_stored(url: &str, size: usize) {
    tracing::info!(
        event = "brochure_stored",
        url = %url,
        size = size,
        "brochure stored"
    );
}

/// A failure the caller recovered from.
pub fn degraded(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degraded",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "operation degraded"
    );
}
