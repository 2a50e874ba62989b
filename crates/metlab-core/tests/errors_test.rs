use metlab_core::errors::*;

#[test]
fn error_codes_are_stable() {
    let err: MetlabError = BuilderError::MissingField { field: "budget" }.into();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    let err: MetlabError = CatalogError::BrochureNotPdf {
        content_type: "image/png".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "BROCHURE_REJECTED");

    let err: MetlabError = CatalogError::Backend(BackendError::Http {
        status: 500,
        message: "boom".to_string(),
    })
    .into();
    assert_eq!(err.error_code(), "BACKEND_ERROR");

    let err: MetlabError = SessionError::UnsupportedVersion {
        found: 9,
        supported: 2,
    }
    .into();
    assert_eq!(err.error_code(), "SESSION_ERROR");
}

#[test]
fn generation_failure_hides_detail_from_user() {
    let err = BuilderError::GenerationFailed {
        detail: "index out of bounds".to_string(),
    };
    assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
    assert!(!err.to_string().contains("index"));
    assert_eq!(
        err.coded_string(),
        format!("[GENERATION_FAILED] {GENERATION_FAILED_MESSAGE}")
    );
}

#[test]
fn side_table_failure_names_the_table() {
    let err = CatalogError::SideRecordCreate {
        table: "equipment_mounting".to_string(),
        reason: "null value in column".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Failed to create equipment_mounting: null value in column"
    );
}
