use std::io::Write;
use std::path::Path;

use anyhow::Result;

use metlab_builder::RecommendationEngine;
use metlab_core::config::MetlabConfig;
use metlab_export::{compose_review, ReviewRequest};
use metlab_observability::tracing_setup::events;

use super::load_intake;

/// Regenerates recommendations for the intake so the mail always matches
/// what the user was shown.
pub fn run(
    config: &MetlabConfig,
    intake_path: &Path,
    request: &ReviewRequest,
    mailto: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let intake = load_intake(intake_path)?;
    let recommendations = RecommendationEngine::from_config(&config.builder).generate(&intake);
    let mail = compose_review(request, &intake, &recommendations, &config.export)?;
    events::review_composed(&mail.recipient, recommendations.len());

    if mailto {
        writeln!(out, "{}", mail.mailto_url())?;
    } else {
        writeln!(out, "To: {}", mail.recipient)?;
        writeln!(out, "Subject: {}", mail.subject)?;
        writeln!(out)?;
        out.write_all(mail.body.as_bytes())?;
    }
    Ok(())
}
