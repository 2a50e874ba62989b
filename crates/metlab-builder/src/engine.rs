//! Recommendation generation over the per-stage rule tables.

use std::panic::{self, AssertUnwindSafe};

use metlab_core::config::BuilderConfig;
use metlab_core::errors::BuilderError;
use metlab_core::models::{IntakeAttributes, Recommendation, Stage};
use tracing::{debug, error, info};

use crate::defaults::fallback_for;
use crate::rules::{standard_rules, EtchantLinks, RuleContext, StageRules};

/// Stateless generator: identical intake always yields identical output.
pub struct RecommendationEngine {
    rules: Vec<Box<dyn StageRules>>,
    links: EtchantLinks,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::with_links(EtchantLinks::default())
    }

    pub fn from_config(config: &BuilderConfig) -> Self {
        Self::with_links(EtchantLinks::from(config))
    }

    pub fn with_links(links: EtchantLinks) -> Self {
        Self {
            rules: standard_rules(),
            links,
        }
    }

    /// Produces recommendations for every selected stage, in canonical stage
    /// order. Never fails; absent optional fields take their defaults.
    pub fn generate(&self, intake: &IntakeAttributes) -> Vec<Recommendation> {
        let ctx = RuleContext::new(intake, &self.links);
        let mut out = Vec::new();

        for rule in &self.rules {
            if !selects(intake, rule.triggered_by()) {
                continue;
            }
            let mut produced = rule.apply(&ctx);
            if produced.is_empty() {
                debug!(stage = %rule.stage(), "rule table produced nothing, using stage default");
                produced.push(fallback_for(rule.stage()));
            }
            out.extend(produced);
        }

        info!(
            stages = intake.process_stages.len(),
            recommendations = out.len(),
            "recommendations generated"
        );
        out
    }

    /// Checks the required fields, then generates. Any internal failure
    /// surfaces as [`BuilderError::GenerationFailed`] instead of unwinding
    /// into the caller.
    pub fn try_generate(&self, intake: &IntakeAttributes) -> Result<Vec<Recommendation>, BuilderError> {
        validate_required(intake)?;

        panic::catch_unwind(AssertUnwindSafe(|| self.generate(intake))).map_err(|payload| {
            let detail = panic_detail(payload.as_ref());
            error!(%detail, "recommendation generation failed");
            BuilderError::GenerationFailed { detail }
        })
    }

    /// Stages that will appear in the output for this intake.
    pub fn emitted_stages(&self, intake: &IntakeAttributes) -> Vec<Stage> {
        self.rules
            .iter()
            .filter(|r| selects(intake, r.triggered_by()))
            .map(|r| r.stage())
            .collect()
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates with the default links.
pub fn generate(intake: &IntakeAttributes) -> Vec<Recommendation> {
    RecommendationEngine::new().generate(intake)
}

/// Validates and generates with the default links.
pub fn try_generate(intake: &IntakeAttributes) -> Result<Vec<Recommendation>, BuilderError> {
    RecommendationEngine::new().try_generate(intake)
}

/// First missing required field, as an error.
pub fn validate_required(intake: &IntakeAttributes) -> Result<(), BuilderError> {
    match intake.missing_required().first() {
        None => Ok(()),
        Some(&"processStages") => Err(BuilderError::NoStagesSelected),
        Some(field) => Err(BuilderError::MissingField { field: *field }),
    }
}

/// A selected final-polishing stage implies polishing, since its rule table
/// only runs alongside the polishing one.
fn selects(intake: &IntakeAttributes, stage: Stage) -> bool {
    intake.has_stage(stage) || (stage == Stage::Polishing && intake.has_stage(Stage::FinalPolishing))
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
