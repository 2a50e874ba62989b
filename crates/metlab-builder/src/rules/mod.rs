//! Per-stage rule tables. Within a stage the first matching branch wins and
//! items are emitted in table order.

mod cleaning;
mod etching;
mod final_polishing;
mod grinding;
mod hardness;
mod microscopy;
mod mounting;
mod polishing;
mod sectioning;

use metlab_core::models::{IntakeAttributes, Recommendation, Stage};

use crate::profile::SampleProfile;

pub use cleaning::CleaningRules;
pub use etching::{EtchantLinks, EtchingRules};
pub use final_polishing::FinalPolishingRules;
pub use grinding::GrindingRules;
pub use hardness::HardnessRules;
pub use microscopy::MicroscopyRules;
pub use mounting::MountingRules;
pub use polishing::PolishingRules;
pub use sectioning::SectioningRules;

/// Inputs visible to a rule table.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub intake: &'a IntakeAttributes,
    pub profile: SampleProfile,
    pub links: &'a EtchantLinks,
}

impl<'a> RuleContext<'a> {
    pub fn new(intake: &'a IntakeAttributes, links: &'a EtchantLinks) -> Self {
        Self {
            intake,
            profile: SampleProfile::derive(intake),
            links,
        }
    }

    /// Material type as typed, or `fallback` when blank.
    pub fn material_or<'b>(&'b self, fallback: &'b str) -> &'b str {
        let material = self.intake.material_type.trim();
        if material.is_empty() {
            fallback
        } else {
            material
        }
    }

    /// Lower-cased sample size label for use mid-sentence.
    pub fn sample_size_phrase(&self) -> String {
        self.intake
            .sample_size
            .map(|s| s.label().to_lowercase())
            .unwrap_or_else(|| "your".to_string())
    }
}

/// One stage's rule table.
pub trait StageRules: Send + Sync {
    /// Stage the produced recommendations belong to.
    fn stage(&self) -> Stage;

    /// Selected stage that activates this table. Final polishing rides on
    /// polishing.
    fn triggered_by(&self) -> Stage {
        self.stage()
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation>;
}

/// All rule tables in canonical stage order.
pub fn standard_rules() -> Vec<Box<dyn StageRules>> {
    vec![
        Box::new(SectioningRules),
        Box::new(MountingRules),
        Box::new(GrindingRules),
        Box::new(PolishingRules),
        Box::new(FinalPolishingRules),
        Box::new(EtchingRules),
        Box::new(MicroscopyRules),
        Box::new(CleaningRules),
        Box::new(HardnessRules),
    ]
}
