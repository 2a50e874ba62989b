use metlab_core::config::defaults::{DEFAULT_ETCHANT_DATABASE_PATH, DEFAULT_ETCHANT_SELECTOR_PATH};
use metlab_core::config::BuilderConfig;
use metlab_core::models::{Frequency, Recommendation, Stage};

use super::{RuleContext, StageRules};

pub struct EtchingRules;

const STAGE: Stage = Stage::Etching;

/// Site paths linked from etchant advice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtchantLinks {
    pub selector_path: String,
    pub database_path: String,
}

impl Default for EtchantLinks {
    fn default() -> Self {
        Self {
            selector_path: DEFAULT_ETCHANT_SELECTOR_PATH.to_string(),
            database_path: DEFAULT_ETCHANT_DATABASE_PATH.to_string(),
        }
    }
}

impl From<&BuilderConfig> for EtchantLinks {
    fn from(config: &BuilderConfig) -> Self {
        Self {
            selector_path: config.effective_etchant_selector_path().to_string(),
            database_path: config.effective_etchant_database_path().to_string(),
        }
    }
}

impl StageRules for EtchingRules {
    fn stage(&self) -> Stage {
        STAGE
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let refinements = &ctx.intake.refinements;
        let mut reasoning = format!(
            "Select etchants appropriate for {}. Common options include nital for carbon steels, Vilella's for stainless steel, and Kroll's for titanium. Use the [Etchant Selector tool]({}) to find the right etchant for your material, or browse the [Etchants Database]({}) for comprehensive information.",
            ctx.material_or("your material"),
            ctx.links.selector_path,
            ctx.links.database_path,
        );

        let selected: Vec<&str> = refinements
            .etchant_types
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .collect();
        if !selected.is_empty() {
            reasoning.push_str(&format!(" Selected etchant types: {}.", selected.join(", ")));
        }
        if refinements.etching_frequency == Some(Frequency::HighFrequency) {
            reasoning.push_str(" For high-frequency etching, keep fresh stock solutions and dedicated dishes for each etchant.");
        }

        vec![
            Recommendation::equipment(
                STAGE,
                "Fume Hood / Ventilation System",
                "SAFETY CRITICAL: Essential for safe handling of etchants. Protects operators from chemical fumes and ensures compliance with safety regulations. Required for all etching operations.",
            ),
            Recommendation::consumable(STAGE, "Etchants (material-specific)", reasoning),
        ]
    }
}
