use metlab_core::models::{Frequency, HardnessTestType, Recommendation, Stage};

use super::{RuleContext, StageRules};

pub struct HardnessRules;

const STAGE: Stage = Stage::Hardness;

const DEFAULT_METHODS: &str = "Vickers/Rockwell";

impl StageRules for HardnessRules {
    fn stage(&self) -> Stage {
        STAGE
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let refinements = &ctx.intake.refinements;
        let methods: Vec<&str> = refinements
            .hardness_test_types
            .iter()
            .filter(|t| **t != HardnessTestType::Variable)
            .map(|t| t.label())
            .collect();
        let methods = if methods.is_empty() {
            DEFAULT_METHODS.to_string()
        } else {
            methods.join("/")
        };

        let automated = refinements.hardness_testing_frequency == Some(Frequency::HighFrequency);
        let (item, extra) = if automated {
            (
                format!("Automated Hardness Tester ({methods})"),
                " Automatic loading and measurement keep high-frequency testing consistent.",
            )
        } else {
            (format!("Hardness Tester ({methods})"), "")
        };

        vec![
            Recommendation::equipment(
                STAGE,
                item,
                format!(
                    "Appropriate hardness testing system for {}. Vickers for precision, Rockwell for production testing.{extra}",
                    ctx.material_or("your materials"),
                ),
            ),
            Recommendation::consumable(
                STAGE,
                "Certified Hardness Test Blocks",
                format!("Reference blocks for daily verification of {methods} scales."),
            ),
        ]
    }
}
