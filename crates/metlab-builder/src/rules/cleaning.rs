use metlab_core::models::{CleaningMethod, Frequency, Recommendation, Stage};

use super::{RuleContext, StageRules};

pub struct CleaningRules;

const STAGE: Stage = Stage::Cleaning;

impl StageRules for CleaningRules {
    fn stage(&self) -> Stage {
        STAGE
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let refinements = &ctx.intake.refinements;
        let method = refinements.cleaning_method_preference.unwrap_or_default();
        let mut out = Vec::new();

        if method != CleaningMethod::Manual {
            let reasoning = if refinements.cleaning_frequency == Some(Frequency::HighFrequency) {
                "Essential for removing polishing residues and contaminants. Ensures clean samples for accurate microstructural analysis. A larger tank handles batches for high-frequency cleaning."
            } else {
                "Essential for removing polishing residues and contaminants. Ensures clean samples for accurate microstructural analysis."
            };
            out.push(Recommendation::equipment(STAGE, "Ultrasonic Cleaner", reasoning));
        }

        out.push(Recommendation::equipment(
            STAGE,
            "Drying Oven",
            "Critical for drying samples after cleaning to prevent water spots and contamination. Essential for high-quality surface preparation, especially for microscopy and photography.",
        ));
        out.push(Recommendation::consumable(
            STAGE,
            "Cleaning Solutions (alcohol / detergent)",
            if method == CleaningMethod::Manual {
                "Ethanol or isopropanol rinse with a mild detergent and cotton swabs removes residues without ultrasonic agitation."
            } else {
                "Ethanol or isopropanol rinse with a mild detergent removes polishing residues and prevents staining."
            },
        ));

        out
    }
}
