use metlab_core::models::{FinalSurfaceQuality, Recommendation, Stage};

use super::{RuleContext, StageRules};

pub struct FinalPolishingRules;

const STAGE: Stage = Stage::FinalPolishing;

impl StageRules for FinalPolishingRules {
    fn stage(&self) -> Stage {
        STAGE
    }

    fn triggered_by(&self) -> Stage {
        Stage::Polishing
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let p = &ctx.profile;
        let demanding_quality = matches!(
            ctx.intake.refinements.final_surface_quality,
            Some(FinalSurfaceQuality::EbsdReady | FinalSurfaceQuality::ResearchGrade)
        );

        if p.needs_ebsd || p.extremely_flat || p.high_quality_finish || demanding_quality {
            return vec![
                Recommendation::equipment(
                    STAGE,
                    "Vibratory Polisher",
                    "Essential for EBSD preparation and extremely flat surfaces. Produces deformation-free surfaces with minimal relief critical for electron backscatter diffraction. Uses vibration to polish samples without mechanical pressure.",
                ),
                Recommendation::consumable(
                    STAGE,
                    "Colloidal Silica Polishing Suspension (0.05 µm)",
                    "Final polishing step for extremely flat surfaces. Essential for EBSD and advanced characterization techniques requiring minimal surface relief and deformation-free surfaces.",
                ),
                Recommendation::consumable(
                    STAGE,
                    "Napped Polishing Cloth",
                    "Napped cloth essential for final colloidal silica polishing. Provides gentle polishing action for deformation-free surfaces.",
                ),
            ];
        }

        vec![
            Recommendation::consumable(
                STAGE,
                "Fine Diamond Suspension (0.25 µm) or Colloidal Silica (0.05 µm)",
                "Final polishing step for high-quality surface finish. Removes fine scratches from previous polishing steps and prepares surface for microstructural analysis.",
            ),
            Recommendation::consumable(
                STAGE,
                "Napped Polishing Cloth",
                "Napped cloth for final polishing steps. Provides appropriate surface for fine polishing suspensions.",
            ),
        ]
    }
}
