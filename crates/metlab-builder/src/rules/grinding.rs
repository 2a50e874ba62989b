use metlab_core::models::{Recommendation, Stage};

use super::{RuleContext, StageRules};

pub struct GrindingRules;

const STAGE: Stage = Stage::Grinding;

/// Soft materials start finer to limit embedding and deformation.
pub(crate) const SOFT_GRIT_SEQUENCE: [&str; 4] = ["240", "320", "400", "600"];
pub(crate) const STANDARD_GRIT_SEQUENCE: [&str; 7] = ["120", "240", "320", "400", "600", "800", "1200"];

impl StageRules for GrindingRules {
    fn stage(&self) -> Stage {
        STAGE
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let p = &ctx.profile;
        let mut out = Vec::new();

        if p.large {
            out.push(Recommendation::equipment(
                STAGE,
                "Belt Grinder / Hand Grinder",
                format!(
                    "Essential for initial rough grinding of {} samples. Provides fastest material removal before fine grinding with papers. Critical for large samples requiring significant material removal.",
                    ctx.sample_size_phrase()
                ),
            ));
        }

        out.push(Recommendation::equipment(
            STAGE,
            format!("{} {} Grinder/Polisher", p.platen_size(), p.machine_control()),
            format!(
                "Appropriate platen size for {} samples. {}",
                ctx.sample_size_phrase(),
                p.control_sentence("grinding")
            ),
        ));

        let sequence = grit_sequence(ctx);
        let grits = sequence.join(", ");
        let has_fine = sequence.iter().any(|g| g == "800" || g == "1200");

        if p.hard_material || p.very_hard {
            let mut reasoning = format!(
                "SiC provides aggressive cutting action essential for hard materials. Follow progressive sequence: {grits} grit."
            );
            if has_fine {
                reasoning.push_str(" Fine grits (800, 1200) recommended for best surface quality before polishing.");
            }
            out.push(Recommendation::consumable(
                STAGE,
                format!("Silicon Carbide Grinding Papers ({grits} grit)"),
                reasoning,
            ));
        } else if p.soft {
            out.push(Recommendation::consumable(
                STAGE,
                format!("Aluminum Oxide or Fine SiC Grinding Papers ({grits} grit)"),
                format!(
                    "Finer abrasives (starting at 240 grit) with light pressure minimize embedding and relief in soft materials. Follow sequence: {grits} grit. Essential for preserving true microstructure."
                ),
            ));
        } else {
            let tail = if has_fine {
                "Fine grits (800, 1200) recommended for optimal surface preparation before polishing."
            } else {
                "Follow progressive grinding steps for optimal surface preparation."
            };
            out.push(Recommendation::consumable(
                STAGE,
                format!("Grinding Papers ({grits} grit)"),
                format!("Standard grinding papers in progressive grit sizes: {grits}. {tail}"),
            ));
        }

        out
    }
}

/// Material profile sequence when one is selected, otherwise by hardness.
fn grit_sequence(ctx: &RuleContext<'_>) -> Vec<String> {
    if let Some(seq) = ctx
        .intake
        .selected_material
        .as_ref()
        .and_then(|m| m.grinding_sequence())
    {
        return seq.to_vec();
    }
    let defaults: &[&str] = if ctx.profile.soft {
        &SOFT_GRIT_SEQUENCE
    } else {
        &STANDARD_GRIT_SEQUENCE
    };
    defaults.iter().map(|g| g.to_string()).collect()
}
