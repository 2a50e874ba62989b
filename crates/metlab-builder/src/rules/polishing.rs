use metlab_core::models::{Application, Recommendation, Stage};

use super::{RuleContext, StageRules};

pub struct PolishingRules;

const STAGE: Stage = Stage::Polishing;

pub(crate) const SOFT_DIAMOND_SEQUENCE: [&str; 5] = ["6", "3", "1", "0.5", "0.25"];
pub(crate) const STANDARD_DIAMOND_SEQUENCE: [&str; 6] = ["9", "6", "3", "1", "0.5", "0.25"];

impl StageRules for PolishingRules {
    fn stage(&self) -> Stage {
        STAGE
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let p = &ctx.profile;
        let platen = p.platen_size();
        let control = p.machine_control();
        let control_sentence = p.control_sentence("polishing");
        let mut out = Vec::new();

        let dual_wheel = p.high_throughput || ctx.intake.has_application(Application::ProductionTesting);
        if dual_wheel {
            out.push(Recommendation::equipment(
                STAGE,
                format!("Dual Wheel {platen} {control} Grinder/Polisher"),
                format!(
                    "Dual wheel configuration allows dedicated wheels for grinding and polishing, preventing cross-contamination and improving throughput. {control_sentence} Essential for high-volume production and quality control where sample-to-sample contamination must be avoided."
                ),
            ));
        } else {
            out.push(Recommendation::equipment(
                STAGE,
                format!("{platen} {control} Grinder/Polisher"),
                format!(
                    "Can handle both grinding and polishing operations with polishing suspension. {control_sentence}"
                ),
            ));
        }

        let sequence = diamond_sequence(ctx);
        let coarse = sequence
            .iter()
            .find(|s| s.parse::<f64>().is_ok_and(|v| v >= 3.0))
            .map(String::as_str)
            .unwrap_or("3");

        out.push(Recommendation::consumable(
            STAGE,
            format!("Diamond Polishing Suspensions ({coarse} µm to 0.25 µm)"),
            format!(
                "Diamond suspensions for progressive polishing steps: {} µm. Essential for removing grinding scratches and achieving high-quality surface finish.",
                sequence.join(", ")
            ),
        ));
        out.push(Recommendation::consumable(
            STAGE,
            "Polishing Cloths (synthetic)",
            "Synthetic polishing cloths for diamond polishing stages. Provides consistent surface for diamond suspension application.",
        ));

        out
    }
}

fn diamond_sequence(ctx: &RuleContext<'_>) -> Vec<String> {
    if let Some(seq) = ctx
        .intake
        .selected_material
        .as_ref()
        .and_then(|m| m.polishing_sequence())
    {
        return seq.to_vec();
    }
    let defaults: &[&str] = if ctx.profile.soft {
        &SOFT_DIAMOND_SEQUENCE
    } else {
        &STANDARD_DIAMOND_SEQUENCE
    };
    defaults.iter().map(|s| s.to_string()).collect()
}
