use metlab_core::models::{MountSize, MountingPreference, Recommendation, Stage};

use super::{RuleContext, StageRules};

pub struct MountingRules;

const STAGE: Stage = Stage::Mounting;

const EPOXY: &str = "Epoxy Mounting Resins";
const THERMOSET: &str = "Thermosetting Mounting Resins";

impl StageRules for MountingRules {
    fn stage(&self) -> Stage {
        STAGE
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let p = &ctx.profile;
        let preference = ctx.intake.refinements.mounting_type_preference.unwrap_or_default();
        let mount_size = ctx.intake.effective_mount_size();
        let size_note = mount_size_note(mount_size);

        let cold = p.soft || p.delicate || p.heat_sensitive || preference == MountingPreference::Castable;
        let mut out = Vec::new();

        if cold {
            if p.high_throughput {
                out.push(Recommendation::equipment(
                    STAGE,
                    "UV Curing Mounting System",
                    "Fastest cold mounting cycles for high-volume work. Essential for temperature-sensitive materials where compression mounting heat would alter microstructure.",
                ));
            } else {
                out.push(Recommendation::equipment(
                    STAGE,
                    "Vacuum Impregnation System",
                    "Removes air bubbles for clear mounts without heat application. Essential for soft metals and heat-sensitive materials. Prevents thermal damage that could mask true microstructure.",
                ));
            }
            out.push(Recommendation::consumable(
                STAGE,
                EPOXY,
                format!(
                    "High-quality epoxy resins for cold mounting. Excellent edge retention and chemical resistance essential for microstructure preservation. {size_note}"
                ),
            ));
        } else {
            let press = if p.automated { "Automated" } else { "Manual" };
            out.push(Recommendation::equipment(
                STAGE,
                format!("{press} Compression Mounting Press"),
                "Fast cycles and good edge retention for most materials. Heat and pressure application suitable for materials that can tolerate thermal cycling.",
            ));
            out.push(Recommendation::consumable(
                STAGE,
                THERMOSET,
                format!(
                    "Phenolic or diallyl phthalate (DAP) resins for compression mounting. Select based on material compatibility and edge retention needs. {size_note}"
                ),
            ));
        }

        // Mixed workloads keep the other route's resin on hand.
        if matches!(preference, MountingPreference::Both | MountingPreference::Variable) {
            if cold {
                out.push(Recommendation::consumable(
                    STAGE,
                    THERMOSET,
                    "For samples that tolerate heat and pressure, compression mounting with phenolic or DAP resins gives faster cycles.",
                ));
            } else {
                out.push(Recommendation::consumable(
                    STAGE,
                    EPOXY,
                    "For heat-sensitive or fragile samples, cold mounting with epoxy avoids thermal damage.",
                ));
            }
        }

        out
    }
}

fn mount_size_note(size: MountSize) -> String {
    match size {
        MountSize::Variable => "Keep molds in several diameters for variable mount sizes.".to_string(),
        other => format!("Sized for {} mounts.", other.label()),
    }
}
