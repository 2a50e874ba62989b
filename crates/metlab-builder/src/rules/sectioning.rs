use metlab_core::models::{Application, BudgetTier, DamageCriticality, Recommendation, SectionType, Stage};

use super::{RuleContext, StageRules};

pub struct SectioningRules;

const STAGE: Stage = Stage::Sectioning;

impl StageRules for SectioningRules {
    fn stage(&self) -> Stage {
        STAGE
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let p = &ctx.profile;
        let refinements = &ctx.intake.refinements;
        let section_type = refinements.section_type.unwrap_or_default();
        let criticality = refinements.damage_criticality.unwrap_or_default();

        let high_precision = matches!(
            criticality,
            DamageCriticality::High | DamageCriticality::VeryHigh
        );
        let specific_feature = matches!(
            section_type,
            SectionType::SpecificFeature | SectionType::Surface
        );

        // Abrasive saws start at 10 inch, too large for small delicate work.
        if p.small && (p.delicate || p.needs_ebsd || p.extremely_flat || high_precision || specific_feature) {
            return vec![
                Recommendation::equipment(
                    STAGE,
                    "Precision Wafering System with Diamond Blades",
                    "Essential for small delicate samples. Precision wafering with thin diamond blades (3-8 inch) minimizes damage and material loss. Standard abrasive saws (minimum 10-inch) are too large for small samples. Produces smoother cut surfaces with less damage, reducing subsequent grinding time.",
                ),
                Recommendation::consumable(
                    STAGE,
                    "Diamond Wafering Blades (3-8 inch)",
                    "Thin diamond blades (0.1-0.5 mm) minimize kerf width and material loss. Essential for small samples where material conservation is important. High concentration diamond blades provide precise cutting with minimal heat generation.",
                ),
            ];
        }

        let mut out = Vec::new();
        let blade_size = if p.very_large {
            "14-16 inch"
        } else if p.large {
            "12-14 inch"
        } else {
            "10-12 inch"
        };

        let automated_table_feed = p.high_throughput || p.automated;
        let table_feed = p.moderate_throughput;
        let essential_budget = ctx.intake.budget == Some(BudgetTier::Essential);

        let feed = if automated_table_feed {
            "with Automated Table Feed"
        } else if table_feed {
            "with Manual Table Feed"
        } else if essential_budget && p.small {
            "with Wheel Feed Only (Budget Option)"
        } else {
            "with Table Feed"
        };
        let feed_sentence = if automated_table_feed {
            "Automated table feed ensures consistent cutting parameters for high throughput."
        } else if table_feed {
            "Table feed provides better control and consistency for medium to high throughput."
        } else {
            "Wheel feed only provides cost-effective sectioning for low-volume work."
        };

        out.push(Recommendation::equipment(
            STAGE,
            format!("{blade_size} Abrasive Cut-off Saw {feed}"),
            format!(
                "Primary sectioning method for {}. Versatile and cost-effective, suitable for a wide range of materials from soft metals to hard steels and ceramics. Standard abrasive saws start at 10-inch (250mm) blade size. {feed_sentence} Appropriate blade size for {} samples.",
                ctx.material_or("most materials"),
                ctx.sample_size_phrase(),
            ),
        ));

        if p.hard_material || p.very_hard {
            out.push(Recommendation::consumable(
                STAGE,
                "Silicon Carbide Abrasive Cut-off Wheels",
                "SiC abrasive wheels provide aggressive cutting action essential for hard materials and ceramics. Proper blade selection and adequate cooling prevent excessive heat generation that could alter microstructure.",
            ));
        } else if p.soft {
            out.push(Recommendation::consumable(
                STAGE,
                "Aluminum Oxide Abrasive Cut-off Wheels",
                "Alumina abrasive wheels suitable for soft non-ferrous metals. Proper blade selection prevents excessive heat generation and material smearing in soft materials.",
            ));
        } else {
            out.push(Recommendation::consumable(
                STAGE,
                "Abrasive Cut-off Wheels",
                format!(
                    "Silicon carbide or alumina abrasive wheels suitable for {}. Proper blade selection prevents excessive heat generation.",
                    ctx.material_or("metallic materials"),
                ),
            ));
        }

        out.push(Recommendation::consumable(
            STAGE,
            "Cutting Fluid / Coolant",
            "Essential for cooling and lubrication during cutting. Prevents excessive heat generation that could cause phase transformations or microstructural changes.",
        ));

        let damage_sensitive = p.hard_material || p.brittle || p.delicate || high_precision || specific_feature;
        let demands_low_damage = p.needs_ebsd
            || p.extremely_flat
            || ctx.intake.has_application(Application::ResearchAndDevelopment)
            || ctx.intake.has_application(Application::FailureAnalysis)
            || high_precision;

        if damage_sensitive && demands_low_damage {
            let subject = if p.hard_material {
                "hard materials and ceramics"
            } else if p.delicate {
                "delicate samples"
            } else {
                "applications requiring minimal damage"
            };
            let workflow = if p.large {
                "For large samples, use abrasive sectioning for rough cutting, then precision wafering for final section."
            } else {
                "Produces smoother cut surfaces with less damage, reducing subsequent grinding time."
            };
            out.push(Recommendation::equipment(
                STAGE,
                "Precision Wafering System with Diamond Blades (Optional/Alternative)",
                format!(
                    "Recommended as alternative or complement to abrasive sectioning for {subject}. Diamond blade cutting minimizes deformation and thermal damage. {workflow}"
                ),
            ));
            out.push(Recommendation::consumable(
                STAGE,
                "Diamond Wafering Blades (3-8 inch)",
                format!(
                    "High concentration diamond blades provide precise cutting with minimal heat generation. Prevents thermal damage critical for {}.",
                    if p.hard_material {
                        "hard materials and ceramics"
                    } else {
                        "delicate materials"
                    }
                ),
            ));
        }

        out
    }
}
