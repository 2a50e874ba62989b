use metlab_core::models::{Application, DocumentationLevel, MicroscopyType, Recommendation, Stage};

use super::{RuleContext, StageRules};

pub struct MicroscopyRules;

const STAGE: Stage = Stage::Microscopy;

impl StageRules for MicroscopyRules {
    fn stage(&self) -> Stage {
        STAGE
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let p = &ctx.profile;
        let intake = ctx.intake;
        let types = &intake.refinements.microscopy_types;

        let scope = if p.needs_ebsd
            || intake.has_application(Application::ResearchAndDevelopment)
            || types.contains(&MicroscopyType::EbsdSem)
        {
            "Advanced"
        } else if p.high_throughput {
            "Production"
        } else {
            "Standard"
        };

        let mut out = vec![Recommendation::equipment(
            STAGE,
            format!("{scope} Metallurgical Microscope"),
            format!(
                "{} microscope suitable for {} metallographic analysis. Consider digital imaging capabilities for documentation.",
                scope,
                if p.high_throughput { "high-throughput" } else { "routine" },
            ),
        )];

        let qc = intake.has_application(Application::QualityControl);
        let fa = intake.has_application(Application::FailureAnalysis);
        let rnd = intake.has_application(Application::ResearchAndDevelopment);
        let demanding_docs = matches!(
            intake.refinements.documentation_requirements,
            Some(DocumentationLevel::HighResolution | DocumentationLevel::AutomatedCapture)
        ) || types.contains(&MicroscopyType::DigitalImaging);

        if p.high_throughput || qc || fa || rnd || demanding_docs {
            let purpose = if qc {
                "quality control"
            } else if fa {
                "failure analysis"
            } else if rnd {
                "research"
            } else if p.high_throughput {
                "production"
            } else {
                "high-resolution"
            };
            out.push(Recommendation::equipment(
                STAGE,
                "Digital Imaging System",
                format!(
                    "Essential for modern metallography documentation. Includes digital camera and imaging software for image capture, measurement, annotation, and report generation. Critical for {purpose} documentation."
                ),
            ));
        }

        out
    }
}
