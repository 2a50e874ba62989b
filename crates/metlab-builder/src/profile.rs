//! Characteristics derived once from the intake and shared by every rule.

use metlab_core::models::{
    Application, Automation, IntakeAttributes, SampleShape, SampleSize, SurfaceFinish, Throughput,
};

/// Boolean view of the intake the rule tables branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleProfile {
    /// Hard or very hard.
    pub hard: bool,
    pub very_hard: bool,
    pub soft: bool,
    /// Large or very large.
    pub large: bool,
    pub very_large: bool,
    pub small: bool,
    /// Small or thin shape.
    pub delicate: bool,
    /// Medium throughput or more.
    pub moderate_throughput: bool,
    /// High or very high.
    pub high_throughput: bool,
    pub very_high_throughput: bool,
    /// Any automation, semi-automated included.
    pub automated: bool,
    pub fully_automated: bool,
    /// EBSD application, or EBSD / extremely flat finish.
    pub needs_ebsd: bool,
    pub extremely_flat: bool,
    pub high_quality_finish: bool,
    /// Hard metals or ceramics.
    pub hard_material: bool,
    pub brittle: bool,
    pub heat_sensitive: bool,
}

impl SampleProfile {
    pub fn derive(intake: &IntakeAttributes) -> Self {
        use metlab_core::models::Hardness;

        let hardness = intake.material_hardness;
        let size = intake.sample_size;
        let finish = intake.effective_surface_finish();
        let material = intake.material_type.as_str();

        let hard_material = material.contains("Hard Metals") || material.contains("Ceramics");
        let extremely_flat = finish == SurfaceFinish::ExtremelyFlat;

        Self {
            hard: hardness.is_some_and(|h| h.is_hard()),
            very_hard: hardness == Some(Hardness::VeryHard),
            soft: hardness == Some(Hardness::Soft),
            large: size.is_some_and(|s| s.is_large()),
            very_large: size == Some(SampleSize::VeryLarge),
            small: size == Some(SampleSize::Small),
            delicate: matches!(intake.sample_shape, Some(SampleShape::Small | SampleShape::Thin)),
            moderate_throughput: matches!(
                intake.throughput,
                Some(Throughput::Medium | Throughput::High | Throughput::VeryHigh)
            ),
            high_throughput: intake.throughput.is_some_and(|t| t.is_high()),
            very_high_throughput: intake.throughput == Some(Throughput::VeryHigh),
            automated: matches!(
                intake.automation,
                Some(Automation::SemiAutomated | Automation::FullyAutomated)
            ),
            fully_automated: intake.automation == Some(Automation::FullyAutomated),
            needs_ebsd: intake.has_application(Application::Ebsd)
                || finish == SurfaceFinish::Ebsd
                || extremely_flat,
            extremely_flat,
            high_quality_finish: finish == SurfaceFinish::HighQuality,
            hard_material,
            brittle: hard_material,
            heat_sensitive: material.contains("Titanium") || material.contains("Heat-Sensitive"),
        }
    }

    /// Platen size shared by grinding and polishing machines.
    pub fn platen_size(&self) -> &'static str {
        if self.large {
            "12 inch"
        } else {
            "8-10 inch"
        }
    }

    /// Machine control label for grinder/polishers. Semi-automated setups
    /// count as automated and get the programmable machine.
    pub fn machine_control(&self) -> &'static str {
        if self.automated {
            "Programmable"
        } else {
            "Manual"
        }
    }

    /// Sentence describing how the machine is operated.
    pub fn control_sentence(&self, operation: &str) -> String {
        if self.automated {
            format!("Programmable operation ensures consistent {operation} parameters.")
        } else if operation == "grinding" {
            "Manual control provides flexibility for varied materials.".to_string()
        } else {
            "Manual control provides flexibility.".to_string()
        }
    }
}
