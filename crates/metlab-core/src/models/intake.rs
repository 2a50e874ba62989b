use serde::{Deserialize, Serialize};

use super::material::MaterialProfile;
use super::stage::Stage;
use crate::labeled_enum;

/// Material types offered in the sample-specification step. Any other name
/// (for example one picked from the materials database) is also accepted.
pub const SUGGESTED_MATERIAL_TYPES: [&str; 9] = [
    "Steel (Carbon/Low Alloy)",
    "Stainless Steel",
    "Aluminum",
    "Titanium",
    "Copper/Brass",
    "Nickel Alloys",
    "Hard Metals (Carbides)",
    "Ceramics",
    "Other",
];

labeled_enum! {
    pub enum Hardness {
        Soft => "Soft (< 30 HRC)",
        Medium => "Medium (30-50 HRC)",
        Hard => "Hard (50-65 HRC)",
        VeryHard => "Very Hard (> 65 HRC)",
    }
}

impl Hardness {
    /// Hard or very hard.
    pub fn is_hard(&self) -> bool {
        matches!(self, Self::Hard | Self::VeryHard)
    }
}

labeled_enum! {
    pub enum SampleSize {
        Small => "Small (< 25mm)",
        Medium => "Medium (25-50mm)",
        Large => "Large (50-100mm)",
        VeryLarge => "Very Large (> 100mm)",
    }
}

impl SampleSize {
    /// Large or very large.
    pub fn is_large(&self) -> bool {
        matches!(self, Self::Large | Self::VeryLarge)
    }
}

labeled_enum! {
    pub enum SampleShape {
        Regular => "Regular",
        Irregular => "Irregular",
        Thin => "Thin",
        Small => "Small",
    }
}

labeled_enum! {
    pub enum Application {
        QualityControl => "Quality Control",
        ResearchAndDevelopment => "Research & Development",
        FailureAnalysis => "Failure Analysis",
        MaterialCharacterization => "Material Characterization",
        ProductionTesting => "Production Testing",
        Ebsd => "EBSD",
    }
}

labeled_enum! {
    pub enum Throughput {
        Low => "Low (1-10 samples/day)",
        Medium => "Medium (10-50 samples/day)",
        High => "High (50-200 samples/day)",
        VeryHigh => "Very High (> 200 samples/day)",
    }
}

impl Throughput {
    /// High or very high.
    pub fn is_high(&self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }
}

labeled_enum! {
    pub enum Automation {
        FullyManual => "Fully Manual",
        SemiAutomated => "Semi-Automated",
        FullyAutomated => "Fully Automated",
    }
}

labeled_enum! {
    pub enum BudgetTier {
        Essential => "Essential",
        Standard => "Standard",
        Advanced => "Advanced",
        Comprehensive => "Comprehensive",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum SurfaceFinish {
        #[default]
        Standard => "Standard",
        HighQuality => "High Quality",
        ExtremelyFlat => "Extremely Flat",
        Ebsd => "EBSD",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum SectionType {
        #[default]
        CrossSection => "Cross-section",
        Surface => "Surface",
        SpecificFeature => "Specific feature",
        Variable => "Variable",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum DamageCriticality {
        #[default]
        Standard => "Standard",
        High => "High",
        VeryHigh => "Very High",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum MountingPreference {
        #[default]
        Compression => "Compression",
        Castable => "Castable",
        Both => "Both",
        Variable => "Variable",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum MountSize {
        #[default]
        Standard => "Standard (25-32mm)",
        Small => "Small (< 25mm)",
        Large => "Large (> 32mm)",
        Variable => "Variable",
    }
}

impl MountSize {
    /// Mount size implied by the sample size when none was chosen.
    pub fn default_for(sample_size: Option<SampleSize>) -> Self {
        match sample_size {
            Some(SampleSize::Small) => Self::Small,
            Some(SampleSize::Large | SampleSize::VeryLarge) => Self::Large,
            _ => Self::Standard,
        }
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum MethodPreference {
        #[default]
        AutomatedPreferred => "Automated preferred",
        ManualAcceptable => "Manual acceptable",
        Both => "Both",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum GrindingSurface {
        #[default]
        StandardFlat => "Standard flat",
        PreserveFeatures => "Preserve features",
        MinimalDeformation => "Minimal deformation",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum FinalSurfaceQuality {
        #[default]
        StandardMirror => "Standard mirror",
        EbsdReady => "EBSD-ready",
        ResearchGrade => "Research-grade",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum Frequency {
        #[default]
        Occasional => "Occasional",
        Regular => "Regular",
        HighFrequency => "High frequency",
    }
}

labeled_enum! {
    pub enum MicroscopyType {
        Optical => "Optical",
        DigitalImaging => "Digital imaging",
        EbsdSem => "EBSD/SEM",
        Variable => "Variable",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum DocumentationLevel {
        #[default]
        Basic => "Basic",
        HighResolution => "High-resolution",
        AutomatedCapture => "Automated capture",
        Variable => "Variable",
    }
}

labeled_enum! {
    #[derive(Default)]
    pub enum CleaningMethod {
        #[default]
        Ultrasonic => "Ultrasonic",
        Manual => "Manual",
        Both => "Both",
    }
}

labeled_enum! {
    pub enum HardnessTestType {
        Rockwell => "Rockwell",
        Vickers => "Vickers",
        Knoop => "Knoop",
        Brinell => "Brinell",
        Variable => "Variable",
    }
}

/// Optional per-stage answers. Every field falls back to its documented
/// default when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StageRefinements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_type: Option<SectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_criticality: Option<DamageCriticality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mounting_type_preference: Option<MountingPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_size_requirements: Option<MountSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grinding_method_preference: Option<MethodPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grinding_surface_requirements: Option<GrindingSurface>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polishing_method_preference: Option<MethodPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_surface_quality: Option<FinalSurfaceQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etching_frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub etchant_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub microscopy_types: Vec<MicroscopyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_requirements: Option<DocumentationLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning_frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning_method_preference: Option<CleaningMethod>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hardness_test_types: Vec<HardnessTestType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardness_testing_frequency: Option<Frequency>,
}

/// Everything the wizard collects before generating recommendations.
///
/// Built up step by step; only [`IntakeAttributes::missing_required`] decides
/// whether it is complete enough to generate from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeAttributes {
    pub process_stages: Vec<Stage>,
    pub material_type: String,
    pub material_hardness: Option<Hardness>,
    pub sample_size: Option<SampleSize>,
    pub sample_shape: Option<SampleShape>,
    pub applications: Vec<Application>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_material: Option<MaterialProfile>,
    pub throughput: Option<Throughput>,
    pub automation: Option<Automation>,
    pub budget: Option<BudgetTier>,
    pub surface_finish: Option<SurfaceFinish>,
    #[serde(flatten)]
    pub refinements: StageRefinements,
}

impl IntakeAttributes {
    /// Intake for a fresh wizard: default stage selection, nothing else.
    pub fn fresh() -> Self {
        Self {
            process_stages: Stage::DEFAULT_SELECTION.to_vec(),
            ..Self::default()
        }
    }

    pub fn has_stage(&self, stage: Stage) -> bool {
        self.process_stages.contains(&stage)
    }

    /// Adds a stage once, ignoring duplicates and non-selectable stages.
    pub fn select_stage(&mut self, stage: Stage) {
        if stage.is_selectable() && !self.has_stage(stage) {
            self.process_stages.push(stage);
        }
    }

    pub fn deselect_stage(&mut self, stage: Stage) {
        self.process_stages.retain(|s| *s != stage);
    }

    pub fn has_application(&self, application: Application) -> bool {
        self.applications.contains(&application)
    }

    pub fn effective_surface_finish(&self) -> SurfaceFinish {
        self.surface_finish.unwrap_or_default()
    }

    /// Explicit mount size, or the one implied by the sample size.
    pub fn effective_mount_size(&self) -> MountSize {
        self.refinements
            .mount_size_requirements
            .unwrap_or_else(|| MountSize::default_for(self.sample_size))
    }

    /// Names of required fields that are still empty, in wizard order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.process_stages.is_empty() {
            missing.push("processStages");
        }
        if self.material_type.trim().is_empty() {
            missing.push("materialType");
        }
        if self.material_hardness.is_none() {
            missing.push("materialHardness");
        }
        if self.sample_size.is_none() {
            missing.push("sampleSize");
        }
        if self.throughput.is_none() {
            missing.push("throughput");
        }
        if self.automation.is_none() {
            missing.push("automation");
        }
        if self.budget.is_none() {
            missing.push("budget");
        }
        missing
    }
}
