//! Shared fixtures for metlab tests: JSON files under `fixtures/` plus typed
//! builders for common intake and catalog records.

use std::path::PathBuf;

use metlab_core::models::*;
use serde::de::DeserializeOwned;

/// Root directory of the fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw text.
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixtures_root().join(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Sectioning + mounting for a hard carbon steel at high automated
/// throughput.
pub fn steel_scenario() -> IntakeAttributes {
    load_fixture("intake/steel_scenario.json")
}

/// Every required field populated, every selectable stage selected.
pub fn complete_intake() -> IntakeAttributes {
    IntakeAttributes {
        process_stages: Stage::SELECTABLE.to_vec(),
        material_type: "Stainless Steel".to_string(),
        material_hardness: Some(Hardness::Medium),
        sample_size: Some(SampleSize::Medium),
        sample_shape: Some(SampleShape::Regular),
        applications: vec![Application::QualityControl],
        throughput: Some(Throughput::Medium),
        automation: Some(Automation::SemiAutomated),
        budget: Some(BudgetTier::Standard),
        ..Default::default()
    }
}

/// Required fields only, with the given stages.
pub fn minimal_intake(stages: &[Stage]) -> IntakeAttributes {
    IntakeAttributes {
        process_stages: stages.to_vec(),
        material_type: "Aluminum".to_string(),
        material_hardness: Some(Hardness::Soft),
        sample_size: Some(SampleSize::Small),
        throughput: Some(Throughput::Low),
        automation: Some(Automation::FullyManual),
        budget: Some(BudgetTier::Essential),
        ..Default::default()
    }
}

/// A titanium profile with its own grinding and polishing sequences.
pub fn titanium_profile() -> MaterialProfile {
    MaterialProfile {
        name: "Ti-6Al-4V".to_string(),
        hardness_category: Some("Medium".to_string()),
        hardness_hrc: Some(36.0),
        recommended_grinding_sequence: vec!["320".into(), "600".into(), "1200".into()],
        recommended_polishing_sequence: vec!["9".into(), "3".into(), "0.05".into()],
    }
}

/// A draft catalog entry in `category`.
pub fn sample_equipment(category: EquipmentCategory) -> Equipment {
    Equipment {
        name: format!("Test {}", category.as_str()),
        item_id: Some(format!("TST-{}", category.as_str().to_uppercase())),
        slug: Some(format!("test-{}", category.as_str())),
        category: category.as_str().to_string(),
        is_pace_product: true,
        ..Default::default()
    }
}

/// The abrasive saw record from `equipment/sectioning_saw.json`.
pub fn sectioning_saw() -> (Equipment, CategorySpecs) {
    let value: serde_json::Value = load_fixture("equipment/sectioning_saw.json");
    let equipment: Equipment = serde_json::from_value(value["equipment"].clone())
        .unwrap_or_else(|e| panic!("bad equipment fixture: {e}"));
    let specs = CategorySpecs::from_row(EquipmentCategory::Sectioning, value["specs"].clone())
        .unwrap_or_else(|e| panic!("bad specs fixture: {e}"));
    (equipment, specs)
}

/// A non-empty spec record for `category`.
pub fn sample_specs(category: EquipmentCategory) -> CategorySpecs {
    match category {
        EquipmentCategory::Sectioning => CategorySpecs::Sectioning(SectioningSpecs {
            blade_size_inches: Some(12),
            automation_level: Some("Automated".into()),
            ..Default::default()
        }),
        EquipmentCategory::Mounting => CategorySpecs::Mounting(MountingSpecs {
            mounting_type: Some("Compression".into()),
            heating_capability: Some(true),
            ..Default::default()
        }),
        EquipmentCategory::GrindingPolishing => {
            CategorySpecs::GrindingPolishing(GrindingPolishingSpecs {
                wheel_size_inches: Some(vec![8.0, 10.0]),
                number_of_stations: Some(2),
                ..Default::default()
            })
        }
        EquipmentCategory::Microscopy => CategorySpecs::Microscopy(MicroscopySpecs {
            microscope_type: Some("Inverted".into()),
            objective_lenses: Some(vec!["5x".into(), "50x".into()]),
            ..Default::default()
        }),
        EquipmentCategory::HardnessTesting => {
            CategorySpecs::HardnessTesting(HardnessTestingSpecs {
                test_methods: Some(vec!["Vickers".into()]),
                digital_display: Some(true),
                ..Default::default()
            })
        }
        EquipmentCategory::LabFurniture => CategorySpecs::LabFurniture(LabFurnitureSpecs {
            furniture_type: Some("Bench".into()),
            drawers: Some(4),
            ..Default::default()
        }),
    }
}

/// Minimal bytes that start like a PDF document.
pub fn tiny_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\ntrailer << /Root 1 0 R >>\n%%EOF\n".to_vec()
}
