//! Recommendation generator behavior.

use std::collections::BTreeSet;

use metlab_builder::{generate, try_generate, RecommendationEngine};
use metlab_builder::rules::EtchantLinks;
use metlab_core::errors::BuilderError;
use metlab_core::models::*;
use test_fixtures::{complete_intake, minimal_intake, steel_scenario, titanium_profile};

fn types_for(recs: &[Recommendation], stage: Stage) -> Vec<&str> {
    recs.iter()
        .filter(|r| r.stage == stage)
        .map(|r| r.item_type.as_str())
        .collect()
}

fn has_category(recs: &[Recommendation], stage: Stage, category: ItemCategory) -> bool {
    recs.iter().any(|r| r.stage == stage && r.category == category)
}

#[test]
fn steel_scenario_covers_both_stages() {
    let intake = steel_scenario();
    let recs = try_generate(&intake).unwrap();

    for stage in [Stage::Sectioning, Stage::Mounting] {
        assert!(has_category(&recs, stage, ItemCategory::Equipment), "{stage} equipment");
        assert!(has_category(&recs, stage, ItemCategory::Consumable), "{stage} consumable");
    }
    assert!(recs.iter().all(|r| matches!(r.stage, Stage::Sectioning | Stage::Mounting)));

    for r in &recs {
        assert!(!r.reasoning.contains("${"), "placeholder in {}", r.reasoning);
        assert!(!r.reasoning.contains('{') && !r.reasoning.contains('}'));
        assert!(!r.reasoning.contains("undefined"));
    }

    let sectioning = types_for(&recs, Stage::Sectioning);
    assert_eq!(sectioning[0], "10-12 inch Abrasive Cut-off Saw with Automated Table Feed");
    assert!(sectioning.contains(&"Abrasive Cut-off Wheels"));
    assert!(sectioning.contains(&"Cutting Fluid / Coolant"));

    let mounting = types_for(&recs, Stage::Mounting);
    assert_eq!(
        mounting,
        vec!["Automated Compression Mounting Press", "Thermosetting Mounting Resins"]
    );
    let resin = recs.iter().find(|r| r.item_type == "Thermosetting Mounting Resins").unwrap();
    assert!(resin.reasoning.contains("Standard (25-32mm)"));
}

#[test]
fn generation_is_deterministic() {
    let intake = complete_intake();
    let engine = RecommendationEngine::new();
    assert_eq!(engine.generate(&intake), engine.generate(&intake));
    assert_eq!(generate(&intake), engine.generate(&intake));
}

#[test]
fn every_selected_stage_is_non_empty() {
    let intake = complete_intake();
    let recs = generate(&intake);
    for stage in Stage::SELECTABLE {
        assert!(!types_for(&recs, stage).is_empty(), "{stage} empty");
    }
    assert!(!types_for(&recs, Stage::FinalPolishing).is_empty());
}

#[test]
fn output_follows_canonical_order_regardless_of_selection_order() {
    let mut intake = complete_intake();
    intake.process_stages.reverse();
    let recs = generate(&intake);
    let ranks: Vec<usize> = recs.iter().map(|r| r.stage.rank()).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);
}

#[test]
fn final_polishing_only_with_polishing() {
    let recs = generate(&minimal_intake(&[Stage::Grinding]));
    assert!(types_for(&recs, Stage::FinalPolishing).is_empty());
    let recs = generate(&minimal_intake(&[Stage::Polishing]));
    assert!(!types_for(&recs, Stage::FinalPolishing).is_empty());
}

#[test]
fn small_delicate_samples_get_precision_wafering() {
    let mut intake = minimal_intake(&[Stage::Sectioning]);
    intake.sample_shape = Some(SampleShape::Thin);
    let recs = generate(&intake);
    assert_eq!(
        types_for(&recs, Stage::Sectioning),
        vec![
            "Precision Wafering System with Diamond Blades",
            "Diamond Wafering Blades (3-8 inch)"
        ]
    );
}

#[test]
fn essential_budget_small_sample_gets_wheel_feed() {
    let intake = minimal_intake(&[Stage::Sectioning]);
    let recs = generate(&intake);
    let saw = types_for(&recs, Stage::Sectioning)[0];
    assert_eq!(saw, "10-12 inch Abrasive Cut-off Saw with Wheel Feed Only (Budget Option)");
    assert!(types_for(&recs, Stage::Sectioning).contains(&"Aluminum Oxide Abrasive Cut-off Wheels"));
}

#[test]
fn semi_automation_counts_for_table_feed_and_press() {
    let mut intake = minimal_intake(&[Stage::Sectioning, Stage::Mounting, Stage::Grinding]);
    intake.automation = Some(Automation::SemiAutomated);
    intake.material_hardness = Some(Hardness::Medium);
    intake.sample_size = Some(SampleSize::Large);
    let recs = generate(&intake);

    assert_eq!(
        types_for(&recs, Stage::Sectioning)[0],
        "12-14 inch Abrasive Cut-off Saw with Automated Table Feed"
    );
    assert_eq!(types_for(&recs, Stage::Mounting)[0], "Automated Compression Mounting Press");
    assert_eq!(
        types_for(&recs, Stage::Grinding)[..2],
        ["Belt Grinder / Hand Grinder", "12 inch Programmable Grinder/Polisher"]
    );
}

#[test]
fn hard_materials_get_sic_and_optional_wafering() {
    let mut intake = complete_intake();
    intake.material_type = "Hard Metals (Carbides)".to_string();
    intake.material_hardness = Some(Hardness::VeryHard);
    intake.applications = vec![Application::FailureAnalysis];
    let recs = generate(&intake);
    let sectioning = types_for(&recs, Stage::Sectioning);
    assert!(sectioning.contains(&"Silicon Carbide Abrasive Cut-off Wheels"));
    assert!(sectioning.contains(&"Precision Wafering System with Diamond Blades (Optional/Alternative)"));
    assert!(types_for(&recs, Stage::Grinding)
        .contains(&"Silicon Carbide Grinding Papers (120, 240, 320, 400, 600, 800, 1200 grit)"));
}

#[test]
fn cold_mounting_routes() {
    let mut soft = minimal_intake(&[Stage::Mounting]);
    soft.throughput = Some(Throughput::VeryHigh);
    assert_eq!(
        types_for(&generate(&soft), Stage::Mounting),
        vec!["UV Curing Mounting System", "Epoxy Mounting Resins"]
    );

    let mut castable = steel_scenario();
    castable.throughput = Some(Throughput::Low);
    castable.refinements.mounting_type_preference = Some(MountingPreference::Castable);
    assert_eq!(
        types_for(&generate(&castable), Stage::Mounting),
        vec!["Vacuum Impregnation System", "Epoxy Mounting Resins"]
    );
}

#[test]
fn mixed_mounting_preference_adds_alternate_resin() {
    let mut intake = steel_scenario();
    intake.refinements.mounting_type_preference = Some(MountingPreference::Both);
    assert_eq!(
        types_for(&generate(&intake), Stage::Mounting),
        vec![
            "Automated Compression Mounting Press",
            "Thermosetting Mounting Resins",
            "Epoxy Mounting Resins"
        ]
    );
}

#[test]
fn mount_size_default_is_named_in_resin_reasoning() {
    for (size, label) in [
        (SampleSize::Small, "Small (< 25mm)"),
        (SampleSize::Medium, "Standard (25-32mm)"),
        (SampleSize::Large, "Large (> 32mm)"),
        (SampleSize::VeryLarge, "Large (> 32mm)"),
    ] {
        let mut intake = steel_scenario();
        intake.sample_size = Some(size);
        let recs = generate(&intake);
        let resin = recs
            .iter()
            .find(|r| r.stage == Stage::Mounting && r.category == ItemCategory::Consumable)
            .unwrap();
        assert!(resin.reasoning.contains(label), "{size:?}: {}", resin.reasoning);
    }
}

#[test]
fn material_profile_sequences_override_defaults() {
    let mut intake = complete_intake();
    intake.selected_material = Some(titanium_profile());
    let recs = generate(&intake);
    assert!(types_for(&recs, Stage::Grinding).contains(&"Grinding Papers (320, 600, 1200 grit)"));
    assert!(types_for(&recs, Stage::Polishing).contains(&"Diamond Polishing Suspensions (9 µm to 0.25 µm)"));
    let diamond = recs
        .iter()
        .find(|r| r.item_type.starts_with("Diamond Polishing"))
        .unwrap();
    assert!(diamond.reasoning.contains("9, 3, 0.05 µm"));
}

#[test]
fn soft_materials_use_shorter_sequences() {
    let recs = generate(&minimal_intake(&[Stage::Grinding, Stage::Polishing]));
    assert!(types_for(&recs, Stage::Grinding)
        .contains(&"Aluminum Oxide or Fine SiC Grinding Papers (240, 320, 400, 600 grit)"));
    assert!(types_for(&recs, Stage::Polishing).contains(&"Diamond Polishing Suspensions (6 µm to 0.25 µm)"));
}

#[test]
fn ebsd_routes_to_vibratory_polishing_and_advanced_scope() {
    let mut intake = complete_intake();
    intake.applications = vec![Application::Ebsd];
    let recs = generate(&intake);
    assert_eq!(types_for(&recs, Stage::FinalPolishing)[0], "Vibratory Polisher");
    assert_eq!(types_for(&recs, Stage::Microscopy)[0], "Advanced Metallurgical Microscope");

    let mut research = complete_intake();
    research.refinements.final_surface_quality = Some(FinalSurfaceQuality::ResearchGrade);
    assert_eq!(types_for(&generate(&research), Stage::FinalPolishing)[0], "Vibratory Polisher");
}

#[test]
fn high_throughput_polishing_uses_dual_wheel() {
    let recs = generate(&steel_scenario_with(&[Stage::Polishing]));
    assert_eq!(
        types_for(&recs, Stage::Polishing)[0],
        "Dual Wheel 8-10 inch Programmable Grinder/Polisher"
    );
}

fn steel_scenario_with(stages: &[Stage]) -> IntakeAttributes {
    let mut intake = steel_scenario();
    intake.process_stages = stages.to_vec();
    intake
}

#[test]
fn etching_links_and_selected_etchants() {
    let mut intake = steel_scenario_with(&[Stage::Etching]);
    intake.refinements.etchant_types = vec!["Nital".to_string(), " ".to_string()];
    let engine = RecommendationEngine::with_links(EtchantLinks {
        selector_path: "/tools/etch".to_string(),
        database_path: "/db".to_string(),
    });
    let recs = engine.generate(&intake);
    assert_eq!(recs[0].item_type, "Fume Hood / Ventilation System");
    assert!(recs[1].reasoning.contains("[Etchant Selector tool](/tools/etch)"));
    assert!(recs[1].reasoning.contains("[Etchants Database](/db)"));
    assert!(recs[1].reasoning.ends_with("Selected etchant types: Nital."));
}

#[test]
fn manual_cleaning_skips_ultrasonic() {
    let mut intake = minimal_intake(&[Stage::Cleaning]);
    intake.refinements.cleaning_method_preference = Some(CleaningMethod::Manual);
    let recs = generate(&intake);
    let types = types_for(&recs, Stage::Cleaning);
    assert!(!types.contains(&"Ultrasonic Cleaner"));
    assert!(types.contains(&"Drying Oven"));
}

#[test]
fn hardness_label_follows_test_types() {
    let mut intake = minimal_intake(&[Stage::Hardness]);
    assert_eq!(types_for(&generate(&intake), Stage::Hardness)[0], "Hardness Tester (Vickers/Rockwell)");

    intake.refinements.hardness_test_types = vec![HardnessTestType::Knoop, HardnessTestType::Variable];
    intake.refinements.hardness_testing_frequency = Some(Frequency::HighFrequency);
    let recs = generate(&intake);
    let types = types_for(&recs, Stage::Hardness);
    assert_eq!(types[0], "Automated Hardness Tester (Knoop)");
    assert_eq!(types[1], "Certified Hardness Test Blocks");
}

#[test]
fn imaging_for_documentation_requirements() {
    let mut intake = minimal_intake(&[Stage::Microscopy]);
    assert_eq!(types_for(&generate(&intake), Stage::Microscopy), vec!["Standard Metallurgical Microscope"]);
    intake.refinements.documentation_requirements = Some(DocumentationLevel::AutomatedCapture);
    assert!(types_for(&generate(&intake), Stage::Microscopy).contains(&"Digital Imaging System"));
}

#[test]
fn try_generate_reports_first_missing_field() {
    let mut intake = steel_scenario();
    intake.budget = None;
    assert_eq!(
        try_generate(&intake).unwrap_err(),
        BuilderError::MissingField { field: "budget" }
    );

    intake.process_stages.clear();
    assert_eq!(try_generate(&intake).unwrap_err(), BuilderError::NoStagesSelected);
}

#[test]
fn generate_tolerates_empty_intake() {
    let mut intake = IntakeAttributes::default();
    intake.process_stages = Stage::SELECTABLE.to_vec();
    let recs = generate(&intake);
    let stages: BTreeSet<Stage> = recs.iter().map(|r| r.stage).collect();
    assert_eq!(stages.len(), Stage::CANONICAL_ORDER.len());
}

#[test]
fn final_polishing_alone_still_yields_recommendations() {
    let intake = minimal_intake(&[Stage::FinalPolishing]);
    let recs = try_generate(&intake).unwrap();
    assert!(!types_for(&recs, Stage::FinalPolishing).is_empty());
    assert!(!types_for(&recs, Stage::Polishing).is_empty());
    assert_eq!(
        RecommendationEngine::new().emitted_stages(&intake),
        vec![Stage::Polishing, Stage::FinalPolishing]
    );
}
