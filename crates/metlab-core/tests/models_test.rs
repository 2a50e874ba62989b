//! Tests for stages, intake attributes, and equipment records.

use std::str::FromStr;

use metlab_core::models::*;
use serde_json::json;
use uuid::Uuid;

#[test]
fn stage_canonical_order_matches_declaration() {
    for (i, stage) in Stage::CANONICAL_ORDER.iter().enumerate() {
        assert_eq!(stage.rank(), i);
    }
    let mut shuffled = vec![Stage::Hardness, Stage::Sectioning, Stage::FinalPolishing, Stage::Mounting];
    shuffled.sort();
    assert_eq!(
        shuffled,
        vec![Stage::Sectioning, Stage::Mounting, Stage::FinalPolishing, Stage::Hardness]
    );
}

#[test]
fn final_polishing_is_not_selectable() {
    assert!(!Stage::FinalPolishing.is_selectable());
    assert!(!Stage::SELECTABLE.contains(&Stage::FinalPolishing));
    assert_eq!(Stage::SELECTABLE.len(), 8);

    let mut intake = IntakeAttributes::default();
    intake.select_stage(Stage::FinalPolishing);
    intake.select_stage(Stage::Etching);
    intake.select_stage(Stage::Etching);
    assert_eq!(intake.process_stages, vec![Stage::Etching]);
}

#[test]
fn stage_wire_names() {
    assert_eq!(serde_json::to_value(Stage::FinalPolishing).unwrap(), json!("final-polishing"));
    assert_eq!(Stage::from_str("final-polishing").unwrap(), Stage::FinalPolishing);
    assert_eq!(Stage::from_str("Hardness Testing").unwrap(), Stage::Hardness);
    assert!(Stage::from_str("lapping").is_err());
}

#[test]
fn labeled_enums_use_display_labels() {
    assert_eq!(serde_json::to_value(Hardness::Hard).unwrap(), json!("Hard (50-65 HRC)"));
    assert_eq!(
        serde_json::from_value::<Throughput>(json!("Very High (> 200 samples/day)")).unwrap(),
        Throughput::VeryHigh
    );
    assert_eq!(Hardness::from_str("very hard").unwrap(), Hardness::VeryHard);
    assert_eq!(SampleSize::from_str("Medium (25-50mm)").unwrap(), SampleSize::Medium);
    assert_eq!(Application::from_str("EBSD").unwrap(), Application::Ebsd);
    assert_eq!(Hardness::VeryHard.short_label(), "Very Hard");
    assert!(Automation::from_str("robotic").is_err());
}

#[test]
fn mount_size_defaults_follow_sample_size() {
    let cases = [
        (Some(SampleSize::Small), MountSize::Small, "Small (< 25mm)"),
        (Some(SampleSize::Medium), MountSize::Standard, "Standard (25-32mm)"),
        (Some(SampleSize::Large), MountSize::Large, "Large (> 32mm)"),
        (Some(SampleSize::VeryLarge), MountSize::Large, "Large (> 32mm)"),
        (None, MountSize::Standard, "Standard (25-32mm)"),
    ];
    for (sample, expected, label) in cases {
        let intake = IntakeAttributes {
            sample_size: sample,
            ..Default::default()
        };
        assert_eq!(intake.effective_mount_size(), expected);
        assert_eq!(expected.label(), label);
    }

    let explicit = IntakeAttributes {
        sample_size: Some(SampleSize::Small),
        refinements: StageRefinements {
            mount_size_requirements: Some(MountSize::Variable),
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(explicit.effective_mount_size(), MountSize::Variable);
}

#[test]
fn missing_required_lists_fields_in_wizard_order() {
    let intake = IntakeAttributes::default();
    assert_eq!(
        intake.missing_required(),
        vec![
            "processStages",
            "materialType",
            "materialHardness",
            "sampleSize",
            "throughput",
            "automation",
            "budget"
        ]
    );

    let fresh = IntakeAttributes::fresh();
    assert_eq!(fresh.process_stages, Stage::DEFAULT_SELECTION.to_vec());
    assert!(!fresh.missing_required().contains(&"processStages"));
    assert_eq!(fresh.effective_surface_finish(), SurfaceFinish::Standard);
}

#[test]
fn intake_json_uses_camel_case_and_flattened_refinements() {
    let value = json!({
        "processStages": ["sectioning", "mounting"],
        "materialType": "Stainless Steel",
        "materialHardness": "Medium (30-50 HRC)",
        "sampleSize": "Small (< 25mm)",
        "throughput": "Low (1-10 samples/day)",
        "automation": "Semi-Automated",
        "budget": "Standard",
        "sectionType": "Surface",
        "hardnessTestTypes": ["Vickers", "Knoop"]
    });
    let intake: IntakeAttributes = serde_json::from_value(value).unwrap();
    assert_eq!(intake.automation, Some(Automation::SemiAutomated));
    assert_eq!(intake.refinements.section_type, Some(SectionType::Surface));
    assert_eq!(
        intake.refinements.hardness_test_types,
        vec![HardnessTestType::Vickers, HardnessTestType::Knoop]
    );
    assert!(intake.missing_required().is_empty());
}

#[test]
fn side_row_omits_nulls_and_carries_equipment_id() {
    let id = Uuid::new_v4();
    let specs = CategorySpecs::Sectioning(SectioningSpecs {
        blade_size_inches: Some(12),
        cooling_system: Some("Recirculating".to_string()),
        ..Default::default()
    });
    let row = specs.to_row(id).unwrap();
    assert_eq!(row.len(), 3);
    assert_eq!(row["equipment_id"], json!(id.to_string()));
    assert_eq!(row["blade_size_inches"], json!(12));
    assert_eq!(specs.side_table(), "equipment_sectioning");
}

#[test]
fn side_row_reads_back_ignoring_bookkeeping_columns() {
    let row = json!({
        "equipment_id": "abc",
        "created_at": "2024-01-01T00:00:00Z",
        "test_methods": ["Vickers"],
        "digital_display": true
    });
    let specs = CategorySpecs::from_row(EquipmentCategory::HardnessTesting, row).unwrap();
    match specs {
        CategorySpecs::HardnessTesting(s) => {
            assert_eq!(s.test_methods, Some(vec!["Vickers".to_string()]));
            assert_eq!(s.digital_display, Some(true));
        }
        other => panic!("wrong variant: {other:?}"),
    }
}

#[test]
fn every_category_maps_to_its_side_table() {
    let tables: Vec<&str> = EquipmentCategory::ALL.iter().map(|c| c.side_table()).collect();
    assert_eq!(
        tables,
        vec![
            "equipment_sectioning",
            "equipment_mounting",
            "equipment_grinding_polishing",
            "equipment_microscopy",
            "equipment_hardness_testing",
            "equipment_lab_furniture"
        ]
    );
    assert_eq!(EquipmentCategory::parse("Grinding-Polishing"), Some(EquipmentCategory::GrindingPolishing));
    assert_eq!(EquipmentCategory::parse("consumables"), None);
    for c in EquipmentCategory::ALL {
        assert_eq!(CategorySpecs::empty(c).category(), c);
        assert!(CategorySpecs::empty(c).is_empty());
    }
}

#[test]
fn base_row_nulls_empty_lists_and_drops_id() {
    let equipment = Equipment {
        id: Some(Uuid::new_v4()),
        name: "Saw".to_string(),
        category: "sectioning".to_string(),
        tags: Some(vec![]),
        ..Default::default()
    };
    let row = equipment.to_row().unwrap();
    assert!(!row.contains_key("id"));
    assert_eq!(row["tags"], serde_json::Value::Null);
    assert_eq!(row["status"], json!("draft"));
    assert_eq!(row["sort_order"], json!(0));
}

#[test]
fn status_toggle() {
    assert_eq!(EquipmentStatus::Active.toggled(), EquipmentStatus::Draft);
    assert_eq!(EquipmentStatus::Draft.toggled(), EquipmentStatus::Active);
    assert_eq!(EquipmentStatus::Discontinued.toggled(), EquipmentStatus::Active);
}
