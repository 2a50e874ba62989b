use std::sync::Arc;

use metlab_catalog::{EquipmentForm, EquipmentService, InMemoryRecordStore, StoreOp};
use metlab_core::constants::{EQUIPMENT_TABLE, FALLBACK_CATEGORIES};
use metlab_core::errors::CatalogError;
use metlab_core::models::{CategorySpecs, EquipmentCategory, EquipmentStatus};
use test_fixtures::{sample_equipment, sample_specs, sectioning_saw};

fn service() -> (Arc<InMemoryRecordStore>, EquipmentService) {
    let store = Arc::new(InMemoryRecordStore::new());
    (store.clone(), EquipmentService::new(store))
}

#[test]
fn create_writes_base_and_side_records() {
    let (store, svc) = service();
    let (saw, specs) = sectioning_saw();

    let id = svc.create(&saw, Some(&specs)).unwrap();

    let base = store.rows(EQUIPMENT_TABLE);
    assert_eq!(base.len(), 1);
    assert_eq!(base[0]["id"], id.to_string());
    assert_eq!(base[0]["name"], "MEGA-T300 Abrasive Cutter");

    let side = store.rows("equipment_sectioning");
    assert_eq!(side.len(), 1);
    assert_eq!(side[0]["equipment_id"], id.to_string());
    assert_eq!(side[0]["blade_size_inches"], 12);
}

#[test]
fn create_without_specs_writes_only_base_record() {
    let (store, svc) = service();
    svc.create(&sample_equipment(EquipmentCategory::Microscopy), None).unwrap();
    assert_eq!(store.rows(EQUIPMENT_TABLE).len(), 1);
    assert!(store.rows("equipment_microscopy").is_empty());
}

#[test]
fn failed_side_insert_removes_base_record() {
    let (store, svc) = service();
    store.fail("equipment_mounting", StoreOp::Insert, "violates check constraint");

    let err = svc
        .create(
            &sample_equipment(EquipmentCategory::Mounting),
            Some(&sample_specs(EquipmentCategory::Mounting)),
        )
        .unwrap_err();

    match err {
        CatalogError::SideRecordCreate { table, reason } => {
            assert_eq!(table, "equipment_mounting");
            assert!(reason.contains("violates check constraint"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(store.rows(EQUIPMENT_TABLE).is_empty());
}

#[test]
fn failed_cleanup_is_reported_as_rollback_failure() {
    let (store, svc) = service();
    store.fail("equipment_mounting", StoreOp::Insert, "side down");
    store.fail(EQUIPMENT_TABLE, StoreOp::Delete, "base down");

    let err = svc
        .create(
            &sample_equipment(EquipmentCategory::Mounting),
            Some(&sample_specs(EquipmentCategory::Mounting)),
        )
        .unwrap_err();

    let CatalogError::RollbackFailed {
        table,
        equipment_id,
        reason,
        cleanup_reason,
    } = err
    else {
        panic!("expected RollbackFailed, got {err:?}");
    };
    assert_eq!(table, "equipment_mounting");
    assert!(reason.contains("side down"));
    assert!(cleanup_reason.contains("base down"));
    // The orphan is still there and identified.
    let base = store.rows(EQUIPMENT_TABLE);
    assert_eq!(base.len(), 1);
    assert_eq!(base[0]["id"], equipment_id);
}

#[test]
fn create_rejects_mismatched_specs() {
    let (store, svc) = service();
    let err = svc
        .create(
            &sample_equipment(EquipmentCategory::Mounting),
            Some(&sample_specs(EquipmentCategory::Microscopy)),
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation { ref field, .. } if field == "category"));
    assert!(store.rows(EQUIPMENT_TABLE).is_empty());
}

#[test]
fn create_requires_name() {
    let (_, svc) = service();
    let mut eq = sample_equipment(EquipmentCategory::Sectioning);
    eq.name = "   ".into();
    let err = svc.create(&eq, None).unwrap_err();
    assert_eq!(
        err,
        CatalogError::Validation {
            field: "name".into(),
            message: "is required".into()
        }
    );
}

#[test]
fn update_upserts_side_record() {
    let (store, svc) = service();
    let eq = sample_equipment(EquipmentCategory::Sectioning);
    // Created without specs: the update has to insert the side row.
    let id = svc.create(&eq, None).unwrap();

    let mut renamed = eq.clone();
    renamed.name = "Renamed Saw".into();
    svc.update(id, &renamed, Some(&sample_specs(EquipmentCategory::Sectioning)))
        .unwrap();
    assert_eq!(store.rows("equipment_sectioning").len(), 1);

    // A second update merges into the same side row.
    let (_, saw_specs) = sectioning_saw();
    svc.update(id, &renamed, Some(&saw_specs)).unwrap();
    let side = store.rows("equipment_sectioning");
    assert_eq!(side.len(), 1);
    assert_eq!(side[0]["cooling_system"], "Recirculating");

    assert_eq!(svc.get(id).unwrap().name, "Renamed Saw");
}

#[test]
fn update_of_missing_record_is_not_found() {
    let (_, svc) = service();
    let id = uuid::Uuid::new_v4();
    let err = svc
        .update(id, &sample_equipment(EquipmentCategory::Sectioning), None)
        .unwrap_err();
    assert_eq!(err, CatalogError::NotFound { key: id.to_string() });
}

#[test]
fn side_upsert_failure_is_reported() {
    let (store, svc) = service();
    let eq = sample_equipment(EquipmentCategory::Microscopy);
    let id = svc.create(&eq, None).unwrap();
    store.fail("equipment_microscopy", StoreOp::Upsert, "nope");

    let err = svc
        .update(id, &eq, Some(&sample_specs(EquipmentCategory::Microscopy)))
        .unwrap_err();
    assert!(matches!(err, CatalogError::SideRecordUpdate { ref table, .. } if table == "equipment_microscopy"));
}

#[test]
fn list_orders_by_name_and_filters_status() {
    let (_, svc) = service();
    for (name, status) in [
        ("Zeta Polisher", EquipmentStatus::Active),
        ("alpha Saw", EquipmentStatus::Draft),
        ("Mid Press", EquipmentStatus::Active),
    ] {
        let mut eq = sample_equipment(EquipmentCategory::Sectioning);
        eq.name = name.into();
        eq.status = status;
        svc.create(&eq, None).unwrap();
    }

    let names: Vec<String> = svc.list(None).unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, ["alpha Saw", "Mid Press", "Zeta Polisher"]);

    let active: Vec<String> = svc
        .list(Some(EquipmentStatus::Active))
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(active, ["Mid Press", "Zeta Polisher"]);
}

#[test]
fn delete_and_toggle() {
    let (_, svc) = service();
    let id = svc
        .create(&sample_equipment(EquipmentCategory::LabFurniture), None)
        .unwrap();

    assert_eq!(svc.toggle_status(id).unwrap(), EquipmentStatus::Active);
    assert_eq!(svc.get(id).unwrap().status, EquipmentStatus::Active);
    assert_eq!(svc.toggle_status(id).unwrap(), EquipmentStatus::Draft);

    svc.delete(id).unwrap();
    assert_eq!(svc.delete(id).unwrap_err(), CatalogError::NotFound { key: id.to_string() });
    assert!(matches!(svc.toggle_status(id), Err(CatalogError::NotFound { .. })));
}

#[test]
fn find_active_by_slug_or_item_id() {
    let (_, svc) = service();
    let (saw, specs) = sectioning_saw();
    svc.create(&saw, Some(&specs)).unwrap();

    let by_slug = svc.find_active("mega-t300-abrasive-cutter").unwrap();
    assert_eq!(by_slug.equipment.name, saw.name);
    match by_slug.specs {
        Some(CategorySpecs::Sectioning(s)) => assert_eq!(s.blade_size_mm, Some(300)),
        other => panic!("expected sectioning specs, got {other:?}"),
    }

    let by_item = svc.find_active("mega-t300").unwrap();
    assert_eq!(by_item.equipment.item_id.as_deref(), Some("MEGA-T300"));
}

#[test]
fn find_active_ignores_drafts() {
    let (_, svc) = service();
    let eq = sample_equipment(EquipmentCategory::Microscopy);
    svc.create(&eq, None).unwrap();
    let err = svc.find_active("test-microscopy").unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[test]
fn find_active_looks_beyond_own_side_table() {
    let (store, svc) = service();
    let mut eq = sample_equipment(EquipmentCategory::Microscopy);
    eq.category = "Accessories".into();
    eq.status = EquipmentStatus::Active;
    let id = svc.create(&eq, None).unwrap();
    // A spec row filed under another category still joins.
    let mut row = sample_specs(EquipmentCategory::Microscopy).to_row(id).unwrap();
    row.insert("id".into(), serde_json::Value::String(uuid::Uuid::new_v4().to_string()));
    metlab_core::traits::IRecordStore::insert(store.as_ref(), "equipment_microscopy", &row).unwrap();

    let detail = svc.find_active("test-microscopy").unwrap();
    assert_eq!(
        detail.specs.map(|s| s.category()),
        Some(EquipmentCategory::Microscopy)
    );
}

#[test]
fn categories_are_distinct_and_sorted() {
    let (_, svc) = service();
    for cat in ["mounting", "sectioning", "mounting"] {
        let mut eq = sample_equipment(EquipmentCategory::Mounting);
        eq.category = cat.into();
        svc.create(&eq, None).unwrap();
    }
    assert_eq!(svc.categories(None), ["mounting", "sectioning"]);
    assert_eq!(svc.categories(Some("consumables")), ["consumables", "mounting", "sectioning"]);
}

#[test]
fn categories_fall_back_when_backend_fails() {
    let (store, svc) = service();
    store.fail(EQUIPMENT_TABLE, StoreOp::Select, "offline");

    let cats = svc.categories(Some("custom-stuff"));
    for fallback in FALLBACK_CATEGORIES {
        assert!(cats.iter().any(|c| c == fallback), "missing {fallback}");
    }
    assert!(cats.iter().any(|c| c == "custom-stuff"));
    let mut sorted = cats.clone();
    sorted.sort_by_key(|c| c.to_lowercase());
    assert_eq!(cats, sorted);
}

#[test]
fn save_form_creates_then_updates() {
    let (store, svc) = service();
    let form = EquipmentForm::new()
        .with("name", "Nano 2000 Polisher")
        .with("category", "grinding-polishing")
        .with("item_id", "NANO-2000")
        .with("wheel_size_inches", "8, 10, 12")
        .with("number_of_stations", "2");

    let id = svc.save_form(None, &form).unwrap();
    let saved = svc.get(id).unwrap();
    assert_eq!(saved.slug.as_deref(), Some("nano-2000-polisher"));
    assert_eq!(saved.status, EquipmentStatus::Draft);
    let side = store.rows("equipment_grinding_polishing");
    assert_eq!(side.len(), 1);
    assert_eq!(side[0]["number_of_stations"], 2);

    let edited = form.with("status", "active").with("number_of_stations", "4");
    assert_eq!(svc.save_form(Some(id), &edited).unwrap(), id);
    assert_eq!(svc.get(id).unwrap().status, EquipmentStatus::Active);
    let side = store.rows("equipment_grinding_polishing");
    assert_eq!(side.len(), 1);
    assert_eq!(side[0]["number_of_stations"], 4);
}

#[test]
fn save_form_for_known_category_always_writes_side_record() {
    let (store, svc) = service();
    let form = EquipmentForm::new()
        .with("name", "Bare Bench")
        .with("category", "lab-furniture");
    svc.save_form(None, &form).unwrap();
    assert_eq!(store.rows("equipment_lab_furniture").len(), 1);
}

#[test]
fn save_form_for_unknown_category_skips_side_record() {
    let (store, svc) = service();
    let form = EquipmentForm::new()
        .with("name", "Sample Labels")
        .with("category", "consumables");
    svc.save_form(None, &form).unwrap();
    for cat in EquipmentCategory::ALL {
        assert!(store.rows(cat.side_table()).is_empty());
    }
}
