//! Catalog maintenance over the base `equipment` table and its per-category
//! side tables.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use metlab_core::constants::{EQUIPMENT_TABLE, FALLBACK_CATEGORIES, SIDE_TABLE_KEY};
use metlab_core::errors::{BackendError, CatalogError};
use metlab_core::models::{CategorySpecs, Equipment, EquipmentCategory, EquipmentDetail, EquipmentStatus};
use metlab_core::traits::{Filter, IRecordStore, Query, Row};
use metlab_observability::tracing_setup::events;

use crate::form::{parse_equipment, parse_specs, EquipmentForm};

pub struct EquipmentService {
    store: Arc<dyn IRecordStore>,
}

impl EquipmentService {
    pub fn new(store: Arc<dyn IRecordStore>) -> Self {
        Self { store }
    }

    /// Inserts the base record, then its side record. When the side insert
    /// fails the base record is deleted again and the side-table failure is
    /// reported; if that cleanup also fails the result is
    /// [`CatalogError::RollbackFailed`].
    pub fn create(&self, equipment: &Equipment, specs: Option<&CategorySpecs>) -> Result<Uuid, CatalogError> {
        validate(equipment, specs)?;
        let base_row = to_row(equipment.to_row())?;
        let stored = self.store.insert(EQUIPMENT_TABLE, &base_row)?;
        let id = row_id(&stored)?;
        debug!(%id, name = %equipment.name, "equipment base record created");

        let Some(specs) = specs else {
            return Ok(id);
        };
        let side_row = to_row(specs.to_row(id))?;
        let table = specs.side_table();
        if let Err(side_err) = self.store.insert(table, &side_row) {
            let reason = side_err.to_string();
            return match self.store.delete(EQUIPMENT_TABLE, &[Filter::eq("id", id)]) {
                Ok(_) => {
                    warn!(%id, table, %reason, "side record insert failed; base record removed");
                    Err(CatalogError::SideRecordCreate {
                        table: table.to_string(),
                        reason,
                    })
                }
                Err(cleanup_err) => {
                    error!(%id, table, %reason, cleanup = %cleanup_err, "side record insert failed and base record cleanup failed");
                    Err(CatalogError::RollbackFailed {
                        table: table.to_string(),
                        equipment_id: id.to_string(),
                        reason,
                        cleanup_reason: cleanup_err.to_string(),
                    })
                }
            };
        }
        info!(%id, table, "equipment created");
        Ok(id)
    }

    /// Updates the base record by id and upserts the side record on
    /// `equipment_id`.
    pub fn update(&self, id: Uuid, equipment: &Equipment, specs: Option<&CategorySpecs>) -> Result<(), CatalogError> {
        validate(equipment, specs)?;
        let base_row = to_row(equipment.to_row())?;
        let updated = self.store.update(EQUIPMENT_TABLE, &[Filter::eq("id", id)], &base_row)?;
        if updated.is_empty() {
            return Err(CatalogError::NotFound { key: id.to_string() });
        }

        if let Some(specs) = specs {
            let side_row = to_row(specs.to_row(id))?;
            let table = specs.side_table();
            self.store
                .upsert(table, &side_row, SIDE_TABLE_KEY)
                .map_err(|e| CatalogError::SideRecordUpdate {
                    table: table.to_string(),
                    reason: e.to_string(),
                })?;
        }
        info!(%id, "equipment updated");
        Ok(())
    }

    /// Parses an admin form and creates (`id == None`) or updates the
    /// record. Known categories always get a side record.
    pub fn save_form(&self, id: Option<Uuid>, form: &EquipmentForm) -> Result<Uuid, CatalogError> {
        let equipment = parse_equipment(form)?;
        let specs = equipment
            .known_category()
            .map(|category| parse_specs(category, form))
            .transpose()?;
        match id {
            Some(id) => self.update(id, &equipment, specs.as_ref()).map(|_| id),
            None => self.create(&equipment, specs.as_ref()),
        }
    }

    /// All records, optionally filtered by status, ordered by name.
    pub fn list(&self, status: Option<EquipmentStatus>) -> Result<Vec<Equipment>, CatalogError> {
        let mut query = Query::new().order_asc("name");
        if let Some(status) = status {
            query = query.filter(Filter::eq("status", status.as_str()));
        }
        self.store
            .select(EQUIPMENT_TABLE, &query)?
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Result<Equipment, CatalogError> {
        let query = Query::new().filter(Filter::eq("id", id)).limit(1);
        match self.store.select(EQUIPMENT_TABLE, &query)?.into_iter().next() {
            Some(row) => from_row(row),
            None => Err(CatalogError::NotFound { key: id.to_string() }),
        }
    }

    pub fn delete(&self, id: Uuid) -> Result<(), CatalogError> {
        match self.store.delete(EQUIPMENT_TABLE, &[Filter::eq("id", id)])? {
            0 => Err(CatalogError::NotFound { key: id.to_string() }),
            _ => {
                info!(%id, "equipment deleted");
                Ok(())
            }
        }
    }

    /// Active becomes draft; anything else becomes active. Returns the new
    /// status.
    pub fn toggle_status(&self, id: Uuid) -> Result<EquipmentStatus, CatalogError> {
        let next = self.get(id)?.status.toggled();
        let mut patch = Row::new();
        patch.insert("status".to_string(), Value::String(next.as_str().to_string()));
        self.store.update(EQUIPMENT_TABLE, &[Filter::eq("id", id)], &patch)?;
        info!(%id, status = %next, "equipment status toggled");
        Ok(next)
    }

    /// Active record whose slug equals `key` or whose item id matches it
    /// case-insensitively, joined with its specification record.
    pub fn find_active(&self, key: &str) -> Result<EquipmentDetail, CatalogError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CatalogError::NotFound { key: key.to_string() });
        }
        let active = Filter::eq("status", EquipmentStatus::Active.as_str());
        let by_slug_or_item = Query::new()
            .filter(Filter::Or(vec![
                Filter::eq("slug", key),
                Filter::ilike("item_id", key.to_uppercase()),
            ]))
            .filter(active.clone())
            .limit(1);

        let mut rows = self.store.select(EQUIPMENT_TABLE, &by_slug_or_item)?;
        if rows.is_empty() {
            let by_item = Query::new()
                .filter(Filter::ilike("item_id", key))
                .filter(active)
                .limit(1);
            rows = self.store.select(EQUIPMENT_TABLE, &by_item)?;
        }
        let Some(row) = rows.into_iter().next() else {
            return Err(CatalogError::NotFound { key: key.to_string() });
        };
        let equipment = from_row(row)?;
        let specs = match equipment.id {
            Some(id) => self.specs_for(id, equipment.known_category())?,
            None => None,
        };
        Ok(EquipmentDetail { equipment, specs })
    }

    /// Looks in the record's own side table first, then the others.
    fn specs_for(&self, id: Uuid, own: Option<EquipmentCategory>) -> Result<Option<CategorySpecs>, CatalogError> {
        let order = own
            .into_iter()
            .chain(EquipmentCategory::ALL.into_iter().filter(|c| Some(*c) != own));
        for category in order {
            let query = Query::new().filter(Filter::eq(SIDE_TABLE_KEY, id)).limit(1);
            if let Some(row) = self.store.select(category.side_table(), &query)?.into_iter().next() {
                let specs = CategorySpecs::from_row(category, Value::Object(row)).map_err(decode)?;
                return Ok(Some(specs));
            }
        }
        Ok(None)
    }

    /// Distinct non-null categories, sorted. Falls back to the fixed list
    /// when the catalog can't be read. `current` is always included.
    pub fn categories(&self, current: Option<&str>) -> Vec<String> {
        let query = Query::new().columns("category").filter(Filter::not_null("category"));
        let mut categories: Vec<String> = match self.store.select(EQUIPMENT_TABLE, &query) {
            Ok(rows) => rows
                .iter()
                .filter_map(|r| r.get("category").and_then(Value::as_str))
                .filter(|c| !c.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                events::degraded("catalog", &e.to_string(), "fallback category list");
                FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect()
            }
        };
        if let Some(current) = current.map(str::trim).filter(|c| !c.is_empty()) {
            categories.push(current.to_string());
        }
        categories.sort_by_key(|c| c.to_lowercase());
        categories.dedup();
        categories
    }
}

fn validate(equipment: &Equipment, specs: Option<&CategorySpecs>) -> Result<(), CatalogError> {
    if equipment.name.trim().is_empty() {
        return Err(CatalogError::Validation {
            field: "name".to_string(),
            message: "is required".to_string(),
        });
    }
    if equipment.category.trim().is_empty() {
        return Err(CatalogError::Validation {
            field: "category".to_string(),
            message: "is required".to_string(),
        });
    }
    if let Some(specs) = specs {
        if equipment.known_category() != Some(specs.category()) {
            return Err(CatalogError::Validation {
                field: "category".to_string(),
                message: format!(
                    "specifications are for {} but the record is in {}",
                    specs.category(),
                    equipment.category
                ),
            });
        }
    }
    Ok(())
}

fn row_id(row: &Row) -> Result<Uuid, CatalogError> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| {
            CatalogError::Backend(BackendError::Decode {
                reason: "inserted row has no id".to_string(),
            })
        })
}

fn to_row(row: Result<Row, serde_json::Error>) -> Result<Row, CatalogError> {
    row.map_err(decode)
}

fn from_row(row: Row) -> Result<Equipment, CatalogError> {
    serde_json::from_value(Value::Object(row)).map_err(decode)
}

fn decode(e: serde_json::Error) -> CatalogError {
    CatalogError::Backend(BackendError::Decode { reason: e.to_string() })
}
