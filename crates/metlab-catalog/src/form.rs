//! Admin form fields to catalog records.
//!
//! Form values arrive as strings. Blank values are treated as unset; list
//! fields are comma separated; `images` and dimension fields hold JSON.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use metlab_core::errors::CatalogError;
use metlab_core::models::{CategorySpecs, Equipment, EquipmentCategory, EquipmentStatus};

/// Raw form submission, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentForm {
    fields: BTreeMap<String, String>,
}

impl EquipmentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Trimmed value, `None` when missing or blank.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Trimmed value, blank included.
    fn submitted(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|v| v.trim())
    }

    fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_string)
    }

    fn list(&self, field: &str) -> Option<Vec<String>> {
        self.get(field).and_then(parse_list)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EquipmentForm {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (k, v) in iter {
            form.set(k, v);
        }
        form
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Int,
    Float,
    Bool,
    TextList,
    NumberList,
    Json,
}

use FieldKind::*;

const SECTIONING_FIELDS: &[(&str, FieldKind)] = &[
    ("blade_size_mm", Int),
    ("blade_size_inches", Int),
    ("blade_type", Text),
    ("max_cutting_capacity_mm", Float),
    ("max_cutting_capacity_inches", Float),
    ("automation_level", Text),
    ("cutting_speed_rpm", Int),
    ("feed_rate_mm_per_min", Float),
    ("cooling_system", Text),
    ("sample_holder_type", Text),
    ("precision_level", Text),
    ("motor_power_watts", Int),
    ("dimensions_mm", Json),
    ("weight_kg", Float),
];

const MOUNTING_FIELDS: &[(&str, FieldKind)] = &[
    ("mounting_type", Text),
    ("max_pressure_psi", Float),
    ("max_pressure_mpa", Float),
    ("pressure_range_psi", Text),
    ("max_temperature_celsius", Float),
    ("min_temperature_celsius", Float),
    ("heating_capability", Bool),
    ("cooling_capability", Bool),
    ("chamber_size_mm", Json),
    ("max_sample_size_mm", Json),
    ("vacuum_level_mbar", Float),
    ("vacuum_pump_required", Bool),
    ("programmable_cycles", Bool),
    ("digital_controls", Bool),
    ("safety_features", TextList),
    ("power_consumption_watts", Int),
    ("dimensions_mm", Json),
    ("weight_kg", Float),
];

const GRINDING_POLISHING_FIELDS: &[(&str, FieldKind)] = &[
    ("wheel_size_inches", NumberList),
    ("platen_material", Text),
    ("number_of_stations", Int),
    ("automation_level", Text),
    ("speed_range_rpm", Text),
    ("force_range_n", NumberList),
    ("programmable_force", Bool),
    ("cooling_system", Text),
    ("sample_holder_type", Text),
    ("controlled_removal", Bool),
    ("motor_power_watts", Int),
    ("dimensions_mm", Json),
    ("weight_kg", Float),
];

const MICROSCOPY_FIELDS: &[(&str, FieldKind)] = &[
    ("microscope_type", Text),
    ("magnification_range", Text),
    ("objective_lenses", TextList),
    ("eyepiece_magnification", Text),
    ("camera_resolution", Text),
    ("image_analysis_capable", Bool),
    ("measurement_capabilities", TextList),
    ("illumination_type", TextList),
    ("light_source", Text),
    ("motorized_stage", Bool),
    ("z_stack_capability", Bool),
    ("live_measurement", Bool),
    ("dimensions_mm", Json),
    ("weight_kg", Float),
];

const HARDNESS_TESTING_FIELDS: &[(&str, FieldKind)] = &[
    ("test_methods", TextList),
    ("load_range_n", NumberList),
    ("load_range_kgf", NumberList),
    ("selectable_loads", TextList),
    ("max_indentation_depth_mm", Float),
    ("indenter_types", TextList),
    ("automation_level", Text),
    ("automatic_loading", Bool),
    ("data_export_capabilities", TextList),
    ("measurement_accuracy", Text),
    ("digital_display", Bool),
    ("dimensions_mm", Json),
    ("weight_kg", Float),
];

const LAB_FURNITURE_FIELDS: &[(&str, FieldKind)] = &[
    ("furniture_type", Text),
    ("dimensions_mm", Json),
    ("material", Text),
    ("surface_material", Text),
    ("weight_capacity_kg", Float),
    ("storage_capacity", Text),
    ("ventilation_required", Bool),
    ("electrical_outlets", Int),
    ("drawers", Int),
    ("shelves", Int),
    ("locking_mechanism", Bool),
    ("safety_features", TextList),
    ("weight_kg", Float),
];

fn spec_fields(category: EquipmentCategory) -> &'static [(&'static str, FieldKind)] {
    match category {
        EquipmentCategory::Sectioning => SECTIONING_FIELDS,
        EquipmentCategory::Mounting => MOUNTING_FIELDS,
        EquipmentCategory::GrindingPolishing => GRINDING_POLISHING_FIELDS,
        EquipmentCategory::Microscopy => MICROSCOPY_FIELDS,
        EquipmentCategory::HardnessTesting => HARDNESS_TESTING_FIELDS,
        EquipmentCategory::LabFurniture => LAB_FURNITURE_FIELDS,
    }
}

/// Base record from the common form fields.
pub fn parse_equipment(form: &EquipmentForm) -> Result<Equipment, CatalogError> {
    let name = form.text("name").ok_or_else(|| required("name"))?;
    let category = form.text("category").ok_or_else(|| required("category"))?;
    let status = match form.get("status") {
        Some(s) => s.parse::<EquipmentStatus>()?,
        None => EquipmentStatus::default(),
    };
    let slug = form
        .text("slug")
        .or_else(|| Some(slugify(&name)).filter(|s| !s.is_empty()));

    Ok(Equipment {
        id: None,
        item_id: form.text("item_id"),
        slug,
        description: form.text("description"),
        category,
        subcategory: form.text("subcategory"),
        is_pace_product: form.get("is_pace_product").and_then(parse_bool).unwrap_or(false),
        product_url: form.text("product_url"),
        brochure_url: form.text("brochure_url"),
        image_url: form.text("image_url"),
        images: form.get("images").and_then(parse_images),
        suitable_for_material_types: form.list("suitable_for_material_types"),
        suitable_for_hardness: form.list("suitable_for_hardness"),
        suitable_for_sample_sizes: form.list("suitable_for_sample_sizes"),
        suitable_for_sample_shapes: form.list("suitable_for_sample_shapes"),
        suitable_for_throughput: form.list("suitable_for_throughput"),
        suitable_for_applications: form.list("suitable_for_applications"),
        min_budget_level: form.text("min_budget_level"),
        tags: form.list("tags"),
        status,
        sort_order: form.get("sort_order").and_then(parse_int).unwrap_or(0),
        name,
    })
}

/// Specification record for `category`. Unset or unparseable fields stay
/// `None`, except that a submitted blank boolean reads as `false`.
pub fn parse_specs(category: EquipmentCategory, form: &EquipmentForm) -> Result<CategorySpecs, CatalogError> {
    let mut row = Map::new();
    for (field, kind) in spec_fields(category) {
        let raw = if *kind == Bool { form.submitted(field) } else { form.get(field) };
        let Some(raw) = raw else { continue };
        let value = match kind {
            Text => Some(Value::String(raw.to_string())),
            Int => parse_int(raw).map(Value::from),
            Float => parse_float(raw).and_then(Number::from_f64).map(Value::Number),
            Bool => parse_bool(raw).map(Value::Bool),
            TextList => parse_list(raw).map(Value::from),
            NumberList => parse_number_list(raw).map(|nums| {
                Value::Array(nums.into_iter().filter_map(Number::from_f64).map(Value::Number).collect())
            }),
            Json => parse_json_object(raw),
        };
        if let Some(value) = value {
            row.insert(field.to_string(), value);
        }
    }
    CategorySpecs::from_row(category, Value::Object(row)).map_err(|e| CatalogError::Validation {
        field: category.side_table().to_string(),
        message: e.to_string(),
    })
}

/// Lower-cased, runs of anything but `a-z0-9` collapsed to one `-`, with
/// no leading or trailing dash.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn required(field: &str) -> CatalogError {
    CatalogError::Validation {
        field: field.to_string(),
        message: "is required".to_string(),
    }
}

fn parse_list(raw: &str) -> Option<Vec<String>> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}

fn parse_number_list(raw: &str) -> Option<Vec<f64>> {
    let nums: Vec<f64> = raw.split(',').filter_map(|s| parse_float(s.trim())).collect();
    (!nums.is_empty()).then_some(nums)
}

/// `true`/`1` and `false`/`0`/blank, case-insensitive.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Integer prefix, so `"12.5"` reads as 12.
fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_images(raw: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) if !items.is_empty() => Some(items),
        _ => None,
    }
}

fn parse_json_object(raw: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Object(_) | Value::Array(_))) => Some(v),
        _ => None,
    }
}
