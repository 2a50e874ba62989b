//! Equipment catalog records: the common base row plus one specification
//! record per category, each stored in its own side table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::SIDE_TABLE_KEY;
use crate::errors::CatalogError;

/// Publication state of a catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    #[default]
    Draft,
    Active,
    Discontinued,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Discontinued => "discontinued",
        }
    }

    /// Active entries go back to draft; everything else becomes active.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Active => Self::Draft,
            _ => Self::Active,
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "discontinued" => Ok(Self::Discontinued),
            other => Err(CatalogError::Validation {
                field: "status".to_string(),
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// Equipment categories that own a specification side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentCategory {
    Sectioning,
    Mounting,
    GrindingPolishing,
    Microscopy,
    HardnessTesting,
    LabFurniture,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 6] = [
        Self::Sectioning,
        Self::Mounting,
        Self::GrindingPolishing,
        Self::Microscopy,
        Self::HardnessTesting,
        Self::LabFurniture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sectioning => "sectioning",
            Self::Mounting => "mounting",
            Self::GrindingPolishing => "grinding-polishing",
            Self::Microscopy => "microscopy",
            Self::HardnessTesting => "hardness-testing",
            Self::LabFurniture => "lab-furniture",
        }
    }

    pub fn side_table(&self) -> &'static str {
        match self {
            Self::Sectioning => "equipment_sectioning",
            Self::Mounting => "equipment_mounting",
            Self::GrindingPolishing => "equipment_grinding_polishing",
            Self::Microscopy => "equipment_microscopy",
            Self::HardnessTesting => "equipment_hardness_testing",
            Self::LabFurniture => "equipment_lab_furniture",
        }
    }

    /// Maps a free-text category to a known one. Unknown categories have no
    /// side table.
    pub fn parse(category: &str) -> Option<Self> {
        let wanted = category.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
    }
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common columns of the `equipment` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub item_id: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub is_pace_product: bool,
    pub product_url: Option<String>,
    pub brochure_url: Option<String>,
    pub image_url: Option<String>,
    /// Gallery entries as stored (objects or plain URLs).
    pub images: Option<Vec<Value>>,
    pub suitable_for_material_types: Option<Vec<String>>,
    pub suitable_for_hardness: Option<Vec<String>>,
    pub suitable_for_sample_sizes: Option<Vec<String>>,
    pub suitable_for_sample_shapes: Option<Vec<String>>,
    pub suitable_for_throughput: Option<Vec<String>>,
    pub suitable_for_applications: Option<Vec<String>>,
    pub min_budget_level: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: EquipmentStatus,
    pub sort_order: i64,
}

impl Equipment {
    pub fn known_category(&self) -> Option<EquipmentCategory> {
        EquipmentCategory::parse(&self.category)
    }

    /// Row written to the base table. The id is assigned by the store.
    pub fn to_row(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut row = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        row.remove("id");
        // Empty lists are stored as null.
        for value in row.values_mut() {
            if matches!(value, Value::Array(items) if items.is_empty()) {
                *value = Value::Null;
            }
        }
        Ok(row)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectioningSpecs {
    pub blade_size_mm: Option<i64>,
    pub blade_size_inches: Option<i64>,
    pub blade_type: Option<String>,
    pub max_cutting_capacity_mm: Option<f64>,
    pub max_cutting_capacity_inches: Option<f64>,
    pub automation_level: Option<String>,
    pub cutting_speed_rpm: Option<i64>,
    pub feed_rate_mm_per_min: Option<f64>,
    pub cooling_system: Option<String>,
    pub sample_holder_type: Option<String>,
    pub precision_level: Option<String>,
    pub motor_power_watts: Option<i64>,
    pub dimensions_mm: Option<Value>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountingSpecs {
    pub mounting_type: Option<String>,
    pub max_pressure_psi: Option<f64>,
    pub max_pressure_mpa: Option<f64>,
    pub pressure_range_psi: Option<String>,
    pub max_temperature_celsius: Option<f64>,
    pub min_temperature_celsius: Option<f64>,
    pub heating_capability: Option<bool>,
    pub cooling_capability: Option<bool>,
    pub chamber_size_mm: Option<Value>,
    pub max_sample_size_mm: Option<Value>,
    pub vacuum_level_mbar: Option<f64>,
    pub vacuum_pump_required: Option<bool>,
    pub programmable_cycles: Option<bool>,
    pub digital_controls: Option<bool>,
    pub safety_features: Option<Vec<String>>,
    pub power_consumption_watts: Option<i64>,
    pub dimensions_mm: Option<Value>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrindingPolishingSpecs {
    pub wheel_size_inches: Option<Vec<f64>>,
    pub platen_material: Option<String>,
    pub number_of_stations: Option<i64>,
    pub automation_level: Option<String>,
    pub speed_range_rpm: Option<String>,
    pub force_range_n: Option<Vec<f64>>,
    pub programmable_force: Option<bool>,
    pub cooling_system: Option<String>,
    pub sample_holder_type: Option<String>,
    pub controlled_removal: Option<bool>,
    pub motor_power_watts: Option<i64>,
    pub dimensions_mm: Option<Value>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroscopySpecs {
    pub microscope_type: Option<String>,
    pub magnification_range: Option<String>,
    pub objective_lenses: Option<Vec<String>>,
    pub eyepiece_magnification: Option<String>,
    pub camera_resolution: Option<String>,
    pub image_analysis_capable: Option<bool>,
    pub measurement_capabilities: Option<Vec<String>>,
    pub illumination_type: Option<Vec<String>>,
    pub light_source: Option<String>,
    pub motorized_stage: Option<bool>,
    pub z_stack_capability: Option<bool>,
    pub live_measurement: Option<bool>,
    pub dimensions_mm: Option<Value>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardnessTestingSpecs {
    pub test_methods: Option<Vec<String>>,
    pub load_range_n: Option<Vec<f64>>,
    pub load_range_kgf: Option<Vec<f64>>,
    pub selectable_loads: Option<Vec<String>>,
    pub max_indentation_depth_mm: Option<f64>,
    pub indenter_types: Option<Vec<String>>,
    pub automation_level: Option<String>,
    pub automatic_loading: Option<bool>,
    pub data_export_capabilities: Option<Vec<String>>,
    pub measurement_accuracy: Option<String>,
    pub digital_display: Option<bool>,
    pub dimensions_mm: Option<Value>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabFurnitureSpecs {
    pub furniture_type: Option<String>,
    pub dimensions_mm: Option<Value>,
    pub work_surface_area_m2: Option<f64>,
    pub material: Option<String>,
    pub surface_material: Option<String>,
    pub weight_capacity_kg: Option<f64>,
    pub storage_capacity: Option<String>,
    pub ventilation_required: Option<bool>,
    pub electrical_outlets: Option<i64>,
    pub drawers: Option<i64>,
    pub shelves: Option<i64>,
    pub locking_mechanism: Option<bool>,
    pub safety_features: Option<Vec<String>>,
    pub weight_kg: Option<f64>,
}

/// Category-specific specification record, one variant per side table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "specs", rename_all = "kebab-case")]
pub enum CategorySpecs {
    Sectioning(SectioningSpecs),
    Mounting(MountingSpecs),
    GrindingPolishing(GrindingPolishingSpecs),
    Microscopy(MicroscopySpecs),
    HardnessTesting(HardnessTestingSpecs),
    LabFurniture(LabFurnitureSpecs),
}

impl CategorySpecs {
    /// Empty record for a category, used when a form carries no spec fields.
    pub fn empty(category: EquipmentCategory) -> Self {
        match category {
            EquipmentCategory::Sectioning => Self::Sectioning(SectioningSpecs::default()),
            EquipmentCategory::Mounting => Self::Mounting(MountingSpecs::default()),
            EquipmentCategory::GrindingPolishing => {
                Self::GrindingPolishing(GrindingPolishingSpecs::default())
            }
            EquipmentCategory::Microscopy => Self::Microscopy(MicroscopySpecs::default()),
            EquipmentCategory::HardnessTesting => {
                Self::HardnessTesting(HardnessTestingSpecs::default())
            }
            EquipmentCategory::LabFurniture => Self::LabFurniture(LabFurnitureSpecs::default()),
        }
    }

    pub fn category(&self) -> EquipmentCategory {
        match self {
            Self::Sectioning(_) => EquipmentCategory::Sectioning,
            Self::Mounting(_) => EquipmentCategory::Mounting,
            Self::GrindingPolishing(_) => EquipmentCategory::GrindingPolishing,
            Self::Microscopy(_) => EquipmentCategory::Microscopy,
            Self::HardnessTesting(_) => EquipmentCategory::HardnessTesting,
            Self::LabFurniture(_) => EquipmentCategory::LabFurniture,
        }
    }

    pub fn side_table(&self) -> &'static str {
        self.category().side_table()
    }

    fn fields(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Sectioning(s) => serde_json::to_value(s),
            Self::Mounting(s) => serde_json::to_value(s),
            Self::GrindingPolishing(s) => serde_json::to_value(s),
            Self::Microscopy(s) => serde_json::to_value(s),
            Self::HardnessTesting(s) => serde_json::to_value(s),
            Self::LabFurniture(s) => serde_json::to_value(s),
        }
    }

    /// Side-table row keyed by `equipment_id`, with unset fields omitted.
    pub fn to_row(&self, equipment_id: Uuid) -> Result<Map<String, Value>, serde_json::Error> {
        let mut row = Map::new();
        row.insert(SIDE_TABLE_KEY.to_string(), Value::String(equipment_id.to_string()));
        if let Value::Object(fields) = self.fields()? {
            row.extend(fields.into_iter().filter(|(_, v)| !v.is_null()));
        }
        Ok(row)
    }

    /// Reads a side-table row back. Bookkeeping columns are ignored.
    pub fn from_row(category: EquipmentCategory, row: Value) -> Result<Self, serde_json::Error> {
        Ok(match category {
            EquipmentCategory::Sectioning => Self::Sectioning(serde_json::from_value(row)?),
            EquipmentCategory::Mounting => Self::Mounting(serde_json::from_value(row)?),
            EquipmentCategory::GrindingPolishing => {
                Self::GrindingPolishing(serde_json::from_value(row)?)
            }
            EquipmentCategory::Microscopy => Self::Microscopy(serde_json::from_value(row)?),
            EquipmentCategory::HardnessTesting => {
                Self::HardnessTesting(serde_json::from_value(row)?)
            }
            EquipmentCategory::LabFurniture => Self::LabFurniture(serde_json::from_value(row)?),
        })
    }

    /// True when no specification field is set.
    pub fn is_empty(&self) -> bool {
        match self.fields() {
            Ok(Value::Object(fields)) => fields.values().all(Value::is_null),
            _ => true,
        }
    }
}

/// A base record joined with its specification record, as shown on a
/// product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDetail {
    #[serde(flatten)]
    pub equipment: Equipment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<CategorySpecs>,
}
