use serde::{Deserialize, Serialize};

use super::stage::Stage;

/// Whether a recommendation is a piece of equipment or a consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Equipment,
    Consumable,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 2] = [Self::Equipment, Self::Consumable];

    /// Subheading used when rendering a stage group.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Equipment => "Equipment",
            Self::Consumable => "Consumables",
        }
    }
}

/// One suggested item for one stage, with its justification. Reasoning may
/// contain markdown links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub stage: Stage,
    pub category: ItemCategory,
    #[serde(rename = "type")]
    pub item_type: String,
    pub reasoning: String,
}

impl Recommendation {
    pub fn equipment(stage: Stage, item_type: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            stage,
            category: ItemCategory::Equipment,
            item_type: item_type.into(),
            reasoning: reasoning.into(),
        }
    }

    pub fn consumable(stage: Stage, item_type: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            stage,
            category: ItemCategory::Consumable,
            item_type: item_type.into(),
            reasoning: reasoning.into(),
        }
    }
}
