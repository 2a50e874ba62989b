//! Stage grouping for display and export.

use metlab_core::models::{ItemCategory, Recommendation, Stage};

/// Recommendations for one stage, split by category.
#[derive(Debug, Clone, PartialEq)]
pub struct StageGroup {
    pub stage: Stage,
    pub equipment: Vec<Recommendation>,
    pub consumables: Vec<Recommendation>,
}

impl StageGroup {
    fn new(stage: Stage) -> Self {
        Self {
            stage,
            equipment: Vec::new(),
            consumables: Vec::new(),
        }
    }

    pub fn items(&self, category: ItemCategory) -> &[Recommendation] {
        match category {
            ItemCategory::Equipment => &self.equipment,
            ItemCategory::Consumable => &self.consumables,
        }
    }

    /// Non-empty category sections, equipment first.
    pub fn sections(&self) -> impl Iterator<Item = (ItemCategory, &[Recommendation])> + '_ {
        ItemCategory::ALL
            .into_iter()
            .map(|c| (c, self.items(c)))
            .filter(|(_, items)| !items.is_empty())
    }

    pub fn len(&self) -> usize {
        self.equipment.len() + self.consumables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Groups by stage in canonical order, dropping stages with no items.
///
/// Every input recommendation lands in exactly one group, and relative
/// order within a category is preserved.
pub fn group_by_stage(recommendations: &[Recommendation]) -> Vec<StageGroup> {
    let mut groups: Vec<StageGroup> = Stage::CANONICAL_ORDER.into_iter().map(StageGroup::new).collect();
    for rec in recommendations {
        let group = &mut groups[rec.stage.rank()];
        match rec.category {
            ItemCategory::Equipment => group.equipment.push(rec.clone()),
            ItemCategory::Consumable => group.consumables.push(rec.clone()),
        }
    }
    groups.retain(|g| !g.is_empty());
    groups
}
