use serde::{Deserialize, Serialize};

use crate::errors::BuilderError;

/// One step of the metallographic preparation workflow.
///
/// Declaration order is the canonical rendering order, so the derived `Ord`
/// sorts stages the way results are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Sectioning,
    Mounting,
    Grinding,
    Polishing,
    FinalPolishing,
    Etching,
    Microscopy,
    Cleaning,
    Hardness,
}

impl Stage {
    /// Rendering order for grouped results.
    pub const CANONICAL_ORDER: [Stage; 9] = [
        Self::Sectioning,
        Self::Mounting,
        Self::Grinding,
        Self::Polishing,
        Self::FinalPolishing,
        Self::Etching,
        Self::Microscopy,
        Self::Cleaning,
        Self::Hardness,
    ];

    /// Stages a user can tick in the first wizard step. Final polishing is
    /// implied by polishing.
    pub const SELECTABLE: [Stage; 8] = [
        Self::Sectioning,
        Self::Mounting,
        Self::Grinding,
        Self::Polishing,
        Self::Etching,
        Self::Microscopy,
        Self::Cleaning,
        Self::Hardness,
    ];

    /// Pre-selected stages of a fresh wizard.
    pub const DEFAULT_SELECTION: [Stage; 4] = [
        Self::Sectioning,
        Self::Mounting,
        Self::Grinding,
        Self::Polishing,
    ];

    /// Wire identifier, e.g. `final-polishing`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sectioning => "sectioning",
            Self::Mounting => "mounting",
            Self::Grinding => "grinding",
            Self::Polishing => "polishing",
            Self::FinalPolishing => "final-polishing",
            Self::Etching => "etching",
            Self::Microscopy => "microscopy",
            Self::Cleaning => "cleaning",
            Self::Hardness => "hardness",
        }
    }

    /// Heading used in rendered results.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sectioning => "Sectioning",
            Self::Mounting => "Mounting",
            Self::Grinding => "Grinding",
            Self::Polishing => "Polishing",
            Self::FinalPolishing => "Final Polishing",
            Self::Etching => "Etching",
            Self::Microscopy => "Microscopy",
            Self::Cleaning => "Cleaning",
            Self::Hardness => "Hardness Testing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Sectioning => "Cutting and sample preparation equipment",
            Self::Mounting => "Sample mounting equipment and materials",
            Self::Grinding => "Grinding equipment and abrasives",
            Self::Polishing => "Polishing equipment and consumables",
            Self::FinalPolishing => "Final polishing suspensions and cloths",
            Self::Etching => "Etchants and etching supplies",
            Self::Microscopy => "Microscopes and imaging equipment",
            Self::Cleaning => "Sample cleaning equipment",
            Self::Hardness => "Hardness testing equipment",
        }
    }

    /// Position in [`Stage::CANONICAL_ORDER`].
    pub fn rank(&self) -> usize {
        *self as usize
    }

    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::FinalPolishing)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::CANONICAL_ORDER
            .iter()
            .copied()
            .find(|stage| {
                stage.as_str().eq_ignore_ascii_case(wanted)
                    || stage.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| BuilderError::InvalidValue {
                field: "stage".to_string(),
                value: s.to_string(),
            })
    }
}
