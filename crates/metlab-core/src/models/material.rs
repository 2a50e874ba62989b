use serde::{Deserialize, Serialize};

/// A material picked from the materials database, carrying its own
/// preparation sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardness_category: Option<String>,
    /// Rockwell C hardness from the materials database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardness_hrc: Option<f64>,
    /// Grit designations, coarse to fine (e.g. `"240"`).
    pub recommended_grinding_sequence: Vec<String>,
    /// Diamond sizes in µm, coarse to fine (e.g. `"9"`, `"0.25"`).
    pub recommended_polishing_sequence: Vec<String>,
}

impl MaterialProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn grinding_sequence(&self) -> Option<&[String]> {
        non_empty(&self.recommended_grinding_sequence)
    }

    pub fn polishing_sequence(&self) -> Option<&[String]> {
        non_empty(&self.recommended_polishing_sequence)
    }
}

fn non_empty(seq: &[String]) -> Option<&[String]> {
    if seq.is_empty() {
        None
    } else {
        Some(seq)
    }
}
