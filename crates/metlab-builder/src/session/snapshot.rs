//! Versioned, serializable wizard state.
//!
//! Version 1 stored the intake under `formData` and the step as either a
//! number or a string; it restores with defaults for anything missing.
//! Snapshots newer than [`SESSION_FORMAT_VERSION`] are refused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use metlab_core::constants::{SESSION_FORMAT_VERSION, WIZARD_STEPS};
use metlab_core::errors::SessionError;
use metlab_core::models::{IntakeAttributes, Recommendation};

use crate::wizard::WizardStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub version: u32,
    pub intake: IntakeAttributes,
    /// Wizard step, 1-based.
    pub step: u8,
    pub recommendations: Vec<Recommendation>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSnapshot {
    version: Option<u32>,
    #[serde(alias = "formData")]
    intake: IntakeAttributes,
    step: Value,
    recommendations: Vec<Recommendation>,
    saved_at: Option<DateTime<Utc>>,
}

impl Default for RawSnapshot {
    fn default() -> Self {
        Self {
            version: None,
            intake: IntakeAttributes::fresh(),
            step: Value::Null,
            recommendations: Vec::new(),
            saved_at: None,
        }
    }
}

impl SessionSnapshot {
    pub fn new(intake: IntakeAttributes, step: WizardStep, recommendations: Vec<Recommendation>) -> Self {
        Self {
            version: SESSION_FORMAT_VERSION,
            intake,
            step: step.number(),
            recommendations,
            saved_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|e| SessionError::Corrupt {
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let value: Value = serde_json::from_str(json).map_err(|e| SessionError::Corrupt {
            reason: e.to_string(),
        })?;
        Self::from_value(value)
    }

    pub fn from_value(mut value: Value) -> Result<Self, SessionError> {
        let Some(envelope) = value.as_object_mut() else {
            return Err(SessionError::Corrupt {
                reason: "snapshot is not a JSON object".to_string(),
            });
        };
        // Older clients saved unanswered selects as "".
        for key in ["intake", "formData"] {
            if let Some(Value::Object(fields)) = envelope.get_mut(key) {
                fields.retain(|_, v| v.as_str() != Some(""));
            }
        }
        let raw: RawSnapshot = serde_json::from_value(value).map_err(|e| SessionError::Corrupt {
            reason: e.to_string(),
        })?;

        let version = raw.version.unwrap_or(1);
        if version > SESSION_FORMAT_VERSION {
            return Err(SessionError::UnsupportedVersion {
                found: version,
                supported: SESSION_FORMAT_VERSION,
            });
        }

        Ok(Self {
            version: SESSION_FORMAT_VERSION,
            intake: raw.intake,
            step: normalize_step(&raw.step),
            recommendations: raw.recommendations,
            saved_at: raw.saved_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Accepts a number or numeric string in `1..=WIZARD_STEPS`; anything else
/// restarts the wizard.
fn normalize_step(value: &Value) -> u8 {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if (1..=u64::from(WIZARD_STEPS)).contains(&n) => n as u8,
        _ => 1,
    }
}
