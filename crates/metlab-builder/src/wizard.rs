//! Four-step intake wizard with progression gates.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use metlab_core::errors::BuilderError;
use metlab_core::models::{IntakeAttributes, Recommendation};

use crate::engine::RecommendationEngine;
use crate::session::SessionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    Stages = 1,
    Sample = 2,
    Workflow = 3,
    Results = 4,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [Self::Stages, Self::Sample, Self::Workflow, Self::Results];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Stages => "Process Stages",
            Self::Sample => "Sample Specifications",
            Self::Workflow => "Workflow Requirements",
            Self::Results => "Recommendations",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }
}

/// Fields still blocking progression out of `step`.
pub fn blocking_fields(step: WizardStep, intake: &IntakeAttributes) -> Vec<&'static str> {
    let mut missing = Vec::new();
    match step {
        WizardStep::Stages => {
            if intake.process_stages.is_empty() {
                missing.push("processStages");
            }
        }
        WizardStep::Sample => {
            if intake.material_type.trim().is_empty() {
                missing.push("materialType");
            }
            if intake.material_hardness.is_none() {
                missing.push("materialHardness");
            }
            if intake.sample_size.is_none() {
                missing.push("sampleSize");
            }
        }
        WizardStep::Workflow => {
            if intake.throughput.is_none() {
                missing.push("throughput");
            }
            if intake.automation.is_none() {
                missing.push("automation");
            }
            if intake.budget.is_none() {
                missing.push("budget");
            }
        }
        WizardStep::Results => {}
    }
    missing
}

pub fn can_proceed(step: WizardStep, intake: &IntakeAttributes) -> bool {
    step != WizardStep::Results && blocking_fields(step, intake).is_empty()
}

/// Wizard state: the intake being built, the current step, and the results
/// of the last generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    pub intake: IntakeAttributes,
    step: WizardStep,
    recommendations: Vec<Recommendation>,
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            intake: IntakeAttributes::fresh(),
            step: WizardStep::Stages,
            recommendations: Vec::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Moves forward one step if the current step is complete. Leaving the
    /// workflow step generates recommendations.
    pub fn advance(&mut self, engine: &RecommendationEngine) -> Result<WizardStep, BuilderError> {
        let blocked = blocking_fields(self.step, &self.intake);
        if !blocked.is_empty() {
            return Err(BuilderError::StepBlocked {
                step: self.step.number(),
                reason: format!("missing {}", blocked.join(", ")),
            });
        }
        let Some(next) = self.step.next() else {
            return Err(BuilderError::StepBlocked {
                step: self.step.number(),
                reason: "already at the last step".to_string(),
            });
        };

        if next == WizardStep::Results {
            self.recommendations = engine.try_generate(&self.intake)?;
        }
        self.step = next;
        info!(step = self.step.number(), "wizard advanced");
        Ok(self.step)
    }

    /// Moves back one step; stays on the first step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.previous() {
            self.step = prev;
        }
        self.step
    }

    /// Regenerates results from the current intake without changing step.
    pub fn regenerate(&mut self, engine: &RecommendationEngine) -> Result<&[Recommendation], BuilderError> {
        self.recommendations = engine.try_generate(&self.intake)?;
        Ok(&self.recommendations)
    }

    /// Discards everything and returns to a fresh first step.
    pub fn start_over(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.intake.clone(), self.step, self.recommendations.clone())
    }

    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let step = WizardStep::from_number(snapshot.step).unwrap_or_else(|| {
            warn!(step = snapshot.step, "invalid saved step, restarting at step 1");
            WizardStep::Stages
        });
        Self {
            intake: snapshot.intake,
            step,
            recommendations: snapshot.recommendations,
        }
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}
