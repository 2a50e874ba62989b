//! Lab Builder: turns intake answers into equipment and consumable
//! recommendations, and keeps wizard state between requests.

pub mod defaults;
pub mod engine;
pub mod profile;
pub mod rules;
pub mod session;
pub mod wizard;

pub use engine::{generate, try_generate, validate_required, RecommendationEngine};
pub use profile::SampleProfile;
pub use session::{SessionManager, SessionSnapshot};
pub use wizard::{blocking_fields, can_proceed, Wizard, WizardStep};
