//! Core types, traits, errors, config, and constants shared by every metlab
//! crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

pub use config::MetlabConfig;
pub use errors::{MetlabError, MetlabResult};
pub use models::{IntakeAttributes, Recommendation, Stage};
