//! Subcommand implementations. Each writes its result to the given writer.

pub mod catalog;
pub mod config;
pub mod recommend;
pub mod review;

use std::path::Path;

use anyhow::{Context, Result};

use metlab_core::models::IntakeAttributes;

/// Reads intake answers from a JSON file.
pub fn load_intake(path: &Path) -> Result<IntakeAttributes> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading intake file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing intake file {}", path.display()))
}
