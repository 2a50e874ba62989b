use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};

use metlab_catalog::remote::{PostgrestStore, StorageStore};
use metlab_catalog::{BrochureService, BrochureUpload, EquipmentForm, EquipmentService};
use metlab_core::config::MetlabConfig;
use metlab_core::constants::BROCHURE_CONTENT_TYPE;
use metlab_observability::catalog_span;
use metlab_observability::tracing_setup::events;

use crate::cli::{BrochureCommand, EquipmentCommand};

fn equipment_service(config: &MetlabConfig) -> Result<EquipmentService> {
    let store = PostgrestStore::from_config(&config.backend).context("backend table API")?;
    Ok(EquipmentService::new(Arc::new(store)))
}

fn brochure_service(config: &MetlabConfig) -> Result<BrochureService> {
    let store = StorageStore::from_config(&config.backend).context("backend storage API")?;
    Ok(BrochureService::new(Arc::new(store)))
}

pub fn equipment(config: &MetlabConfig, cmd: &EquipmentCommand, out: &mut dyn Write) -> Result<()> {
    let service = equipment_service(config)?;
    match cmd {
        EquipmentCommand::List { status } => {
            let _span = catalog_span!("list", status.map(|s| s.as_str()).unwrap_or("all")).entered();
            let entries = service.list(*status)?;
            for entry in &entries {
                writeln!(
                    out,
                    "{:<38} {:<12} {:<20} {}",
                    entry.id.map(|id| id.to_string()).unwrap_or_default(),
                    entry.status.as_str(),
                    entry.category,
                    entry.name
                )?;
            }
            writeln!(out, "{} entries", entries.len())?;
        }
        EquipmentCommand::Show { key } => {
            let _span = catalog_span!("show", key).entered();
            let detail = service.find_active(key)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&detail)?)?;
        }
        EquipmentCommand::Save { id, fields } => {
            let key = id.map(|id| id.to_string()).unwrap_or_else(|| "new".to_string());
            let _span = catalog_span!("save", key).entered();
            let form: EquipmentForm = fields.iter().cloned().collect();
            let saved = service.save_form(*id, &form)?;
            let action = if id.is_some() { "updated" } else { "created" };
            events::equipment_changed(&saved.to_string(), action);
            writeln!(out, "{action} {saved}")?;
        }
        EquipmentCommand::Delete { id } => {
            let _span = catalog_span!("delete", id).entered();
            service.delete(*id)?;
            events::equipment_changed(&id.to_string(), "deleted");
            writeln!(out, "deleted {id}")?;
        }
        EquipmentCommand::ToggleStatus { id } => {
            let _span = catalog_span!("toggle-status", id).entered();
            let status = service.toggle_status(*id)?;
            events::equipment_changed(&id.to_string(), status.as_str());
            writeln!(out, "{id} is now {status}")?;
        }
    }
    Ok(())
}

pub fn brochure(config: &MetlabConfig, cmd: &BrochureCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        BrochureCommand::Upload { file, item_id, slug } => {
            let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
            let upload = BrochureUpload {
                item_id: item_id.clone(),
                slug: slug.clone(),
                content_type: content_type_for(file),
                bytes,
            };
            // Reject bad files before touching the backend.
            upload.validate()?;
            let _span = catalog_span!("brochure-upload", upload.object_name()).entered();
            let url = brochure_service(config)?.upload(&upload)?;
            events::brochure_stored(&url, upload.bytes.len());
            writeln!(out, "{url}")?;
        }
        BrochureCommand::Delete { url } => {
            let _span = catalog_span!("brochure-delete", url).entered();
            brochure_service(config)?.delete_by_url(url)?;
            writeln!(out, "deleted {url}")?;
        }
    }
    Ok(())
}

/// Content type from the file extension; only `.pdf` counts as a brochure.
pub fn content_type_for(path: &std::path::Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => BROCHURE_CONTENT_TYPE.to_string(),
        Some(ext) => format!("application/x-{}", ext.to_ascii_lowercase()),
        None => "application/octet-stream".to_string(),
    }
}
