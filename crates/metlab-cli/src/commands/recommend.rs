use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use metlab_builder::RecommendationEngine;
use metlab_core::config::MetlabConfig;
use metlab_core::models::Stage;
use metlab_export::{create_renderer, export_pdf, group_by_stage, pdf_filename, PdfOptions};
use metlab_observability::tracing_setup::events;
use metlab_observability::{export_span, recommend_span};

use super::load_intake;
use crate::cli::OutputFormat;

pub fn run(
    config: &MetlabConfig,
    intake_path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let intake = load_intake(intake_path)?;
    let engine = RecommendationEngine::from_config(&config.builder);

    let recommendations = {
        let _span = recommend_span!(intake.process_stages.len()).entered();
        let recs = engine.try_generate(&intake)?;
        let stages: Vec<&str> = engine
            .emitted_stages(&intake)
            .iter()
            .map(Stage::as_str)
            .collect();
        events::recommendations_generated(recs.len(), &stages);
        recs
    };

    let format_name = match format {
        OutputFormat::Text => "text",
        OutputFormat::Markdown => "markdown",
        OutputFormat::Json => "json",
        OutputFormat::Pdf => "pdf",
    };
    let _span = export_span!(format_name).entered();

    match format {
        OutputFormat::Text | OutputFormat::Markdown => {
            let renderer = create_renderer(format_name)
                .with_context(|| format!("no renderer for format {format_name}"))?;
            let rendered = renderer.render(&group_by_stage(&recommendations));
            emit(rendered.as_bytes(), output, out)
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&recommendations)?;
            emit(format!("{json}\n").as_bytes(), output, out)
        }
        OutputFormat::Pdf => {
            let now = Utc::now();
            let options = PdfOptions {
                site_label: config.export.effective_site_label().to_string(),
                generated: now,
            };
            let document = export_pdf(&recommendations, &options)?;
            let path = output.map(Path::to_path_buf).unwrap_or_else(|| {
                PathBuf::from(pdf_filename(
                    config.export.effective_pdf_file_prefix(),
                    now.date_naive(),
                ))
            });
            let bytes = document.to_bytes()?;
            std::fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            events::pdf_exported(&path.display().to_string(), document.page_count(), bytes.len());
            writeln!(out, "Wrote {}", path.display())?;
            Ok(())
        }
    }
}

fn emit(bytes: &[u8], output: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
            writeln!(out, "Wrote {}", path.display())?;
        }
        None => out.write_all(bytes)?,
    }
    Ok(())
}

pub fn list_stages(out: &mut dyn Write) -> Result<()> {
    for stage in Stage::SELECTABLE {
        let marker = if Stage::DEFAULT_SELECTION.contains(&stage) { "*" } else { " " };
        writeln!(out, "{marker} {:<12} {:<18} {}", stage.as_str(), stage.label(), stage.description())?;
    }
    writeln!(out)?;
    writeln!(out, "* selected by default; final polishing comes with polishing")?;
    Ok(())
}
