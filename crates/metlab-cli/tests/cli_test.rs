use std::path::PathBuf;

use clap::Parser;
use metlab_cli::cli::{EquipmentCommand, OutputFormat};
use metlab_cli::{Cli, Commands};
use metlab_core::config::{BackendConfig, MetlabConfig};
use metlab_core::models::EquipmentStatus;
use test_fixtures::fixtures_root;

fn steel_intake() -> PathBuf {
    fixtures_root().join("intake/steel_scenario.json")
}

fn run(command: Commands, config: &MetlabConfig) -> anyhow::Result<String> {
    let mut out = Vec::new();
    command.execute(config, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn parses_global_flags_and_subcommands() {
    let cli = Cli::try_parse_from([
        "metlab",
        "--backend-url",
        "https://proj.supabase.co",
        "equipment",
        "list",
        "--status",
        "active",
    ])
    .unwrap();
    assert_eq!(cli.overrides().backend_url.as_deref(), Some("https://proj.supabase.co"));
    match cli.command {
        Commands::Equipment(EquipmentCommand::List { status }) => {
            assert_eq!(status, Some(EquipmentStatus::Active))
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli = Cli::try_parse_from(["metlab", "recommend", "--intake", "x.json", "--format", "pdf"]).unwrap();

    let cli = Cli::try_parse_from(["metlab", "review", "--intake", "x.json", "--name", "Dana", "--email", "d@x.io", "--review-recipient", "lab@example.org", "--log", "debug"])
        .unwrap();
    let overrides = cli.overrides();
    assert_eq!(overrides.review_recipient.as_deref(), Some("lab@example.org"));
    assert_eq!(overrides.log_filter.as_deref(), Some("debug"));
    assert!(matches!(cli.command, Commands::Recommend { format: OutputFormat::Pdf, .. }));
}

#[test]
fn rejects_malformed_fields_and_statuses() {
    assert!(Cli::try_parse_from(["metlab", "equipment", "save", "--set", "novalue"]).is_err());
    assert!(Cli::try_parse_from(["metlab", "equipment", "list", "--status", "retired"]).is_err());
    assert!(Cli::try_parse_from(["metlab", "equipment", "delete", "not-a-uuid"]).is_err());

    let cli = Cli::try_parse_from(["metlab", "equipment", "save", "--set", "name=Saw = Deluxe", "--set", "category=sectioning"])
        .unwrap();
    let Commands::Equipment(EquipmentCommand::Save { fields, id }) = cli.command else {
        panic!("expected save");
    };
    assert_eq!(id, None);
    assert_eq!(fields[0], ("name".to_string(), "Saw = Deluxe".to_string()));
}

#[test]
fn recommend_prints_grouped_text() {
    let out = run(
        Commands::Recommend {
            intake: steel_intake(),
            format: OutputFormat::Text,
            output: None,
        },
        &MetlabConfig::default(),
    )
    .unwrap();
    assert!(out.contains("SECTIONING"));
    assert!(out.contains("10-12 inch Abrasive Cut-off Saw with Automated Table Feed"));
    assert!(out.contains("MOUNTING"));
    assert!(!out.contains("GRINDING"));
}

#[test]
fn recommend_json_round_trips() {
    let out = run(
        Commands::Recommend {
            intake: steel_intake(),
            format: OutputFormat::Json,
            output: None,
        },
        &MetlabConfig::default(),
    )
    .unwrap();
    let recs: Vec<metlab_core::models::Recommendation> = serde_json::from_str(&out).unwrap();
    assert!(!recs.is_empty());
}

#[test]
fn recommend_writes_pdf_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    let out = run(
        Commands::Recommend {
            intake: steel_intake(),
            format: OutputFormat::Pdf,
            output: Some(path.clone()),
        },
        &MetlabConfig::default(),
    )
    .unwrap();
    assert!(out.starts_with("Wrote "));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
}

#[test]
fn recommend_reports_missing_intake_file() {
    let err = run(
        Commands::Recommend {
            intake: PathBuf::from("/nonexistent/intake.json"),
            format: OutputFormat::Text,
            output: None,
        },
        &MetlabConfig::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("reading intake file"));
}

#[test]
fn stages_lists_selectable_stages() {
    let out = run(Commands::Stages, &MetlabConfig::default()).unwrap();
    assert!(out.contains("* sectioning"));
    assert!(out.contains("  etching"));
    assert!(!out.contains("final-polishing "));
}

#[test]
fn review_prints_mail_and_mailto() {
    let review = |mailto| Commands::Review {
        intake: steel_intake(),
        name: "Dana Smith".into(),
        email: "dana@example.com".into(),
        phone: None,
        company: Some("Acme Foundry".into()),
        message: None,
        mailto,
    };

    let text = run(review(false), &MetlabConfig::default()).unwrap();
    assert!(text.starts_with("To: sales@metallographic.com\nSubject: Lab Builder Review Request - Acme Foundry\n"));
    assert!(text.contains("Name: Dana Smith"));

    let url = run(review(true), &MetlabConfig::default()).unwrap();
    assert!(url.starts_with("mailto:sales@metallographic.com?subject=Lab%20Builder%20Review%20Request"));
}

#[test]
fn review_requires_contact_name() {
    let err = run(
        Commands::Review {
            intake: steel_intake(),
            name: " ".into(),
            email: "dana@example.com".into(),
            phone: None,
            company: None,
            message: None,
            mailto: false,
        },
        &MetlabConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("name"));
}

#[test]
fn config_masks_credentials() {
    let config = MetlabConfig {
        backend: BackendConfig {
            url: Some("https://proj.supabase.co".into()),
            api_key: Some("secret-key".into()),
            ..Default::default()
        },
        ..Default::default()
    };
    let out = run(Commands::Config, &config).unwrap();
    assert!(out.contains("https://proj.supabase.co"));
    assert!(!out.contains("secret-key"));
    assert!(out.contains("********"));
}

#[test]
fn catalog_commands_need_a_backend() {
    let err = run(
        Commands::Equipment(EquipmentCommand::List { status: None }),
        &MetlabConfig::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("not configured"));
}

#[test]
fn brochure_upload_validates_before_backend() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("brochure.png");
    std::fs::write(&file, b"\x89PNG").unwrap();

    let cli = Cli::try_parse_from(["metlab", "brochure", "upload", file.to_str().unwrap(), "--item-id", "X1"]).unwrap();
    let err = run(cli.command, &MetlabConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Please select a PDF file"));
}
