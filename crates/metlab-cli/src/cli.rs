use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use metlab_core::config::{CliOverrides, MetlabConfig};
use metlab_core::models::EquipmentStatus;

use crate::commands;

/// metlab - metallographic lab advisor and catalog tool
#[derive(Parser, Debug)]
#[command(name = "metlab")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recommend lab equipment, export results, and maintain the equipment catalog", long_about = None)]
pub struct Cli {
    /// Project directory holding `metlab.toml`
    #[arg(global = true, long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Backend base URL
    #[arg(global = true, long = "backend-url")]
    pub backend_url: Option<String>,

    /// Backend API key
    #[arg(global = true, long = "api-key")]
    pub api_key: Option<String>,

    /// Bearer token of a signed-in admin
    #[arg(global = true, long = "access-token")]
    pub access_token: Option<String>,

    /// Address review requests are sent to
    #[arg(global = true, long = "review-recipient", value_name = "EMAIL")]
    pub review_recipient: Option<String>,

    /// Log filter directive, e.g. `debug` or `metlab_catalog=trace`
    #[arg(global = true, long = "log")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
    Pdf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate recommendations from an intake file
    Recommend {
        /// Intake answers as JSON
        #[arg(long = "intake", value_name = "FILE")]
        intake: PathBuf,

        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file. PDF defaults to `{prefix}-{date}.pdf` in the working directory.
        #[arg(long = "output", short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// List the selectable process stages
    Stages,

    /// Compose an expert review request mail
    Review {
        #[arg(long = "intake", value_name = "FILE")]
        intake: PathBuf,

        #[arg(long = "name")]
        name: String,

        #[arg(long = "email")]
        email: String,

        #[arg(long = "phone")]
        phone: Option<String>,

        #[arg(long = "company")]
        company: Option<String>,

        #[arg(long = "message")]
        message: Option<String>,

        /// Print a `mailto:` URL instead of the mail text
        #[arg(long = "mailto")]
        mailto: bool,
    },

    /// Maintain catalog entries
    #[command(subcommand)]
    Equipment(EquipmentCommand),

    /// Manage product brochures
    #[command(subcommand)]
    Brochure(BrochureCommand),

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand, Debug)]
pub enum EquipmentCommand {
    /// List entries ordered by name
    List {
        #[arg(long = "status", value_parser = parse_status)]
        status: Option<EquipmentStatus>,
    },

    /// Show an active entry by slug or item id
    Show {
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Create or update an entry from `field=value` pairs
    Save {
        /// Existing entry to update
        #[arg(long = "id")]
        id: Option<uuid::Uuid>,

        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_field, required = true)]
        fields: Vec<(String, String)>,
    },

    /// Delete an entry
    Delete {
        #[arg(value_name = "ID")]
        id: uuid::Uuid,
    },

    /// Flip an entry between active and draft
    ToggleStatus {
        #[arg(value_name = "ID")]
        id: uuid::Uuid,
    },
}

#[derive(Subcommand, Debug)]
pub enum BrochureCommand {
    /// Upload a PDF, replacing any earlier brochure of the product
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long = "item-id")]
        item_id: Option<String>,

        #[arg(long = "slug")]
        slug: Option<String>,
    },

    /// Delete a brochure by its public URL
    Delete {
        #[arg(value_name = "URL")]
        url: String,
    },
}

fn parse_status(raw: &str) -> Result<EquipmentStatus, String> {
    raw.parse::<EquipmentStatus>().map_err(|e| e.to_string())
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{raw}'")),
    }
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            backend_url: self.backend_url.clone(),
            api_key: self.api_key.clone(),
            access_token: self.access_token.clone(),
            review_recipient: self.review_recipient.clone(),
            log_filter: self.log_filter.clone(),
        }
    }

    pub fn load_config(&self) -> Result<MetlabConfig> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("cannot determine working directory")?,
        };
        MetlabConfig::load(&root, Some(&self.overrides()))
            .with_context(|| format!("loading configuration from {}", root.display()))
    }

    pub fn run(self) -> Result<()> {
        let config = self.load_config()?;
        metlab_observability::init_tracing(&config.observability);
        debug!(command = ?self.command, "starting");

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.command.execute(&config, &mut out)?;
        out.flush().context("writing output")
    }
}

impl Commands {
    pub fn execute(&self, config: &MetlabConfig, out: &mut dyn Write) -> Result<()> {
        match self {
            Commands::Recommend { intake, format, output } => {
                commands::recommend::run(config, intake, *format, output.as_deref(), out)
            }
            Commands::Stages => commands::recommend::list_stages(out),
            Commands::Review {
                intake,
                name,
                email,
                phone,
                company,
                message,
                mailto,
            } => {
                let request = metlab_export::ReviewRequest {
                    name: name.clone(),
                    email: email.clone(),
                    phone: phone.clone(),
                    company: company.clone(),
                    message: message.clone(),
                };
                commands::review::run(config, intake, &request, *mailto, out)
            }
            Commands::Equipment(cmd) => commands::catalog::equipment(config, cmd, out),
            Commands::Brochure(cmd) => commands::catalog::brochure(config, cmd, out),
            Commands::Config => commands::config::show(config, out),
        }
    }
}
