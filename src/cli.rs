//! Command-line surface.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::encode::ProfileKind;
use crate::landing::LandingLink;
use crate::model::{Mode, Record};
use crate::render::{ExportFormat, QrRenderer, downloads_dir, export_image, unique_path, write_export};
use crate::session::FormSession;

#[derive(Parser, Debug)]
#[command(
    name = "gits-qr",
    version,
    about = "Turn contact form records into QR payloads, labels and images"
)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the record comes from and how to read it.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordArgs {
    /// Record file (.json or .toml); a blank record when omitted
    #[arg(long, value_name = "PATH")]
    pub record: Option<PathBuf>,

    /// Output mode: phone-contact, social-media or text-message
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Field profile: repeatable, fixed-label or landing
    #[arg(long)]
    pub profile: Option<ProfileKind>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the QR payload for a record
    Payload {
        #[command(flatten)]
        input: RecordArgs,
    },

    /// Show the overlay label, export filename and platform tags
    Describe {
        #[command(flatten)]
        input: RecordArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the QR code with its footer into an image file
    Export {
        #[command(flatten)]
        input: RecordArgs,

        /// Output directory (defaults to the downloads directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Image format: png or svg
        #[arg(long, default_value = "png")]
        format: ExportFormat,
    },

    /// Build or open contact landing links
    Landing {
        #[command(subcommand)]
        command: LandingCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum LandingCommand {
    /// Print a landing link carrying the record's contact details
    Build {
        /// Record file (.json or .toml)
        #[arg(long, value_name = "PATH")]
        record: PathBuf,

        /// Landing page URL the query is appended to
        #[arg(long, value_name = "URL")]
        base_url: String,
    },

    /// Decode a landing link and save its contact card as a .vcf file
    Open {
        url: String,

        /// Output directory (defaults to the downloads directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

/// Load the config file named on the command line, or the default one.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            AppConfig::load_from(path)
        }
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;
    Ok(config)
}

/// Read a record from a `.json` or `.toml` file.
///
/// Returns the record and whether the file chose a mode itself.
pub fn load_record(path: &Path) -> anyhow::Result<(Record, bool)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read record {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let (record, has_mode) = match ext.as_deref() {
        Some("json") => {
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON in {}", path.display()))?;
            let has_mode = value.get("mode").is_some();
            let record: Record = serde_json::from_value(value)
                .with_context(|| format!("invalid record in {}", path.display()))?;
            (record, has_mode)
        }
        Some("toml") => {
            let table: toml::Table = toml::from_str(&text)
                .with_context(|| format!("invalid TOML in {}", path.display()))?;
            let has_mode = table.contains_key("mode");
            let record = toml::Value::Table(table)
                .try_into::<Record>()
                .with_context(|| format!("invalid record in {}", path.display()))?;
            (record, has_mode)
        }
        _ => bail!(
            "unsupported record file {} (expected .json or .toml)",
            path.display()
        ),
    };

    debug!(path = %path.display(), mode = %record.mode, "loaded record");
    Ok((record, has_mode))
}

/// Build a session from the record arguments. Mode precedence is
/// `--mode`, then the record file, then `default_mode` from config.
fn open_session(input: &RecordArgs, config: &AppConfig) -> anyhow::Result<FormSession> {
    let (record, has_mode) = match &input.record {
        Some(path) => load_record(path)?,
        None => (Record::new(), false),
    };

    let mode = match input.mode {
        Some(mode) => mode,
        None if has_mode => record.mode,
        None => config.default_mode,
    };

    let mut config = config.clone();
    if let Some(profile) = input.profile {
        config.profile = profile;
    }

    Ok(FormSession::from_config(record.with_mode(mode), &config))
}

/// Run a parsed command line, writing user-facing output to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Payload { input } => {
            let view = open_session(&input, &config)?.view();
            writeln!(out, "{}", view.payload)?;
        }

        Commands::Describe { input, json } => {
            let view = open_session(&input, &config)?.view();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                writeln!(out, "mode:     {}", view.mode)?;
                writeln!(out, "label:    {}", view.label)?;
                writeln!(out, "filename: {}", view.filename)?;
                if !view.tags.is_empty() {
                    writeln!(out, "tags:     {}", view.tags.join(", "))?;
                }
                if !view.has_content {
                    writeln!(out, "note:     record has nothing to encode for this mode")?;
                }
            }
        }

        Commands::Export { input, out: dir, format } => {
            let view = open_session(&input, &config)?.view();
            let renderer = QrRenderer::new(config.render_options());
            let image = export_image(&renderer, &view.payload, &view.label, &view.filename, format)
                .context("failed to render QR code")?;
            let dir = dir.unwrap_or_else(downloads_dir);
            let path = write_export(&dir, &image)
                .with_context(|| format!("failed to write export into {}", dir.display()))?;
            writeln!(out, "{}", path.display())?;
        }

        Commands::Landing { command } => match command {
            LandingCommand::Build { record, base_url } => {
                let (record, _) = load_record(&record)?;
                let link = LandingLink::build(&base_url, &record)
                    .context("failed to build landing link")?;
                writeln!(out, "{link}")?;
            }

            LandingCommand::Open { url, out: dir } => {
                let payload = LandingLink::parse(&url).context("failed to read landing link")?;
                let dir = dir.unwrap_or_else(downloads_dir);
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
                let path = unique_path(&dir, &payload.vcf_filename());
                std::fs::write(&path, payload.vcard())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "saved landing contact");

                writeln!(out, "{}", path.display())?;
                if let Some(linked_in) = payload.linked_in {
                    writeln!(out, "{linked_in}")?;
                }
            }
        },
    }

    Ok(())
}
