// kit-ui command line: render tiles and move sessions through the record store.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use kit_core::KitColor;
use kit_design::{
    load_session, save_session, validate_tile_size, DesignSession, EditorConfig, KitSize,
    KitTemplate,
};
use kit_record::{
    share_link, DesignSync, LoadOutcome, LocalRecordStore, SaveContext, SaveOutcome,
};
use kit_ui::{generate_texture_for_id, project_with, save_png, PreviewSettings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kit-ui", version, about = "Football kit designer tools")]
#[command(arg_required_else_help(true))]
struct Cli {
    /// Editor config file (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start a new session file
    New {
        session: PathBuf,
        #[arg(long, default_value = "M")]
        size: KitSize,
        #[arg(long)]
        model: Option<String>,
        /// Start from a built-in template, by name
        #[arg(long)]
        template: Option<String>,
    },
    /// Write one pattern tile as PNG
    Tile {
        #[arg(long)]
        base: KitColor,
        #[arg(long)]
        secondary: Option<KitColor>,
        #[arg(long, default_value = "solid")]
        pattern: String,
        /// Tile edge in pixels; the config value when omitted
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the render parameters for a session
    Preview { session: PathBuf },
    /// Print the record API payload for a session
    Payload { session: PathBuf },
    /// Print a share link for a session
    Share {
        session: PathBuf,
        #[arg(long, default_value = "http://localhost:5173")]
        origin: String,
    },
    /// Save a session to a local record store
    Save {
        session: PathBuf,
        #[arg(long)]
        records: PathBuf,
    },
    /// Load a record from a local record store into a new session file
    Load {
        record_id: String,
        #[arg(long)]
        records: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = EditorConfig::load_or_default(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    run(cli.command, &config)
}

fn run(command: Command, config: &EditorConfig) -> anyhow::Result<()> {
    match command {
        Command::New {
            session: path,
            size,
            model,
            template,
        } => {
            let mut session = DesignSession::new(Default::default());
            session.size = size;
            session.model_id = model;
            if let Some(name) = template {
                let template = KitTemplate::lookup(&name)?;
                let mut store = session.open_store(config);
                store.apply_template(template);
                session.capture(&store);
            }
            save_session(&path, &session)?;
            info!(path = %path.display(), session_id = %session.session_id, "created session");
        }
        Command::Tile {
            base,
            secondary,
            pattern,
            size,
            out,
        } => {
            let tile_size = match size {
                Some(size) => {
                    validate_tile_size(size).context("--size")?;
                    size
                }
                None => config.tile_size,
            };
            let tile = generate_texture_for_id(base, secondary, &pattern, tile_size);
            save_png(&tile, &out)?;
        }
        Command::Preview { session } => {
            let session = load_session(&session)?;
            let params = project_with(&session.state, &PreviewSettings::from_config(config));
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Command::Payload { session } => {
            let session = load_session(&session)?;
            let payload = kit_record::to_payload(&session.state, &SaveContext::for_session(&session));
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::Share { session, origin } => {
            let session = load_session(&session)?;
            let link = share_link(&origin, &session.state, &SaveContext::for_session(&session))?;
            println!("{link}");
        }
        Command::Save {
            session: path,
            records,
        } => {
            let mut session = load_session(&path)?;
            let api = LocalRecordStore::open(&records)?;
            let store = session.open_store(config);
            let mut sync = match &session.record_id {
                Some(id) => DesignSync::with_record(id.clone()),
                None => DesignSync::new(),
            };
            match sync.save_with(&api, &store, &SaveContext::for_session(&session)) {
                SaveOutcome::Applied(_) => {}
                SaveOutcome::Failed(err) => return Err(err).context("save design record"),
                SaveOutcome::Stale(reason) => bail!("save result discarded: {reason:?}"),
            }
            session.record_id = sync.record_id().map(str::to_string);
            save_session(&path, &session)?;
            println!("{}", session.record_id.as_deref().unwrap_or_default());
        }
        Command::Load {
            record_id,
            records,
            out,
        } => {
            let api = LocalRecordStore::open(&records)?;
            let mut session = DesignSession::new(Default::default());
            let mut store = session.open_store(config);
            let loaded = match DesignSync::new().load_with(&api, &record_id, &mut store) {
                LoadOutcome::Applied(loaded) => loaded,
                LoadOutcome::Failed(err) => {
                    return Err(err).with_context(|| format!("load design record {record_id}"))
                }
                LoadOutcome::Stale(reason) => bail!("load result discarded: {reason:?}"),
            };
            session.capture(&store);
            session.size = loaded.size;
            session.model_id = loaded.model_id;
            session.record_id = loaded.record_id;
            save_session(&out, &session)?;
            info!(path = %out.display(), record_id = %record_id, "loaded design into session");
        }
    }
    Ok(())
}
