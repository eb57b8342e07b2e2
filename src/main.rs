use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridkit::{init_logging, ConfigChange, ExportFormat, FileStore, LoadMode, Session};
use gridkit::{StatePersistence, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gridkit", version, about = "Printable tabletop grid overlays")]
struct Cli {
    /// Directory holding the saved state (defaults to the platform config dir)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Use the saved document verbatim instead of merging it over defaults
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current configuration as JSON
    Show,
    /// Set one field, e.g. `set hex-size 12` or `set page-preset A4Portrait`
    Set { key: String, value: String },
    /// Run a named action: rotate-left, rotate-right, zoom-in, zoom-out,
    /// reset-pan, clear-background, reset
    Action { name: String },
    /// Load an image file as the page background
    ImportBackground { file: PathBuf },
    /// Render the page and write it to disk
    Export {
        #[arg(long, default_value = "png")]
        format: ExportFormat,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Delete the saved state
    Clear,
}

fn open_session(cli: &Cli) -> Result<Session> {
    let store = match &cli.state_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::open_default()?,
    };
    info!("State directory: {}", store.dir().display());

    let mode = if cli.raw {
        LoadMode::Raw
    } else {
        LoadMode::Merged
    };
    Session::open(StatePersistence::new(Box::new(store)), mode)
}

/// Configuration as JSON with the embedded image elided
fn describe(session: &Session) -> Result<String> {
    let mut value = serde_json::to_value(session.config())?;
    if let Some(data) = value
        .pointer_mut("/background/imageData")
        .filter(|v| v.is_string())
    {
        let len = data.as_str().map(str::len).unwrap_or_default();
        *data = serde_json::Value::String(format!("<{} bytes of image data>", len));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging()?;
    info!("GridKit {} (built {})", VERSION, BUILD_DATE);

    let cli = Cli::parse();
    let mut session = open_session(&cli)?;

    match cli.command {
        Command::Show => {
            println!("{}", describe(&session)?);
        }
        Command::Set { key, value } => {
            let change = ConfigChange::parse(&key, &value)
                .with_context(|| format!("Cannot set {} to {:?}", key, value))?;
            session.apply(change)?;
            println!("{}", describe(&session)?);
        }
        Command::Action { name } => {
            let change = ConfigChange::parse_action(&name)
                .with_context(|| format!("Unknown action {:?}", name))?;
            session.apply(change)?;
        }
        Command::ImportBackground { file } => {
            session.import_background(&file).await?;
            let (w, h) = session
                .background()
                .map(|img| (img.width(), img.height()))
                .unwrap_or_default();
            println!("Background set from {} ({}x{})", file.display(), w, h);
        }
        Command::Export { format, out_dir } => {
            if !format.is_available() {
                println!("{} export is not available in this build", format);
                return Ok(());
            }
            if let Some(path) = session.export(format, &out_dir)? {
                println!("{}", path.display());
            }
        }
        Command::Clear => {
            session.clear()?;
            println!("Saved state cleared");
        }
    }

    Ok(())
}
