//! Backoffice console
//!
//! Interactive admin dashboard over the built-in Admins, Users and My Team
//! pages, plus any page configs passed with `--page`.
//!
//! Usage:
//!   backoffice --email admin@example.com --password admin@example.com
//!
//! The session token is kept in `<state-dir>/session.json`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use backoffice_console::{catalogue, load_page, App, Command, Flow};
use backoffice_crud::{CrudConfig, Latency};
use backoffice_session::{FileStore, KeyValueStore, SessionConfig};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "backoffice")]
#[command(about = "Config-driven admin dashboard in the terminal")]
struct Args {
    /// Extra page config (JSON). May be repeated.
    #[arg(short, long)]
    page: Vec<PathBuf>,

    /// Engine settings file (JSON): `{"search_debounce_ms": 300, "instant": false}`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where the session is stored. Defaults to the platform data dir.
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Sign in on startup
    #[arg(long, requires = "password")]
    email: Option<String>,

    #[arg(long, requires = "email")]
    password: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Optional engine overrides read from `--config`.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct Settings {
    search_debounce_ms: Option<u64>,
    /// Drop the simulated data source latency.
    instant: bool,
}

fn crud_config(path: Option<&PathBuf>) -> Result<CrudConfig> {
    let settings: Settings = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => Settings::default(),
    };
    let mut config = CrudConfig::default();
    if let Some(ms) = settings.search_debounce_ms {
        config.search_debounce = Duration::from_millis(ms);
    }
    if settings.instant {
        config.latency = Latency::none();
    }
    Ok(config)
}

fn flush(app: &mut App) {
    for line in app.take_output() {
        println!("{line}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let crud = crud_config(args.config.as_ref())?;
    let mut pages = catalogue()?;
    for path in &args.page {
        let entry = load_page(path)?;
        info!(page = %entry.key, "loaded page config");
        pages.push(entry);
    }

    let state_dir = match args.state_dir {
        Some(dir) => dir,
        None => FileStore::default_dir()?,
    };
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(&state_dir)
            .with_context(|| format!("failed to open session store in {}", state_dir.display()))?,
    );
    info!(dir = %state_dir.display(), "session store opened");

    let mut app = App::new(pages, &crud, SessionConfig::default(), store)?;
    if let (Some(email), Some(password)) = (args.email, args.password) {
        app.execute(Command::Login { email, password }).await?;
    }
    print!("{}", app.render());
    flush(&mut app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match app.execute(command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => print!("{}", app.render()),
            Err(err) => {
                warn!(error = %err, "command failed");
                println!("{err:#}");
            }
        }
        flush(&mut app);
    }

    info!("bye");
    Ok(())
}
