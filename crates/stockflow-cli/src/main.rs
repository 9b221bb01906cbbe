//! `stockflow` — terminal UI for the StockFlow inventory tracker.
//!
//! # Usage
//!
//! ```
//! stockflow
//! stockflow --store ./shop.db
//! stockflow --config ~/.config/stockflow/stockflow.toml
//! stockflow --memory
//! ```
//!
//! Settings come from the optional TOML config file, then `STOCKFLOW_*`
//! environment variables, then command-line flags.

mod app;
mod ui;

use std::{
  fs::OpenOptions,
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use stockflow_core::{inventory::Inventory, memory::MemoryStore, store::KeyValueStore};
use stockflow_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "stockflow", version, about = "Inventory and sales tracker")]
struct Args {
  /// Path to a TOML config file (store_path, log_path).
  #[arg(short, long, value_name = "FILE", default_value = "stockflow.toml")]
  config: PathBuf,

  /// SQLite file holding the catalog and sales.
  #[arg(long, value_name = "PATH")]
  store: Option<PathBuf>,

  /// Keep everything in memory; nothing is written to disk.
  #[arg(long, conflicts_with = "store")]
  memory: bool,

  /// File that receives log output.
  #[arg(long, value_name = "PATH")]
  log_file: Option<PathBuf>,
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Shape of the layered configuration.
#[derive(Deserialize, Debug)]
struct Settings {
  #[serde(default = "default_store_path")]
  store_path: PathBuf,
  #[serde(default = "default_log_path")]
  log_path:   PathBuf,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/stockflow/stockflow.db") }

fn default_log_path() -> PathBuf { PathBuf::from("~/.local/share/stockflow/stockflow.log") }

fn load_settings(args: &Args) -> Result<Settings> {
  let mut settings: Settings = config::Config::builder()
    .add_source(config::File::from(args.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("STOCKFLOW"))
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise settings")?;

  // CLI flags override config file and environment.
  if let Some(store) = &args.store {
    settings.store_path = store.clone();
  }
  if let Some(log_file) = &args.log_file {
    settings.log_path = log_file.clone();
  }

  settings.store_path = expand_tilde(&settings.store_path);
  settings.log_path = expand_tilde(&settings.log_path);
  Ok(settings)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

fn ensure_parent(path: &Path) -> Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating directory {}", parent.display()))?;
  }
  Ok(())
}

/// Send tracing output to `path`; the terminal belongs to the UI.
fn init_tracing(path: &Path) -> Result<()> {
  ensure_parent(path)?;
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("opening log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let settings = load_settings(&args)?;
  init_tracing(&settings.log_path)?;

  if args.memory {
    tracing::info!("using in-memory store");
    return run(MemoryStore::new()).await;
  }

  ensure_parent(&settings.store_path)?;
  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;
  tracing::info!(path = %settings.store_path.display(), "store opened");

  run(store).await
}

/// Load the inventory from `store` and drive the UI until the user quits.
async fn run<S: KeyValueStore>(store: S) -> Result<()> {
  let inventory = Inventory::open(store)
    .await
    .context("loading inventory")?;
  let mut app = App::new(inventory);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<S: KeyValueStore>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    // Key releases are reported on some platforms; act on presses only.
    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key).await
    {
      break;
    }
  }

  Ok(())
}
