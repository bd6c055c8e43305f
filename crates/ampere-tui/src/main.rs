//! Ampere TUI - terminal Lightning wallet
//!
//! Paste a BOLT11 payment request to inspect and pay it, or scan a node
//! address to fill in the open channel form.

use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ampere_core::ThemeName;
use ampere_tui::app::TuiConfig;
use ampere_tui::App;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ampere-tui", version, about = "Terminal Lightning wallet")]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/ampere/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Color theme, overriding the config file
    #[arg(long, value_name = "dark|light")]
    theme: Option<ThemeName>,

    /// Start on the invoice screen with this payment request
    #[arg(long, value_name = "BOLT11")]
    invoice: Option<String>,

    /// Log file (default: next to the config file)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Application entry point with panic handling for terminal restoration
fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TuiConfig::load_from(path),
        None => TuiConfig::load(),
    };
    if let Some(theme) = args.theme {
        config.settings.theme = theme;
    }

    let log_file = args.log_file.clone().or_else(|| config.log_file_path());
    init_logging(log_file.as_deref())?;

    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        original_hook(panic_info);
    }));

    let result = run_app(config, args.invoice.as_deref());

    if let Err(e) = &result {
        tracing::error!("Application error: {:#}", e);
    }

    result
}

/// Log to a file; stdout belongs to the terminal UI
fn init_logging(path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("ampere_tui=info".parse()?)
        .add_directive("ampere_core=info".parse()?);

    let Some(path) = path else {
        return Ok(());
    };

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Main application runner
fn run_app(config: TuiConfig, invoice: Option<&str>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let mut app = App::new(config, runtime.handle().clone())?;
    if let Some(invoice) = invoice {
        app.open_invoice(invoice);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}
