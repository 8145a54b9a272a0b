use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use omition::app::{config, config::AppConfig, handler::Services, r#loop::run_loop, state::AppState};
use omition::infrastructure::{fs_pages::FsPageStore, http_completion::HttpCompletion};

#[derive(Parser, Debug)]
#[command(name = "omition", about = "Notes with a running budget summary")]
struct Cli {
    /// Config file (defaults to ~/.config/omition/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the pages
    #[arg(long)]
    notes_dir: Option<PathBuf>,
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

// The terminal belongs to the UI, so logs go to a file.
fn init_tracing() -> Result<()> {
    let Some(dir) = config::config_dir() else {
        return Ok(());
    };
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("omition.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;
    setup_panic_hook();

    // Everything that can fail on bad config happens before raw mode.
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.notes_dir {
        config.notes_dir = Some(dir);
    }

    let pages = FsPageStore::open(config.notes_dir())?;
    let completion = HttpCompletion::new(
        config.completion.endpoint.clone(),
        Duration::from_secs(config.completion.timeout_secs),
    )?;
    let services = Services {
        pages: Arc::new(pages),
        completion: Arc::new(completion),
    };
    tracing::info!(theme = config.theme.label(), "loaded config");
    let app_state = AppState::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, app_state, services).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("{err:?}");
        println!("{err:?}");
    }

    Ok(())
}
