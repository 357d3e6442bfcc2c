//! HeisFlix - browse movies, TV shows and football highlights
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! heisflix
//!
//! # Open straight on a screen
//! heisflix --route /watchlist
//!
//! # CLI mode (for automation)
//! heisflix search "blade runner"
//! heisflix trailer movie 78 --play
//! heisflix sports --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use heisflix::app::{App, AppMessage, Route};
use heisflix::cli::{Cli, Command, ExitCode, Output};
use heisflix::commands;
use heisflix::config::Config;
use heisflix::store::FileStore;
use heisflix::{ui, ScoreBatClient, TmdbClient, Worker};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Env var holding the log filter (e.g. `HEISFLIX_LOG=debug`)
const LOG_ENV: &str = "HEISFLIX_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        // CLI mode: log to stderr, execute command and exit
        init_logging(None);
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // The terminal belongs to the TUI, so logs go to a file
        init_logging(Some(&config));
        run_tui(&cli.route, &config).await
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. With a config, writes to
/// `<data_dir>/heisflix.log`; without one, or if the file can't be opened,
/// writes warnings and above to stderr.
fn init_logging(tui: Option<&Config>) {
    if let Some(config) = tui {
        let dir = config.data_dir();
        let file = std::fs::create_dir_all(&dir).and_then(|_| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("heisflix.log"))
        });
        if let Ok(file) = file {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
            return;
        }
    }

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Trending(args)) => commands::trending_cmd(args, config, &output).await,

        Some(Command::Genres) => commands::genres_cmd(config, &output).await,

        Some(Command::Genre(cmd)) => commands::genre_cmd(cmd, config, &output).await,

        Some(Command::Search(cmd)) => commands::search_cmd(cmd, config, &output).await,

        Some(Command::Trailer(cmd)) => commands::trailer_cmd(cmd, config, &output).await,

        Some(Command::Sports) => commands::sports_cmd(config, &output).await,

        Some(Command::Watchlist(cmd)) => commands::watchlist_cmd(cmd, config, &output).await,

        // Handled by the is_cli_mode check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(route: &str, config: &Config) -> Result<()> {
    let Some(route) = Route::from_path(route) else {
        anyhow::bail!(
            "Unknown route '{}' (expected /, /login, /home, /watchlist or /sports)",
            route
        );
    };

    // Without a key every catalog request fails, which the screens show
    let api_key = config.tmdb_api_key().unwrap_or_else(|| {
        tracing::warn!("No TMDB API key configured");
        String::new()
    });
    let catalog = Arc::new(TmdbClient::with_base_url(api_key, config.tmdb_base_url()));
    let sports = Arc::new(ScoreBatClient::with_base_url(
        config.sports_token(),
        config.sports_base_url(),
    ));

    let storage = Arc::new(FileStore::new(config.data_dir()));
    let (mut app, cmd_rx) = App::with_channels(storage);
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel();
    let worker = Worker::new(catalog, sports, config.player()).spawn(cmd_rx, msg_tx);

    app.navigate(route);

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &mut msg_rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    // Dropping the app closes the command channel and ends the worker
    drop(app);
    worker.abort();

    result
}

/// Main event loop - handles input, applies worker results, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    messages: &mut mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        let frame_area = terminal.draw(|frame| ui::render(frame, app))?.area;

        if event::poll(TICK_RATE)? {
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse, frame_area);
                }
                _ => {}
            }
        }

        while let Ok(msg) = messages.try_recv() {
            app.handle_message(msg);
        }

        // Let worker tasks make progress on the current-thread parts
        tokio::task::yield_now().await;
    }

    Ok(())
}
