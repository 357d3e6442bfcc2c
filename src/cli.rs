//! CLI - Command Line Interface for HeisFlix
//!
//! Every catalog, sports and watchlist action is scriptable. All output is
//! JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! heisflix trending --page 2
//! heisflix search "dune" --json
//! heisflix trailer movie 438631
//! heisflix watchlist add tv 1396
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::MediaKind;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Query returned nothing
    NoResults = 4,
    /// Watchlist storage unreadable or unwritable
    StorageError = 5,
    /// No TMDB API key configured
    MissingApiKey = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// HeisFlix - browse movies, TV shows and football highlights
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "heisflix",
    version,
    about = "Browse movies, TV shows and football highlights",
    long_about = "A terminal client for trending movies and TV shows, genre \
                  discovery, trailers, a personal watchlist and football \
                  highlights.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  heisflix                          Launch interactive TUI\n\
                  heisflix --route /sports          Open the TUI on the sports screen\n\
                  heisflix search \"blade runner\"    Search movies and shows\n\
                  heisflix watchlist list --json    Dump the watchlist"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Screen the TUI opens on (/, /login, /home, /watchlist, /sports)
    #[arg(long, short = 'r', default_value = "/")]
    pub route: String,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trending movies and TV shows this week
    #[command(visible_alias = "tr")]
    Trending(PageArgs),

    /// List movie genres
    Genres,

    /// Movies in a genre
    #[command(visible_alias = "g")]
    Genre(GenreCmd),

    /// Search movies and TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Resolve the trailer (or fallback video) for an item
    #[command(visible_alias = "t")]
    Trailer(TrailerCmd),

    /// Latest football highlights
    Sports,

    /// Manage the watchlist
    #[command(visible_alias = "wl")]
    Watchlist(WatchlistCmd),
}

/// Result page selection
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Result page (1-based)
    #[arg(long, short = 'p', default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

/// Movies matching a genre id (see `heisflix genres`)
#[derive(Args, Debug)]
pub struct GenreCmd {
    /// Genre id
    pub id: u64,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Free-text search across movies and shows
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Media kind argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Movie,
    Tv,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => MediaKind::Movie,
            KindArg::Tv => MediaKind::Series,
        }
    }
}

/// Trailer lookup for one item
#[derive(Args, Debug)]
pub struct TrailerCmd {
    /// movie or tv
    #[arg(value_enum)]
    pub kind: KindArg,

    /// TMDB id
    pub id: u64,

    /// Display name, used for the fallback video when no trailer exists
    #[arg(long)]
    pub title: Option<String>,

    /// Open the result in the configured player
    #[arg(long)]
    pub play: bool,
}

#[derive(Args, Debug)]
pub struct WatchlistCmd {
    #[command(subcommand)]
    pub action: WatchlistAction,
}

#[derive(Subcommand, Debug)]
pub enum WatchlistAction {
    /// Show saved items
    #[command(visible_alias = "ls")]
    List,

    /// Save an item (details fetched from TMDB)
    Add {
        #[arg(value_enum)]
        kind: KindArg,
        id: u64,
    },

    /// Remove an item by id
    #[command(visible_alias = "rm")]
    Remove { id: u64 },

    /// Add when absent, remove when present
    Toggle {
        #[arg(value_enum)]
        kind: KindArg,
        id: u64,
    },

    /// Delete the whole watchlist, including an unreadable one
    Clear,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Trailer command result
#[derive(Debug, Serialize, Deserialize)]
pub struct TrailerResponse {
    pub kind: MediaKind,
    pub id: u64,
    /// `trailer`, `fallback` or `unavailable`
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Watchlist mutation result
#[derive(Debug, Serialize, Deserialize)]
pub struct WatchlistChange {
    pub id: u64,
    pub favorited: bool,
    pub changed: bool,
    pub count: usize,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data: JSON envelope, or `human` lines on a terminal
    pub fn print<T: Serialize>(&self, data: T, human: impl FnOnce(&T) -> Vec<String>) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for line in human(&data) {
                println!("{}", line);
            }
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
