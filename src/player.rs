//! External player - VLC/mpv playback for trailers and fallback videos
//!
//! The terminal cannot show video, so the overlay hands the resolved URL to
//! a desktop player. mpv plays YouTube embed URLs when yt-dlp is installed.

use std::process::Stdio;
use thiserror::Error;
use tokio::process::{Child, Command};

/// Supported local players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerType {
    /// VLC media player (default)
    #[default]
    Vlc,
    /// mpv media player
    Mpv,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Vlc => {
                // On macOS, VLC is an app bundle
                #[cfg(target_os = "macos")]
                if std::path::Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
            PlayerType::Mpv => "mpv",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerType::Vlc => "VLC",
            PlayerType::Mpv => "mpv",
        }
    }

    /// Parse a config value (`vlc`, `mpv`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vlc" => Some(PlayerType::Vlc),
            "mpv" => Some(PlayerType::Mpv),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Errors from local player operations
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
}

/// Launches a player process for a URL
pub struct LocalPlayer {
    player_type: PlayerType,
}

impl LocalPlayer {
    pub fn new(player_type: PlayerType) -> Self {
        Self { player_type }
    }

    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    /// Build the command line for a URL without spawning it
    pub fn command_for(&self, url: &str) -> Command {
        let mut cmd = Command::new(self.player_type.command());
        cmd.arg(url);
        match self.player_type {
            PlayerType::Vlc => {
                cmd.arg("--no-video-title-show");
            }
            PlayerType::Mpv => {
                cmd.arg("--force-window=immediate");
            }
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        cmd
    }

    /// Start playing a URL; the child runs detached from the TUI
    pub fn play(&self, url: &str) -> Result<Child, PlayerError> {
        tracing::info!(player = %self.player_type, url, "Launching external player");
        self.command_for(url).spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlayerError::NotFound(self.player_type.command().to_string())
            } else {
                PlayerError::StartFailed(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_type_command() {
        let vlc_cmd = PlayerType::Vlc.command();
        assert!(vlc_cmd == "vlc" || vlc_cmd == "/Applications/VLC.app/Contents/MacOS/VLC");
        assert_eq!(PlayerType::Mpv.command(), "mpv");
    }

    #[test]
    fn test_player_type_parse() {
        assert_eq!(PlayerType::parse("MPV"), Some(PlayerType::Mpv));
        assert_eq!(PlayerType::parse(" vlc "), Some(PlayerType::Vlc));
        assert_eq!(PlayerType::parse("quicktime"), None);
    }

    #[test]
    fn test_command_for_passes_url_first() {
        let player = LocalPlayer::new(PlayerType::Mpv);
        let cmd = player.command_for("https://example.com/a.mp4");
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args[0], "https://example.com/a.mp4");
        assert_eq!(args[1], "--force-window=immediate");
    }
}
