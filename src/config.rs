//! Configuration management for HeisFlix
//!
//! Handles config file loading, endpoint overrides and API key lookup.
//! Config is stored at ~/.config/heisflix/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::{scorebat, tmdb};
use crate::player::PlayerType;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TMDB v3 API key
    pub tmdb_api_key: Option<String>,
    /// Override for the TMDB endpoint
    pub tmdb_base_url: Option<String>,
    /// Override for the ScoreBat endpoint
    pub sports_base_url: Option<String>,
    /// ScoreBat feed token
    pub sports_token: Option<String>,
    /// External player for trailers (vlc, mpv)
    pub player: Option<String>,
    /// Where the watchlist and log file live
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/heisflix/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("heisflix").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from an explicit path, falling back to defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// TMDB API key: `TMDB_API_KEY` env var first, then the config file
    pub fn tmdb_api_key(&self) -> Option<String> {
        std::env::var("TMDB_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.tmdb_api_key.clone())
    }

    pub fn tmdb_base_url(&self) -> &str {
        self.tmdb_base_url.as_deref().unwrap_or(tmdb::DEFAULT_BASE_URL)
    }

    pub fn sports_base_url(&self) -> &str {
        self.sports_base_url
            .as_deref()
            .unwrap_or(scorebat::DEFAULT_BASE_URL)
    }

    pub fn sports_token(&self) -> &str {
        self.sports_token.as_deref().unwrap_or("demo")
    }

    /// Configured player, VLC when unset or unknown
    pub fn player(&self) -> PlayerType {
        self.player
            .as_deref()
            .and_then(PlayerType::parse)
            .unwrap_or_default()
    }

    /// Data directory (~/.local/share/heisflix by default)
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("heisflix")))
            .unwrap_or_else(|| PathBuf::from(".heisflix"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.sports_token(), "demo");
        assert_eq!(config.tmdb_base_url(), "https://api.themoviedb.org/3");
        assert_eq!(config.player(), PlayerType::Vlc);
    }

    #[test]
    fn test_config_parses_toml() {
        let config: Config = toml::from_str(
            r#"
            tmdb_api_key = "abc"
            sports_token = "secret"
            player = "mpv"
            data_dir = "/tmp/heisflix-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.tmdb_api_key.as_deref(), Some("abc"));
        assert_eq!(config.sports_token(), "secret");
        assert_eq!(config.player(), PlayerType::Mpv);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/heisflix-test"));
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let config = Config::load_from(std::path::Path::new("/nonexistent/heisflix.toml"));
        assert!(config.tmdb_api_key.is_none());
    }
}
