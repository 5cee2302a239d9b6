//! Configuration management for the Spotify Playlist Sorter.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, endpoints and the local
//! callback server address.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the current working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Error, Res};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private playlist-read-private playlist-read-collaborative";

/// Returns the platform-specific data directory of the application.
///
/// - Linux: `~/.local/share/plsort`
/// - macOS: `~/Library/Application Support/plsort`
/// - Windows: `%LOCALAPPDATA%/plsort`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(env!("CARGO_PKG_NAME"));
    path
}

/// Loads environment variables from `.env` files.
///
/// Creates the data directory if it doesn't exist, then loads `plsort/.env`
/// from it and finally a `.env` in the working directory. Variables that are
/// already set are never overwritten, and missing files are not an error since
/// every setting may also come from the process environment.
///
/// # Errors
///
/// Returns [`Error::Io`] if the data directory cannot be created and
/// [`Error::Config`] if an existing `.env` file cannot be parsed.
///
/// # Example
///
/// ```
/// use plsort::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Res<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    }

    // a .env next to the binary invocation is optional
    let _ = dotenv::dotenv();
    Ok(())
}

fn required(key: &str) -> Res<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} must be set", key))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the server address for the local OAuth callback server.
///
/// Reads `SERVER_ADDRESS`, e.g. `127.0.0.1:8888`. The port must match the one
/// in [`spotify_redirect_uri`].
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID for authentication.
///
/// # Errors
///
/// [`Error::Config`] when `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match the redirect URI registered in the Spotify application settings,
/// e.g. `http://127.0.0.1:8888/callback`.
///
/// # Errors
///
/// [`Error::Config`] when `SPOTIFY_API_REDIRECT_URI` is not set.
pub fn spotify_redirect_uri() -> Res<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the Spotify API scope permissions.
pub fn spotify_scope() -> String {
    optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify Web API base URL without a trailing slash.
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}
