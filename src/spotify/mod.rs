//! # Spotify Integration Module
//!
//! This module is the integration layer between plsort and the Spotify Web API.
//! It handles authentication, paginated reads of playlists and their tracks,
//! and the batched writes that persist a new track order.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, pipeline)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Track Lister (paginated playlist items)
//!     └── Playlist Writer (replace, then append)
//!          ↓
//! PlaylistReader / PlaylistWriter traits
//!          ↓
//! SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The listing and writing logic only talks to the [`PlaylistReader`] and
//! [`PlaylistWriter`] traits, so it can be exercised against in-memory fakes.
//! [`client::SpotifyClient`] is the HTTP implementation of both.
//!
//! ## API Coverage
//!
//! - `GET /me/playlists` - the user's playlists, paginated
//! - `GET /playlists/{playlist_id}/tracks` - playlist items, paginated
//! - `PUT /playlists/{playlist_id}/tracks` - replace all items (max 100)
//! - `POST /playlists/{playlist_id}/tracks` - append items (max 100)
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Error Handling
//!
//! Nothing here retries. A non-success status becomes [`crate::Error::Api`]
//! carrying the message from Spotify's error body; transport failures become
//! [`crate::Error::Http`]. Both propagate to the caller unchanged.

pub mod auth;
pub mod client;
pub mod playlist;
pub mod tracks;

use async_trait::async_trait;

use crate::{
    Res,
    types::{Page, Playlist, PlaylistItem},
};

/// Read side of the Spotify Web API.
///
/// `next` is the `next` URL of the previous page; `None` requests the first page.
#[async_trait]
pub trait PlaylistReader: Send + Sync {
    async fn playlists_page(&self, next: Option<&str>) -> Res<Page<Playlist>>;

    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Res<Page<PlaylistItem>>;
}

/// Write side of the Spotify Web API. Both calls accept at most
/// [`playlist::MAX_ITEMS_PER_REQUEST`] URIs and return the new snapshot id.
#[async_trait]
pub trait PlaylistWriter: Send + Sync {
    /// Clears the playlist and sets `uris` as its only items.
    async fn replace_items(&self, playlist_id: &str, uris: &[String]) -> Res<String>;

    /// Appends `uris` to the end of the playlist.
    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Res<String>;
}
