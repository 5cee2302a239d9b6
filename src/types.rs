use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
}

/// One page of a paginated Spotify listing. `next` is absent on the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<String>,
    pub track: Option<PlaylistTrack>,
}

// Removed and local tracks come back with explicit nulls, so every field the
// sort reads is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub uri: Option<String>,
    pub name: Option<String>,
    pub artists: Option<Vec<TrackArtist>>,
    pub album: Option<TrackAlbum>,
    pub popularity: Option<u32>,
    pub is_local: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u32,
}

/// A playlist the user can pick for sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub total_tracks: u32,
}

impl From<Playlist> for PlaylistSummary {
    fn from(p: Playlist) -> Self {
        Self {
            id: p.id,
            name: p.name,
            total_tracks: p.tracks.map(|t| t.total).unwrap_or(0),
        }
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub tracks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// A duplicate-free, insertion-ordered set of playlists chosen for sorting.
#[derive(Debug, Clone, Default)]
pub struct PlaylistSelection {
    playlists: Vec<PlaylistSummary>,
}

impl PlaylistSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a playlist. Returns `false` if a playlist with the same id was
    /// already selected.
    pub fn insert(&mut self, playlist: PlaylistSummary) -> bool {
        if self.contains(&playlist.id) {
            return false;
        }
        self.playlists.push(playlist);
        true
    }

    pub fn contains(&self, playlist_id: &str) -> bool {
        self.playlists.iter().any(|p| p.id == playlist_id)
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaylistSummary> {
        self.playlists.iter()
    }
}
