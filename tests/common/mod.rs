#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use plsort::{
    Error, Res,
    sort::TrackRecord,
    spotify::{PlaylistReader, PlaylistWriter},
    types::{
        Page, Playlist, PlaylistItem, PlaylistSummary, PlaylistTrack, PlaylistTracksRef,
        TrackAlbum, TrackArtist,
    },
};
use reqwest::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Replace(String, Vec<String>),
    Add(String, Vec<String>),
}

/// In-memory Spotify: serves pre-built pages and records every write.
#[derive(Default)]
pub struct FakeSpotify {
    playlists: Vec<Page<Playlist>>,
    items: HashMap<String, Vec<Page<PlaylistItem>>>,
    failing_writes: Vec<String>,
    pub reads: Mutex<Vec<(String, Option<String>)>>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `items` for `playlist_id`, `page_size` items per page.
    pub fn with_playlist(mut self, playlist_id: &str, items: Vec<PlaylistItem>, page_size: usize) -> Self {
        let chunks: Vec<Vec<PlaylistItem>> = if items.is_empty() {
            vec![Vec::new()]
        } else {
            items.chunks(page_size).map(|c| c.to_vec()).collect()
        };
        let count = chunks.len();
        let total = items.len() as u32;

        let pages = chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| Page {
                items: chunk,
                next: (i + 1 < count).then(|| format!("page:{}:{}", playlist_id, i + 1)),
                total: Some(total),
            })
            .collect();
        self.items.insert(playlist_id.to_string(), pages);
        self
    }

    /// Serves `playlists` for the current user, `page_size` per page.
    pub fn with_user_playlists(mut self, playlists: Vec<Playlist>, page_size: usize) -> Self {
        let chunks: Vec<Vec<Playlist>> = playlists.chunks(page_size).map(|c| c.to_vec()).collect();
        let count = chunks.len();
        self.playlists = chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| Page {
                items: chunk,
                next: (i + 1 < count).then(|| format!("page:me:{}", i + 1)),
                total: Some(playlists.len() as u32),
            })
            .collect();
        self
    }

    /// Every write to `playlist_id` fails with 403.
    pub fn failing_writes_to(mut self, playlist_id: &str) -> Self {
        self.failing_writes.push(playlist_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reads(&self) -> Vec<(String, Option<String>)> {
        self.reads.lock().unwrap().clone()
    }

    fn record(&self, playlist_id: &str, call: Call) -> Res<String> {
        self.calls.lock().unwrap().push(call);
        if self.failing_writes.iter().any(|id| id == playlist_id) {
            return Err(Error::Api {
                status: StatusCode::FORBIDDEN,
                message: "You cannot modify this playlist".to_string(),
            });
        }
        Ok(format!("snapshot-{}", self.calls.lock().unwrap().len()))
    }
}

fn page_index(next: Option<&str>) -> usize {
    next.and_then(|n| n.rsplit(':').next())
        .and_then(|i| i.parse().ok())
        .unwrap_or(0)
}

#[async_trait]
impl PlaylistReader for FakeSpotify {
    async fn playlists_page(&self, next: Option<&str>) -> Res<Page<Playlist>> {
        Ok(self
            .playlists
            .get(page_index(next))
            .cloned()
            .unwrap_or(Page {
                items: Vec::new(),
                next: None,
                total: Some(0),
            }))
    }

    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Res<Page<PlaylistItem>> {
        self.reads
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), next.map(str::to_string)));

        self.items
            .get(playlist_id)
            .and_then(|pages| pages.get(page_index(next)))
            .cloned()
            .ok_or_else(|| Error::Api {
                status: StatusCode::NOT_FOUND,
                message: "Not found.".to_string(),
            })
    }
}

#[async_trait]
impl PlaylistWriter for FakeSpotify {
    async fn replace_items(&self, playlist_id: &str, uris: &[String]) -> Res<String> {
        self.record(playlist_id, Call::Replace(playlist_id.to_string(), uris.to_vec()))
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Res<String> {
        self.record(playlist_id, Call::Add(playlist_id.to_string(), uris.to_vec()))
    }
}

pub fn track_item(uri: &str, name: &str, artist: &str, added_at: &str) -> PlaylistItem {
    PlaylistItem {
        added_at: Some(added_at.to_string()),
        track: Some(PlaylistTrack {
            uri: Some(uri.to_string()),
            name: Some(name.to_string()),
            artists: Some(vec![TrackArtist {
                name: Some(artist.to_string()),
            }]),
            album: Some(TrackAlbum {
                name: Some(format!("{} album", name)),
                release_date: Some("2000-01-01".to_string()),
            }),
            popularity: Some(50),
            is_local: Some(false),
        }),
    }
}

pub fn numbered_items(count: usize) -> Vec<PlaylistItem> {
    (0..count)
        .map(|i| {
            track_item(
                &format!("spotify:track:{:04}", i),
                &format!("Track {:04}", i),
                "Artist",
                "2020-01-01T00:00:00Z",
            )
        })
        .collect()
}

pub fn removed_item() -> PlaylistItem {
    PlaylistItem {
        added_at: Some("2020-01-01T00:00:00Z".to_string()),
        track: None,
    }
}

pub fn playlist(id: &str, name: &str, total: u32) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        tracks: Some(PlaylistTracksRef { total }),
    }
}

pub fn summary(id: &str, name: &str) -> PlaylistSummary {
    PlaylistSummary {
        id: id.to_string(),
        name: name.to_string(),
        total_tracks: 0,
    }
}

pub fn record(uri: &str) -> TrackRecord {
    TrackRecord {
        uri: uri.to_string(),
        name: String::new(),
        artist: String::new(),
        album: String::new(),
        release_date: String::new(),
        popularity: 0,
        added_at: String::new(),
    }
}

pub fn uris(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("spotify:track:{:04}", i)).collect()
}
