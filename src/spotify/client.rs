use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    Error, Res, config,
    management::TokenManager,
    spotify::{PlaylistReader, PlaylistWriter},
    types::{
        ApiErrorResponse, Page, Playlist, PlaylistItem, PlaylistItemsRequest, SnapshotResponse,
    },
};

/// Only the item fields the sort needs.
const PLAYLIST_ITEM_FIELDS: &str = "next,total,items(added_at,track(uri,name,popularity,is_local,artists(name),album(name,release_date)))";
const PLAYLIST_ITEMS_PAGE_SIZE: &str = "100";
const PLAYLISTS_PAGE_SIZE: &str = "50";

/// HTTP implementation of [`PlaylistReader`] and [`PlaylistWriter`].
///
/// Owns the cached token and refreshes it transparently before a request when
/// it is about to expire.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(tokens: TokenManager, api_url: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            tokens: Mutex::new(tokens),
        }
    }

    /// Builds a client from the token stored by `plsort auth` and the
    /// configured API URL.
    ///
    /// # Errors
    ///
    /// [`Error::Auth`] when no token has been stored yet.
    pub async fn from_cache() -> Res<Self> {
        let tokens = TokenManager::load().await.map_err(|e| {
            Error::Auth(format!(
                "Failed to load token. Please run plsort auth\n Error: {}",
                e
            ))
        })?;
        Ok(Self::new(tokens, config::spotify_apiurl()))
    }

    async fn token(&self) -> Res<String> {
        self.tokens.lock().await.get_valid_token().await
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Res<T> {
        let token = self.token().await?;
        let response = check_status(request.bearer_auth(token).send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_items(&self, method: Method, playlist_id: &str, uris: &[String]) -> Res<String> {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = playlist_id
        );
        let body = PlaylistItemsRequest {
            uris: uris.to_vec(),
        };

        let token = self.token().await?;
        let response = self
            .http
            .request(method, &api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let snapshot = check_status(response)
            .await?
            .json::<SnapshotResponse>()
            .await?;

        Ok(snapshot.snapshot_id)
    }
}

/// Turns a non-success response into [`Error::Api`], using Spotify's error
/// message when the body carries one.
pub async fn check_status(response: Response) -> Res<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(e) => e.error.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(Error::Api { status, message })
}

#[async_trait]
impl PlaylistReader for SpotifyClient {
    async fn playlists_page(&self, next: Option<&str>) -> Res<Page<Playlist>> {
        let request = match next {
            Some(url) => self.http.get(url),
            None => self
                .http
                .get(format!("{uri}/me/playlists", uri = self.api_url))
                .query(&[("limit", PLAYLISTS_PAGE_SIZE)]),
        };

        self.get_json(request).await
    }

    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Res<Page<PlaylistItem>> {
        let request = match next {
            Some(url) => self.http.get(url),
            None => self
                .http
                .get(format!(
                    "{uri}/playlists/{id}/tracks",
                    uri = self.api_url,
                    id = playlist_id
                ))
                .query(&[
                    ("limit", PLAYLIST_ITEMS_PAGE_SIZE),
                    ("additional_types", "track"),
                    ("fields", PLAYLIST_ITEM_FIELDS),
                ]),
        };

        self.get_json(request).await
    }
}

#[async_trait]
impl PlaylistWriter for SpotifyClient {
    async fn replace_items(&self, playlist_id: &str, uris: &[String]) -> Res<String> {
        self.send_items(Method::PUT, playlist_id, uris).await
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Res<String> {
        self.send_items(Method::POST, playlist_id, uris).await
    }
}
