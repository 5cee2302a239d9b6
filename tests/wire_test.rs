use axum::http;
use plsort::{
    Error,
    spotify::{client::check_status, tracks::project_item},
    types::{Page, Playlist, PlaylistItem, PlaylistSummary},
};
use reqwest::StatusCode;

const PLAYLIST_ITEMS_PAGE: &str = r#"{
  "next": "https://api.spotify.com/v1/playlists/pl/tracks?offset=100&limit=100",
  "total": 205,
  "items": [
    {
      "added_at": "2021-07-07T10:00:00Z",
      "track": {
        "uri": "spotify:track:0rQtoQXQfwpDW0c7Fw1NeM",
        "name": "Blue Monday",
        "artists": [{"name": "New Order"}],
        "album": {"name": "Power, Corruption & Lies", "release_date": "1983-05-02"},
        "popularity": 71,
        "is_local": false
      }
    },
    {
      "added_at": null,
      "track": {
        "uri": null,
        "name": null,
        "artists": [],
        "album": null,
        "popularity": null,
        "is_local": false
      }
    },
    {
      "added_at": "2022-01-01T00:00:00Z",
      "track": null
    },
    {
      "added_at": "2022-02-02T00:00:00Z",
      "track": {
        "uri": "spotify:local:Artist:Album:Demo:180",
        "name": "Demo",
        "artists": [{"name": null}],
        "album": {"name": null, "release_date": null},
        "popularity": 0,
        "is_local": true
      }
    },
    {
      "added_at": "2023-03-03T00:00:00Z",
      "track": {
        "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC",
        "name": "Never Gonna Give You Up",
        "artists": [{"name": null}],
        "album": {"name": "Whenever You Need Somebody", "release_date": null},
        "popularity": null,
        "is_local": null
      }
    }
  ]
}"#;

const USER_PLAYLISTS_PAGE: &str = r#"{
  "href": "https://api.spotify.com/v1/me/playlists?offset=0&limit=50",
  "next": null,
  "total": 2,
  "items": [
    {
      "id": "37i9dQZF1DXcBWIGoYBM5M",
      "name": "Today's Top Hits",
      "public": true,
      "tracks": {"href": "https://api.spotify.com/v1/playlists/37i9dQZF1DXcBWIGoYBM5M/tracks", "total": 50}
    },
    {
      "id": "5ABHKGoOzxkaa28ttQV9sE",
      "name": "Empty",
      "tracks": null
    }
  ]
}"#;

fn response(status: u16, body: &str) -> reqwest::Response {
    reqwest::Response::from(
        http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap(),
    )
}

#[test]
fn test_playlist_items_page_accepts_null_fields() {
    let page: Page<PlaylistItem> = serde_json::from_str(PLAYLIST_ITEMS_PAGE).unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total, Some(205));
    assert!(page.next.unwrap().contains("offset=100"));
    assert!(page.items[2].track.is_none());

    let unplayable = page.items[1].track.as_ref().unwrap();
    assert!(unplayable.uri.is_none());
    assert!(unplayable.name.is_none());
    assert!(unplayable.album.is_none());
}

#[test]
fn test_projection_keeps_only_playable_items_from_a_real_page() {
    let page: Page<PlaylistItem> = serde_json::from_str(PLAYLIST_ITEMS_PAGE).unwrap();

    let records: Vec<_> = page.items.into_iter().filter_map(project_item).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].uri, "spotify:track:0rQtoQXQfwpDW0c7Fw1NeM");
    assert_eq!(records[0].artist, "new order");
    assert_eq!(records[0].release_date, "1983-05-02");

    assert_eq!(records[1].uri, "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
    assert_eq!(records[1].artist, "");
    assert_eq!(records[1].album, "whenever you need somebody");
    assert_eq!(records[1].release_date, "");
    assert_eq!(records[1].popularity, 0);
}

#[test]
fn test_last_page_has_no_next_url() {
    let page: Page<PlaylistItem> =
        serde_json::from_str(r#"{"items": [], "next": null}"#).unwrap();

    assert!(page.items.is_empty());
    assert!(page.next.is_none());
    assert!(page.total.is_none());
}

#[test]
fn test_user_playlists_page_maps_to_summaries() {
    let page: Page<Playlist> = serde_json::from_str(USER_PLAYLISTS_PAGE).unwrap();
    assert!(page.next.is_none());

    let summaries: Vec<PlaylistSummary> = page.items.into_iter().map(Into::into).collect();

    assert_eq!(
        summaries,
        vec![
            PlaylistSummary {
                id: "37i9dQZF1DXcBWIGoYBM5M".to_string(),
                name: "Today's Top Hits".to_string(),
                total_tracks: 50,
            },
            PlaylistSummary {
                id: "5ABHKGoOzxkaa28ttQV9sE".to_string(),
                name: "Empty".to_string(),
                total_tracks: 0,
            },
        ]
    );
}

#[tokio::test]
async fn test_rate_limited_response_carries_spotify_message() {
    let res = response(
        429,
        r#"{"error":{"status":429,"message":"API rate limit exceeded"}}"#,
    );

    match check_status(res).await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(message, "API rate limit exceeded");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_json_body_uses_canonical_reason() {
    let res = response(502, "<html>Bad Gateway</html>");

    match check_status(res).await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_forbidden_write_is_reported_as_remote_error() {
    let res = response(
        403,
        r#"{"error":{"status":403,"message":"You cannot add tracks to a playlist you don't own."}}"#,
    );

    let err = check_status(res).await.unwrap_err();

    assert!(err.is_remote());
    assert!(err.to_string().contains("403"));
    assert!(err.to_string().contains("you don't own"));
}

#[tokio::test]
async fn test_success_response_passes_through() {
    let res = response(201, r#"{"snapshot_id":"abc"}"#);

    let res = check_status(res).await.unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.text().await.unwrap(), r#"{"snapshot_id":"abc"}"#);
}
