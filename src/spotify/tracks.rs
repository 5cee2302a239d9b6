use crate::{
    Res,
    sort::TrackRecord,
    spotify::PlaylistReader,
    types::PlaylistItem,
};

/// Retrieves every playable track of a playlist as a [`TrackRecord`].
///
/// Requests the first page of playlist items and keeps following the `next`
/// URL until Spotify stops returning one, so playlists of any size are listed
/// completely. Records keep the order the API returned them in.
///
/// Items without a playable track (removed tracks, local files, anything
/// without a URI) are skipped silently; see [`project_item`].
///
/// # Errors
///
/// Any failed page request is returned as is. Nothing is returned for a
/// partially listed playlist.
///
/// # Example
///
/// ```
/// let client = SpotifyClient::from_cache().await?;
/// let records = list_tracks(&client, "37i9dQZF1DXcBWIGoYBM5M").await?;
/// println!("{} tracks ready to sort", records.len());
/// ```
pub async fn list_tracks<R>(reader: &R, playlist_id: &str) -> Res<Vec<TrackRecord>>
where
    R: PlaylistReader + ?Sized,
{
    let mut records = Vec::new();
    let mut next: Option<String> = None;

    loop {
        let page = reader
            .playlist_items_page(playlist_id, next.as_deref())
            .await?;
        records.extend(page.items.into_iter().filter_map(project_item));

        match page.next {
            Some(url) => next = Some(url),
            None => break,
        }
    }

    Ok(records)
}

/// Flattens one playlist item into a sortable record.
///
/// Returns `None` for items whose track is missing, local, or has no URI.
/// Text fields used for sorting are lower-cased here, once; only the first
/// listed artist is kept.
pub fn project_item(item: PlaylistItem) -> Option<TrackRecord> {
    let track = item.track?;
    if track.is_local.unwrap_or(false) {
        return None;
    }
    let uri = track.uri.filter(|u| !u.is_empty())?;

    let artist = track
        .artists
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|a| a.name)
        .unwrap_or_default()
        .to_lowercase();
    let album = track.album.unwrap_or_default();

    Some(TrackRecord {
        uri,
        name: track.name.unwrap_or_default().to_lowercase(),
        artist,
        album: album.name.unwrap_or_default().to_lowercase(),
        release_date: album.release_date.unwrap_or_default(),
        popularity: track.popularity.unwrap_or(0),
        added_at: item.added_at.unwrap_or_default(),
    })
}
