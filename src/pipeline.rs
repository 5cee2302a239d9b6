//! Per-playlist orchestration: list, sort, write.
//!
//! Playlists are processed one after another. The first failure aborts the
//! whole batch; playlists processed before it keep their new order.

use crate::{
    Error, Res, info,
    sort::{SortSpec, sort_tracks},
    spotify::{
        PlaylistReader, PlaylistWriter,
        playlist::{WriteSummary, write_order},
        tracks::list_tracks,
    },
    success,
    types::{PlaylistSelection, PlaylistSummary},
    utils,
};

/// Outcome of reordering one playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistReport {
    pub playlist_id: String,
    pub tracks: usize,
    pub write: WriteSummary,
}

/// A batch failure, naming the playlist that was being processed.
#[derive(Debug)]
pub struct BatchError {
    pub playlist: PlaylistSummary,
    pub completed: Vec<PlaylistReport>,
    pub source: Error,
}

/// Lists, sorts and rewrites a single playlist.
pub async fn reorder_playlist<A>(
    api: &A,
    playlist: &PlaylistSummary,
    spec: &SortSpec,
) -> Res<PlaylistReport>
where
    A: PlaylistReader + PlaylistWriter + ?Sized,
{
    let pb = utils::spinner(format!("Fetching tracks of '{}'...", playlist.name));
    let records = list_tracks(api, &playlist.id).await;
    pb.finish_and_clear();
    let records = records?;
    info!("{} tracks found and ready to sort.", records.len());

    let tracks = records.len();
    let uris: Vec<String> = sort_tracks(records, spec)
        .into_iter()
        .map(|r| r.uri)
        .collect();
    info!("Sorted by {}.", spec);

    if uris.is_empty() {
        info!("No tracks to reorder.");
    } else {
        info!("Reordering the playlist on Spotify... this may take a moment.");
    }
    let write = write_order(api, &playlist.id, &uris).await?;
    if write.total > 0 {
        success!("Playlist '{}' sorted.", playlist.name);
    }

    Ok(PlaylistReport {
        playlist_id: playlist.id.clone(),
        tracks,
        write,
    })
}

/// Reorders every selected playlist in selection order, stopping at the
/// first failure.
pub async fn reorder_all<A>(
    api: &A,
    selection: &PlaylistSelection,
    spec: &SortSpec,
) -> Result<Vec<PlaylistReport>, BatchError>
where
    A: PlaylistReader + PlaylistWriter + ?Sized,
{
    let mut reports = Vec::with_capacity(selection.len());

    for playlist in selection.iter() {
        info!("Processing playlist '{}'", playlist.name);
        match reorder_playlist(api, playlist, spec).await {
            Ok(report) => reports.push(report),
            Err(source) => {
                return Err(BatchError {
                    playlist: playlist.clone(),
                    completed: reports,
                    source,
                });
            }
        }
    }

    Ok(reports)
}
