use crate::{
    Res,
    spotify::{PlaylistReader, PlaylistWriter},
    types::PlaylistSummary,
};

/// Maximum number of URIs Spotify accepts in one replace or add call.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

/// What [`write_order`] sent to Spotify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    /// Number of URIs sent with the replace call.
    pub replaced: usize,
    /// Number of append calls issued after the replace.
    pub appended_batches: usize,
    /// Total number of URIs written.
    pub total: usize,
}

impl WriteSummary {
    pub fn calls(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            1 + self.appended_batches
        }
    }
}

/// Retrieves all playlists of the current user, following pagination.
pub async fn list_playlists<R>(reader: &R) -> Res<Vec<PlaylistSummary>>
where
    R: PlaylistReader + ?Sized,
{
    let mut playlists = Vec::new();
    let mut next: Option<String> = None;

    loop {
        let page = reader.playlists_page(next.as_deref()).await?;
        playlists.extend(page.items.into_iter().map(PlaylistSummary::from));

        match page.next {
            Some(url) => next = Some(url),
            None => break,
        }
    }

    Ok(playlists)
}

/// Rewrites a playlist so it contains exactly `uris`, in that order.
///
/// The first block of up to [`MAX_ITEMS_PER_REQUEST`] URIs replaces the
/// playlist contents; every following block is appended in order. An empty
/// list issues no call at all.
///
/// # Errors
///
/// The first failing call is returned immediately. Blocks already written are
/// not rolled back, so the playlist may be left partially reordered.
///
/// # Example
///
/// ```
/// let summary = write_order(&client, playlist_id, &uris).await?;
/// assert_eq!(summary.total, uris.len());
/// ```
pub async fn write_order<W>(writer: &W, playlist_id: &str, uris: &[String]) -> Res<WriteSummary>
where
    W: PlaylistWriter + ?Sized,
{
    let mut chunks = uris.chunks(MAX_ITEMS_PER_REQUEST);
    let Some(first) = chunks.next() else {
        return Ok(WriteSummary::default());
    };

    writer.replace_items(playlist_id, first).await?;
    let mut summary = WriteSummary {
        replaced: first.len(),
        appended_batches: 0,
        total: first.len(),
    };

    for chunk in chunks {
        writer.add_items(playlist_id, chunk).await?;
        summary.appended_batches += 1;
        summary.total += chunk.len();
    }

    Ok(summary)
}
