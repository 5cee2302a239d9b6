use tabled::Table;

use crate::{
    Res, error, info,
    spotify::{client::SpotifyClient, playlist::list_playlists},
    types::PlaylistSummary,
    utils,
};

/// Prints the current user's playlists as a numbered table.
pub async fn playlists() {
    match fetch_playlists().await {
        Ok(playlists) if playlists.is_empty() => info!("No playlists found."),
        Ok(playlists) => print_playlists(&playlists),
        Err(e) => error!("Failed to fetch playlists: {}", e),
    }
}

pub(crate) async fn fetch_playlists_with(client: &SpotifyClient) -> Res<Vec<PlaylistSummary>> {
    let pb = utils::spinner("Fetching your playlists...");
    let playlists = list_playlists(client).await;
    pb.finish_and_clear();
    playlists
}

async fn fetch_playlists() -> Res<Vec<PlaylistSummary>> {
    let client = SpotifyClient::from_cache().await?;
    fetch_playlists_with(&client).await
}

pub(crate) fn print_playlists(playlists: &[PlaylistSummary]) {
    let table = Table::new(utils::playlist_table_rows(playlists));
    println!("\n--- Your playlists ---\n{}", table);
}
