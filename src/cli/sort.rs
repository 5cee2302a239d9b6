use std::io;

use crate::{
    Res, error, info,
    cli::{
        playlists::{fetch_playlists_with, print_playlists},
        prompt::Prompt,
    },
    pipeline, success,
    spotify::client::SpotifyClient,
};

/// Interactive batch reorder: pick playlists, pick sort criteria and a
/// direction, then sort every chosen playlist in turn.
///
/// Any failure ends the whole batch with a single error message and exit
/// code 1. Playlists finished before the failure keep their new order.
pub async fn sort() {
    if let Err(e) = run().await {
        error!(
            "An unexpected error occurred: {}\n    Please check your connection and try again.",
            e
        );
    }
}

async fn run() -> Res<()> {
    info!("Connecting to Spotify...");
    let client = SpotifyClient::from_cache().await?;
    let playlists = fetch_playlists_with(&client).await?;
    success!("Connected.");

    if playlists.is_empty() {
        info!("No playlists found. Exiting.");
        return Ok(());
    }
    print_playlists(&playlists);

    let (selection, spec) = {
        let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
        let selection = prompt.select_playlists(&playlists)?;
        if selection.is_empty() {
            info!("No playlist selected. Exiting.");
            return Ok(());
        }

        let Some(spec) = prompt.select_sort_spec()? else {
            info!("No sort criteria chosen. Exiting.");
            return Ok(());
        };
        (selection, spec)
    };

    println!("\n{}", "=".repeat(40));
    info!("Sorting {} playlist(s) by {}", selection.len(), spec);
    println!("{}", "=".repeat(40));

    match pipeline::reorder_all(&client, &selection, &spec).await {
        Ok(reports) => {
            println!("\n{}", "=".repeat(40));
            success!("All {} selected playlists were sorted!", reports.len());
            println!("{}", "=".repeat(40));
            Ok(())
        }
        Err(failure) => {
            if !failure.completed.is_empty() {
                info!(
                    "{} playlist(s) were sorted before the failure.",
                    failure.completed.len()
                );
            }
            if failure.source.is_remote() {
                info!(
                    "Playlist '{}' may be partially reordered.",
                    failure.playlist.name
                );
            }
            Err(failure.source)
        }
    }
}
