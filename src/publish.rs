use crate::client::PlaylistPublisher;
use anyhow::{Context, Result};
use log::info;

/// Create a playlist owned by the current user and fill it with `track_ids`
pub fn make_playlist(
    publisher: &dyn PlaylistPublisher,
    track_ids: &[String],
    name: &str,
) -> Result<String> {
    let owner_id = publisher
        .current_user_id()
        .context("Failed to look up the current user")?;
    let playlist_id = publisher
        .create_playlist(&owner_id, name)
        .with_context(|| format!("Failed to create playlist '{name}'"))?;
    publisher
        .add_tracks(&playlist_id, track_ids)
        .with_context(|| format!("Failed to add tracks to playlist '{name}'"))?;

    info!(
        "Created playlist '{}' ({}) for {} with {} tracks",
        name,
        playlist_id,
        owner_id,
        track_ids.len()
    );
    Ok(playlist_id)
}
