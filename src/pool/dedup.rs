use crate::client::CatalogClient;
use crate::error::CatalogError;
use std::collections::HashSet;

/// An album accepted for the pool, with the track count the catalog reports
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumEntry {
    pub id: String,
    pub track_count: usize,
}

/// Remembers every album accepted during one pool build.
///
/// An album shared by several artists is credited to the first artist that
/// lists it; later artists never see it again.
#[derive(Debug, Default)]
pub struct AlbumDeduplicator {
    seen: HashSet<String>,
}

impl AlbumDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Albums of `artist_id` not seen earlier in this run, in listing order
    pub fn unique_albums(
        &mut self,
        client: &dyn CatalogClient,
        artist_id: &str,
        include_instrumental: bool,
    ) -> Result<Vec<AlbumEntry>, CatalogError> {
        let albums = client.list_albums(artist_id)?;
        let mut accepted = Vec::new();

        for album in albums {
            if !include_instrumental && album.is_instrumental() {
                continue;
            }
            // insert() is false for ids already recorded, including repeats in this listing
            if self.seen.insert(album.id.clone()) {
                accepted.push(AlbumEntry {
                    id: album.id,
                    track_count: album.total_tracks as usize,
                });
            }
        }

        Ok(accepted)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
