use super::{AlbumDeduplicator, TrackPool, WeightSynthesizer};
use crate::client::CatalogClient;
use crate::error::CatalogError;
use log::{info, warn};

const MASS_TOLERANCE: f64 = 1e-9;

/// Builds the weighted track pool for a list of artists
#[derive(Debug, Default)]
pub struct TrackPoolBuilder {
    synthesizer: WeightSynthesizer,
}

impl TrackPoolBuilder {
    pub fn new(synthesizer: WeightSynthesizer) -> Self {
        Self { synthesizer }
    }

    /// Collect every unique track of the given artists with its selection weight.
    ///
    /// Tracks are inserted artist by artist, album by album, in listing order.
    /// Each artist receives an equal share of the probability mass regardless
    /// of catalog size. The first catalog failure aborts the whole build.
    pub fn build(
        &self,
        client: &dyn CatalogClient,
        artist_names: &[String],
        include_instrumental: bool,
    ) -> Result<TrackPool, CatalogError> {
        let artist_count = artist_names.len();
        let mut dedup = AlbumDeduplicator::new();
        let mut pool = TrackPool::new();

        for name in artist_names {
            let artist_id = client.resolve_artist(name)?;
            let albums = dedup.unique_albums(client, &artist_id, include_instrumental)?;

            let mut album_ids = Vec::with_capacity(albums.len());
            let mut track_counts = Vec::with_capacity(albums.len());

            for album in albums {
                let listing = client.list_tracks(&album.id)?;
                if listing.len() != album.track_count {
                    warn!(
                        "Album {} advertises {} tracks but lists {}",
                        album.id,
                        album.track_count,
                        listing.len()
                    );
                }

                let inserted = listing
                    .into_iter()
                    .filter(|track| pool.insert_track(track.id.clone(), track.name.clone()))
                    .count();

                album_ids.push(album.id);
                track_counts.push(inserted);
            }

            let weights =
                self.synthesizer
                    .artist_weights(client, &album_ids, &track_counts, artist_count)?;

            info!(
                "Artist '{}' ({}): {} albums, {} tracks",
                name,
                artist_id,
                album_ids.len(),
                weights.len()
            );
            pool.extend_weights(weights);
        }

        let total = pool.total_weight();
        if !pool.is_empty() && (total - 1.0).abs() > MASS_TOLERANCE {
            if total > 0.0 && total.is_finite() {
                // Some artists contributed no tracks; spread their share over the rest
                warn!("Pool weights sum to {total:.6}, rescaling to 1.0");
                pool.scale_weights(1.0 / total);
            } else {
                warn!("Pool weights sum to {total}, leaving them unscaled");
            }
        }

        info!(
            "Track pool ready: {} tracks from {} artists ({} unique albums)",
            pool.len(),
            artist_count,
            dedup.seen_count()
        );
        Ok(pool)
    }
}
