use crate::client::CatalogClient;
use crate::error::CatalogError;

/// Weight of a track from an album the user has not saved
pub const BASE_WEIGHT: f64 = 1.0;
/// Extra weight for tracks from saved albums
pub const SAVED_BONUS: f64 = 4.7;

/// Turns per-album saved flags into per-track selection weights
#[derive(Debug, Clone, Copy)]
pub struct WeightSynthesizer {
    pub base: f64,
    pub saved_bonus: f64,
}

impl Default for WeightSynthesizer {
    fn default() -> Self {
        Self {
            base: BASE_WEIGHT,
            saved_bonus: SAVED_BONUS,
        }
    }
}

impl WeightSynthesizer {
    /// Normalized weights for every track of one artist's albums.
    ///
    /// The returned vector sums to `1 / artist_count`, or is empty when the
    /// albums hold no tracks.
    pub fn artist_weights(
        &self,
        client: &dyn CatalogClient,
        album_ids: &[String],
        track_counts: &[usize],
        artist_count: usize,
    ) -> Result<Vec<f64>, CatalogError> {
        if album_ids.is_empty() {
            return Ok(Vec::new());
        }

        let saved = client.saved_status(album_ids)?;
        if saved.len() != album_ids.len() {
            return Err(CatalogError::SavedStatusMismatch {
                expected: album_ids.len(),
                got: saved.len(),
            });
        }

        let raw = self.raw_weights(&saved, track_counts);
        Ok(Self::normalize(raw, artist_count))
    }

    /// One weight per track, the album's flag repeated over its track count
    pub fn raw_weights(&self, saved: &[bool], track_counts: &[usize]) -> Vec<f64> {
        saved
            .iter()
            .zip(track_counts)
            .flat_map(|(&is_saved, &count)| {
                std::iter::repeat(self.weight_for(is_saved)).take(count)
            })
            .collect()
    }

    pub fn weight_for(&self, is_saved: bool) -> f64 {
        f64::from(u8::from(is_saved)) * self.saved_bonus + self.base
    }

    /// Scale so the vector sums to `1 / artist_count`
    pub fn normalize(mut weights: Vec<f64>, artist_count: usize) -> Vec<f64> {
        let sum: f64 = weights.iter().sum();
        if weights.is_empty() || sum <= 0.0 || artist_count == 0 {
            return weights;
        }

        let divisor = artist_count as f64 * sum;
        for weight in &mut weights {
            *weight /= divisor;
        }
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockCatalogClient;
    use approx::assert_relative_eq;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_saved_tracks_weigh_more() {
        let synth = WeightSynthesizer::default();
        assert_relative_eq!(synth.weight_for(true), 5.7);
        assert_relative_eq!(synth.weight_for(false), 1.0);
        assert_relative_eq!(synth.weight_for(true) / synth.weight_for(false), 5.7);
    }

    #[test]
    fn test_raw_weights_repeat_per_track() {
        let synth = WeightSynthesizer::default();
        let raw = synth.raw_weights(&[true, false, true], &[2, 1, 0]);
        assert_eq!(raw.len(), 3);
        assert_relative_eq!(raw[0], 5.7);
        assert_relative_eq!(raw[1], 5.7);
        assert_relative_eq!(raw[2], 1.0);
    }

    #[test]
    fn test_normalize_gives_equal_share_per_artist() {
        let small = WeightSynthesizer::normalize(vec![1.0; 10], 2);
        let large = WeightSynthesizer::normalize(vec![5.7; 500], 2);

        assert_relative_eq!(small.iter().sum::<f64>(), 0.5, epsilon = 1e-9);
        assert_relative_eq!(large.iter().sum::<f64>(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_empty_vector() {
        assert!(WeightSynthesizer::normalize(Vec::new(), 3).is_empty());
    }

    #[test]
    fn test_artist_weights_uses_saved_status() {
        let mut client = MockCatalogClient::new();
        client
            .expect_saved_status()
            .withf(|album_ids| {
                album_ids.len() == 2 && album_ids[0] == "saved" && album_ids[1] == "unsaved"
            })
            .times(1)
            .returning(|_| Ok(vec![true, false]));

        let synth = WeightSynthesizer::default();
        let weights = synth
            .artist_weights(&client, &ids(&["saved", "unsaved"]), &[1, 2], 1)
            .unwrap();

        // 5.7 + 1 + 1 = 7.7
        assert_eq!(weights.len(), 3);
        assert_relative_eq!(weights[0], 5.7 / 7.7, epsilon = 1e-12);
        assert_relative_eq!(weights[1], 1.0 / 7.7, epsilon = 1e-12);
        assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_albums_skips_remote_lookup() {
        let mut client = MockCatalogClient::new();
        client.expect_saved_status().never();

        let synth = WeightSynthesizer::default();
        let weights = synth.artist_weights(&client, &[], &[], 2).unwrap();
        assert!(weights.is_empty());
    }

    #[test]
    fn test_short_saved_status_response_is_an_error() {
        let mut client = MockCatalogClient::new();
        client.expect_saved_status().returning(|_| Ok(vec![true]));

        let synth = WeightSynthesizer::default();
        let result = synth.artist_weights(&client, &ids(&["a", "b"]), &[3, 4], 1);
        assert!(matches!(
            result,
            Err(CatalogError::SavedStatusMismatch { expected: 2, got: 1 })
        ));
    }
}
