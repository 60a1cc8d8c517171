pub mod builder;
pub mod dedup;
pub mod sampler;
pub mod weights;

pub use builder::*;
pub use dedup::*;
pub use sampler::*;
pub use weights::*;

use std::collections::HashMap;

/// The candidate tracks of one run with their selection probabilities.
///
/// Tracks keep discovery order and `weights[i]` belongs to `tracks[i]`.
#[derive(Debug, Clone, Default)]
pub struct TrackPool {
    tracks: Vec<(String, String)>,
    index: HashMap<String, usize>,
    weights: Vec<f64>,
}

impl TrackPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track name for an id in the pool
    pub fn name_of(&self, track_id: &str) -> Option<&str> {
        self.index
            .get(track_id)
            .map(|&i| self.tracks[i].1.as_str())
    }

    /// `(id, name)` pairs in insertion order
    pub fn tracks(&self) -> &[(String, String)] {
        &self.tracks
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Insert a track unless its id is already present. Returns whether it was added.
    pub(crate) fn insert_track(&mut self, id: String, name: String) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.tracks.len());
        self.tracks.push((id, name));
        true
    }

    pub(crate) fn extend_weights(&mut self, weights: impl IntoIterator<Item = f64>) {
        self.weights.extend(weights);
    }

    pub(crate) fn scale_weights(&mut self, factor: f64) {
        for weight in &mut self.weights {
            *weight *= factor;
        }
    }
}

#[cfg(test)]
impl TrackPool {
    /// Build a pool directly from aligned tracks and weights
    pub fn from_parts(tracks: Vec<(&str, &str)>, weights: Vec<f64>) -> Self {
        let mut pool = Self::new();
        for (id, name) in tracks {
            pool.insert_track(id.to_string(), name.to_string());
        }
        pool.extend_weights(weights);
        pool
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.index.contains_key(track_id)
    }

    /// Track ids in insertion order
    pub fn track_ids(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|(id, _)| id.as_str())
    }
}
