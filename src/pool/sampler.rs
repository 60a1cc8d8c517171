use super::TrackPool;
use crate::error::SampleError;
use rand::Rng;

/// Allowed drift of the pool's total weight from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Draws tracks from a pool without replacement, weighted by selection probability
pub struct WeightedSampler;

impl WeightedSampler {
    /// Sample up to `size` distinct track ids using a fresh random source.
    ///
    /// Calling this again on the same pool gives a new, independent selection.
    pub fn sample(pool: &TrackPool, size: usize) -> Result<Vec<String>, SampleError> {
        let mut rng = rand::thread_rng();
        Self::sample_with_rng(pool, size, &mut rng)
    }

    /// Sample `min(size, pool.len())` distinct track ids.
    ///
    /// Each draw picks a remaining track with probability proportional to its
    /// weight among the tracks not drawn yet. Ids come back in draw order.
    ///
    /// Uses Efraimidis–Spirakis keys kept in log space, `ln(u) / w`, so pools
    /// of thousands of tiny weights still rank by weight.
    pub fn sample_with_rng<R: Rng + ?Sized>(
        pool: &TrackPool,
        size: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, SampleError> {
        Self::check_weights(pool)?;

        let amount = size.min(pool.len());
        if amount == 0 {
            return Ok(Vec::new());
        }

        let mut keyed: Vec<(f64, usize)> = pool
            .weights()
            .iter()
            .enumerate()
            .map(|(i, &weight)| (Self::draw_key(rng, weight), i))
            .collect();
        keyed.sort_unstable_by(|a, b| b.0.total_cmp(&a.0));

        let tracks = pool.tracks();
        Ok(keyed
            .into_iter()
            .take(amount)
            .map(|(_, i)| tracks[i].0.clone())
            .collect())
    }

    fn draw_key<R: Rng + ?Sized>(rng: &mut R, weight: f64) -> f64 {
        if weight <= 0.0 {
            return f64::NEG_INFINITY;
        }
        // u in (0, 1] so ln(u) is finite
        let u = 1.0 - rng.r#gen::<f64>();
        u.ln() / weight
    }

    fn check_weights(pool: &TrackPool) -> Result<(), SampleError> {
        let weights = pool.weights();
        if weights.len() != pool.len() {
            return Err(SampleError::LengthMismatch {
                tracks: pool.len(),
                weights: weights.len(),
            });
        }
        if pool.is_empty() {
            return Ok(());
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(SampleError::InvalidWeights(format!(
                "weight {bad} is not a probability"
            )));
        }

        let total = pool.total_weight();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(SampleError::NotNormalized(total));
        }
        Ok(())
    }
}
