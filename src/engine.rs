// Engine - probabilistic similarity retrieval over a fitted store
//
// Converts embedding-space cosine distances into a temperature-scaled
// softmax distribution, then serves ranked top-k queries and weighted
// samples without replacement from that distribution.

use rand::{Rng, RngExt};

use crate::error::{EmbedError, Result};
use crate::store::EmbeddingStore;
use crate::types::{Candidate, Temperature};

/// Read-only retrieval engine borrowing a fitted store.
///
/// All operations take `&self`; independent callers may query
/// concurrently since the store never mutates after fit.
pub struct SimilarityEngine<'a> {
	store: &'a EmbeddingStore,
}

impl<'a> SimilarityEngine<'a> {
	pub fn new(store: &'a EmbeddingStore) -> Self {
		Self { store }
	}

	/// Ranked top-k retrieval for `id`.
	///
	/// Returns at most `k` candidates sorted by probability descending;
	/// ties keep store order. Asking for more than N-1 candidates
	/// silently truncates to all N-1 — never an error.
	pub fn query(&self, id: &str, k: usize, temperature: Temperature) -> Result<Vec<Candidate>> {
		let mut candidates = self.distribution(id, temperature)?;

		// Stable sort: equal probabilities preserve encounter order.
		candidates.sort_by(|a, b| {
			b.probability
				.partial_cmp(&a.probability)
				.unwrap_or(std::cmp::Ordering::Equal)
		});
		candidates.truncate(k);

		Ok(candidates)
	}

	/// Weighted sampling without replacement for `id`.
	///
	/// Draws `min(n, N-1)` distinct candidates, each draw weighted by the
	/// same softmax distribution `query` uses, with weights renormalized
	/// as items are removed. Results are sorted by their pre-draw
	/// probability descending.
	pub fn sample(&self, id: &str, n: usize, temperature: Temperature) -> Result<Vec<Candidate>> {
		self.sample_with(&mut rand::rng(), id, n, temperature)
	}

	/// `sample` with a caller-supplied RNG (seedable for tests).
	pub fn sample_with<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		id: &str,
		n: usize,
		temperature: Temperature,
	) -> Result<Vec<Candidate>> {
		if n == 0 {
			return Err(EmbedError::InvalidArgument(
				"sample count must be at least 1".into(),
			));
		}

		let mut pool = self.distribution(id, temperature)?;
		let draws = n.min(pool.len());
		let mut picked = Vec::with_capacity(draws);

		// Cumulative-weight draw, remove, renormalize via the shrinking
		// total. swap_remove is fine: order no longer matters here.
		for _ in 0..draws {
			let total: f32 = pool.iter().map(|c| c.probability).sum();
			let mut target = rng.random::<f32>() * total;

			let mut chosen = pool.len() - 1;
			for (idx, candidate) in pool.iter().enumerate() {
				target -= candidate.probability;
				if target <= 0.0 {
					chosen = idx;
					break;
				}
			}

			picked.push(pool.swap_remove(chosen));
		}

		picked.sort_by(|a, b| {
			b.probability
				.partial_cmp(&a.probability)
				.unwrap_or(std::cmp::Ordering::Equal)
		});

		Ok(picked)
	}

	/// Softmax distribution over every other stored item, in store order.
	///
	/// score = 1 - cosine_distance, then p_i = exp(score_i / T) / Σ.
	/// Computed with max subtraction; the distribution is identical.
	fn distribution(&self, id: &str, temperature: Temperature) -> Result<Vec<Candidate>> {
		let query = self.store.embedding_of(id)?;

		let mut candidates = Vec::with_capacity(self.store.len().saturating_sub(1));
		for other in self.store.ids() {
			if other.as_str() == id {
				continue;
			}
			let distance = query.distance(self.store.embedding_of(other)?);
			candidates.push(Candidate {
				id: other.clone(),
				probability: 0.0,
				distance,
			});
		}

		let t = temperature.value();
		let max_score = candidates
			.iter()
			.map(|c| 1.0 - c.distance)
			.fold(f32::NEG_INFINITY, f32::max);

		let mut total = 0.0f32;
		for candidate in &mut candidates {
			let score = 1.0 - candidate.distance;
			candidate.probability = ((score - max_score) / t).exp();
			total += candidate.probability;
		}
		for candidate in &mut candidates {
			candidate.probability /= total;
		}

		Ok(candidates)
	}
}
