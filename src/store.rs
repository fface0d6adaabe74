// Store - immutable identifier → embedding mapping
//
// Populated exactly once by a successful fit and read-only afterwards.
// A failed fit never produces a store, so partial population is not
// observable.

use std::collections::HashMap;

use crate::error::{EmbedError, Result};
use crate::types::Embedding;

/// The fitted embedding space: identifier → vector plus the canonical
/// item ordering fixed at fit time.
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
	embeddings: HashMap<String, Embedding>,
	order: Vec<String>,
	dims: usize,
	explained_variance: f32,
}

impl EmbeddingStore {
	pub(crate) fn new(
		order: Vec<String>,
		vectors: Vec<Vec<f32>>,
		dims: usize,
		explained_variance: f32,
	) -> Self {
		let embeddings = order
			.iter()
			.cloned()
			.zip(vectors.into_iter().map(Embedding::raw))
			.collect();

		Self {
			embeddings,
			order,
			dims,
			explained_variance,
		}
	}

	/// Looks up the embedding for `id`.
	pub fn embedding_of(&self, id: &str) -> Result<&Embedding> {
		self.embeddings
			.get(id)
			.ok_or_else(|| EmbedError::NotFound(id.to_string()))
	}

	pub fn contains(&self, id: &str) -> bool {
		self.embeddings.contains_key(id)
	}

	/// All identifiers in fit-time order.
	pub fn ids(&self) -> &[String] {
		&self.order
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Actual fitted dimensionality (may be less than requested).
	pub fn dims(&self) -> usize {
		self.dims
	}

	/// Fraction of original variance retained by the reduction.
	pub fn explained_variance(&self) -> f32 {
		self.explained_variance
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store() -> EmbeddingStore {
		EmbeddingStore::new(
			vec!["a".into(), "b".into()],
			vec![vec![1.0, 0.0], vec![0.0, 1.0]],
			2,
			0.9,
		)
	}

	#[test]
	fn lookup_returns_the_fitted_vector() {
		let store = store();
		assert_eq!(store.embedding_of("a").unwrap().as_slice(), &[1.0, 0.0]);
	}

	#[test]
	fn unknown_identifier_is_not_found() {
		let store = store();
		assert!(matches!(
			store.embedding_of("missing"),
			Err(EmbedError::NotFound(_))
		));
	}

	#[test]
	fn contains_reflects_membership() {
		let store = store();
		assert!(store.contains("a"));
		assert!(!store.contains("z"));
	}

	#[test]
	fn ids_preserve_fit_order() {
		let store = store();
		assert_eq!(store.ids(), &["a", "b"]);
		assert_eq!(store.len(), 2);
		assert!(!store.is_empty());
	}
}
