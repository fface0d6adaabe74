// Fit - one-shot pipeline from label sets to a fitted embedding store
//
// validate → vocabulary → multi-hot encode → SVD reduce → normalize.
// All-or-nothing: any failure surfaces before a store exists, so no
// partially-fitted state is ever observable.

use crate::error::Result;
use crate::reduce;
use crate::store::EmbeddingStore;
use crate::vocab::{self, Item, Vocabulary};

/// Fits unit-norm embeddings for `items`, reducing to at most `dims`
/// dimensions (effective dimensionality is `min(dims, N-1)`, further
/// capped by the decomposition rank).
///
/// Input order fixes the store's canonical identifier ordering.
pub fn fit(items: &[Item], dims: usize) -> Result<EmbeddingStore> {
	vocab::validate(items)?;

	let vocabulary = Vocabulary::build(items);
	let matrix = vocabulary.encode(items);

	let reduction = reduce::reduce(&matrix, dims)?;
	let mut rows = reduction.rows;
	reduce::normalize_rows(&mut rows);

	let order: Vec<String> = items.iter().map(|item| item.id.clone()).collect();

	Ok(EmbeddingStore::new(
		order,
		rows,
		reduction.dims,
		reduction.explained_variance,
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::SimilarityEngine;
	use crate::error::EmbedError;
	use crate::types::Temperature;

	fn items() -> Vec<Item> {
		vec![
			Item::new("A", ["x", "y"]),
			Item::new("B", ["x"]),
			Item::new("C", ["z"]),
		]
	}

	#[test]
	fn fitting_twice_is_deterministic() {
		let first = fit(&items(), 2).unwrap();
		let second = fit(&items(), 2).unwrap();

		assert_eq!(first.ids(), second.ids());
		for id in first.ids() {
			assert_eq!(
				first.embedding_of(id).unwrap().as_slice(),
				second.embedding_of(id).unwrap().as_slice()
			);
		}
	}

	#[test]
	fn dimensionality_is_bounded_by_item_count() {
		let store = fit(&items(), 8).unwrap();
		assert_eq!(store.dims(), 2);
		for id in store.ids() {
			assert_eq!(store.embedding_of(id).unwrap().dims(), 2);
		}
	}

	#[test]
	fn single_item_fails() {
		let single = vec![Item::new("A", ["x"])];
		assert!(matches!(
			fit(&single, 2),
			Err(EmbedError::InvalidInput(_))
		));
	}

	#[test]
	fn labelless_input_fails() {
		let bare = vec![
			Item::new("A", Vec::<String>::new()),
			Item::new("B", Vec::<String>::new()),
		];
		assert!(matches!(fit(&bare, 2), Err(EmbedError::InvalidInput(_))));
	}

	#[test]
	fn fitted_embeddings_are_unit_norm() {
		let store = fit(&items(), 2).unwrap();
		for id in store.ids() {
			let norm = store.embedding_of(id).unwrap().norm();
			assert!((norm - 1.0).abs() < 1e-5, "'{}' has norm {}", id, norm);
		}
	}

	#[test]
	fn explained_variance_is_reported() {
		let store = fit(&items(), 2).unwrap();
		assert!(store.explained_variance() > 0.0);
		assert!(store.explained_variance() <= 1.0);
	}

	/// The concrete scenario: A={x,y}, B={x}, C={z}, d=1. B shares a
	/// label with A and must land closer than C in the fitted space,
	/// whatever sign the decomposition picks.
	#[test]
	fn shared_labels_mean_shorter_distances() {
		let store = fit(&items(), 1).unwrap();
		assert_eq!(store.dims(), 1);

		let engine = SimilarityEngine::new(&store);
		let results = engine
			.query("A", 2, Temperature::new(1.0).unwrap())
			.unwrap();

		assert_eq!(results.len(), 2);
		assert_eq!(results[0].id, "B");
		assert_eq!(results[1].id, "C");
		assert!(results[0].distance <= results[1].distance);

		let mass: f32 = results.iter().map(|c| c.probability).sum();
		assert!((mass - 1.0).abs() < 1e-5);
	}
}
