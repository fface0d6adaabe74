// Vocab - label vocabulary and multi-hot encoding
//
// Collects the distinct label tokens across all items, assigns each a
// stable position (lexicographic order, so builds are reproducible
// regardless of item order), and encodes items as multi-hot rows.

use std::collections::{BTreeSet, HashMap, HashSet};

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{EmbedError, Result};

/// One fit-input item: a unique identifier plus its label tokens.
///
/// Labels are treated as a set; duplicates collapse during encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
	pub id: String,
	pub labels: Vec<String>,
}

impl Item {
	pub fn new(id: impl Into<String>, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			id: id.into(),
			labels: labels.into_iter().map(Into::into).collect(),
		}
	}
}

/// Sorted label token → position mapping, built once per fit.
#[derive(Debug, Clone)]
pub struct Vocabulary {
	labels: Vec<String>,
	positions: HashMap<String, usize>,
}

impl Vocabulary {
	/// Builds the vocabulary from the union of all items' labels.
	pub fn build(items: &[Item]) -> Self {
		let distinct: BTreeSet<&str> = items
			.iter()
			.flat_map(|item| item.labels.iter().map(String::as_str))
			.collect();

		let labels: Vec<String> = distinct.into_iter().map(str::to_string).collect();
		let positions = labels
			.iter()
			.enumerate()
			.map(|(idx, label)| (label.clone(), idx))
			.collect();

		Self { labels, positions }
	}

	pub fn len(&self) -> usize {
		self.labels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.labels.is_empty()
	}

	pub fn position(&self, label: &str) -> Option<usize> {
		self.positions.get(label).copied()
	}

	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	/// Encodes items into the N × n_labels multi-hot matrix, input order.
	/// Items with empty label sets become all-zero rows.
	pub fn encode(&self, items: &[Item]) -> DMatrix<f32> {
		let mut matrix = DMatrix::zeros(items.len(), self.len());

		for (row, item) in items.iter().enumerate() {
			for label in &item.labels {
				if let Some(col) = self.position(label) {
					matrix[(row, col)] = 1.0;
				}
			}
		}

		matrix
	}
}

/// Validates fit input before any work happens.
///
/// Rejects fewer than two items, empty identifiers, identifiers with
/// embedded NUL bytes (they would corrupt the export record boundary),
/// and duplicate identifiers.
pub fn validate(items: &[Item]) -> Result<()> {
	if items.len() < 2 {
		return Err(EmbedError::InvalidInput(format!(
			"at least 2 items required to fit, got {}",
			items.len()
		)));
	}

	let mut seen = HashSet::with_capacity(items.len());
	for item in items {
		if item.id.is_empty() {
			return Err(EmbedError::InvalidInput("empty identifier".into()));
		}
		if item.id.contains('\0') {
			return Err(EmbedError::InvalidInput(format!(
				"identifier {:?} contains a NUL byte",
				item.id
			)));
		}
		if !seen.insert(item.id.as_str()) {
			return Err(EmbedError::InvalidInput(format!(
				"duplicate identifier '{}'",
				item.id
			)));
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn items() -> Vec<Item> {
		vec![
			Item::new("A", ["x", "y"]),
			Item::new("B", ["x"]),
			Item::new("C", ["z"]),
		]
	}

	#[test]
	fn vocabulary_is_sorted_and_order_independent() {
		let forward = Vocabulary::build(&items());
		let mut reversed_items = items();
		reversed_items.reverse();
		let reversed = Vocabulary::build(&reversed_items);

		assert_eq!(forward.labels(), &["x", "y", "z"]);
		assert_eq!(forward.labels(), reversed.labels());
	}

	#[test]
	fn encode_marks_label_positions() {
		let items = items();
		let vocab = Vocabulary::build(&items);
		let matrix = vocab.encode(&items);

		assert_eq!(matrix.nrows(), 3);
		assert_eq!(matrix.ncols(), 3);
		// A = {x, y}
		assert_eq!(matrix[(0, 0)], 1.0);
		assert_eq!(matrix[(0, 1)], 1.0);
		assert_eq!(matrix[(0, 2)], 0.0);
		// C = {z}
		assert_eq!(matrix[(2, 0)], 0.0);
		assert_eq!(matrix[(2, 2)], 1.0);
	}

	#[test]
	fn encode_collapses_duplicate_labels() {
		let items = vec![Item::new("A", ["x", "x"]), Item::new("B", ["y"])];
		let vocab = Vocabulary::build(&items);
		let matrix = vocab.encode(&items);

		assert_eq!(vocab.len(), 2);
		assert_eq!(matrix[(0, 0)], 1.0);
	}

	#[test]
	fn empty_label_set_encodes_to_zero_row() {
		let items = vec![Item::new("A", ["x"]), Item::new("B", Vec::<String>::new())];
		let vocab = Vocabulary::build(&items);
		let matrix = vocab.encode(&items);

		assert!(matrix.row(1).iter().all(|&v| v == 0.0));
	}

	#[test]
	fn validate_rejects_single_item() {
		let single = vec![Item::new("A", ["x"])];
		assert!(matches!(validate(&single), Err(EmbedError::InvalidInput(_))));
	}

	#[test]
	fn validate_rejects_nul_in_identifier() {
		let bad = vec![Item::new("A\0B", ["x"]), Item::new("C", ["y"])];
		assert!(matches!(validate(&bad), Err(EmbedError::InvalidInput(_))));
	}

	#[test]
	fn validate_rejects_duplicate_identifier() {
		let dup = vec![Item::new("A", ["x"]), Item::new("A", ["y"])];
		assert!(matches!(validate(&dup), Err(EmbedError::InvalidInput(_))));
	}

	#[test]
	fn validate_rejects_empty_identifier() {
		let bad = vec![Item::new("", ["x"]), Item::new("B", ["y"])];
		assert!(matches!(validate(&bad), Err(EmbedError::InvalidInput(_))));
	}
}
