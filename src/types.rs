//! Core domain types with strong type safety
//!
//! This module defines the fundamental types used throughout tagspace:
//! - `Embedding`: Dense vector representation of an item's tag set
//! - `Candidate`: Retrieval result with probability and distance
//! - `Temperature`: Type-safe softmax sharpness parameter

use serde::{Deserialize, Serialize};

use crate::error::{EmbedError, Result};

/// Dense embedding vector for an item
///
/// Vectors are rescaled toward unit length during fit; a degenerate
/// all-zero reduced vector stays near zero instead of becoming NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(pub Vec<f32>);

impl Embedding {
	/// Wraps an already-computed vector (fit output, deserialization)
	pub fn raw(data: Vec<f32>) -> Self {
		Self(data)
	}

	pub fn as_slice(&self) -> &[f32] {
		&self.0
	}

	pub fn dims(&self) -> usize {
		self.0.len()
	}

	/// L2 norm of the vector
	pub fn norm(&self) -> f32 {
		self.0.iter().map(|x| x * x).sum::<f32>().sqrt()
	}

	/// Cosine similarity with another embedding
	///
	/// A direction-less (all-zero) vector has similarity 0.0 with
	/// everything, matching the near-zero degenerate-row policy.
	pub fn similarity(&self, other: &Self) -> f32 {
		let dot: f32 = self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum();
		let denom = self.norm() * other.norm();
		if denom > 0.0 {
			dot / denom
		} else {
			0.0
		}
	}

	/// Cosine distance: 0 = identical direction, larger = more dissimilar
	pub fn distance(&self, other: &Self) -> f32 {
		1.0 - self.similarity(other)
	}
}

/// Retrieval result: a candidate item with its softmax probability and
/// cosine distance to the query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
	pub id: String,
	pub probability: f32,
	pub distance: f32,
}

/// Type-safe softmax temperature
///
/// Must be finite and strictly positive. Larger values flatten the
/// distribution toward uniform, smaller values sharpen it toward the
/// closest items.
#[derive(Debug, Clone, Copy)]
pub struct Temperature(f32);

impl Temperature {
	/// Creates a new temperature, rejecting values outside (0, ∞)
	pub fn new(t: f32) -> Result<Self> {
		if t.is_finite() && t > 0.0 {
			Ok(Self(t))
		} else {
			Err(EmbedError::InvalidArgument(format!(
				"temperature must be finite and > 0, got {}",
				t
			)))
		}
	}

	pub fn value(&self) -> f32 {
		self.0
	}
}
