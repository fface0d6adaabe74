// Reduce - truncated SVD projection and row normalization
//
// Projects the multi-hot matrix into a lower-dimensional dense space and
// reports how much of the original binary-vector variance survives.
// The numeric core is nalgebra's SVD; this module only owns the
// truncation, variance accounting and the unit-norm rescale.

use nalgebra::DMatrix;

use crate::config::NORM_EPSILON;
use crate::error::{EmbedError, Result};

/// Result of a dimensionality reduction over the multi-hot matrix.
pub struct Reduction {
	/// One dense row per input item, in input order.
	pub rows: Vec<Vec<f32>>,
	/// Effective dimensionality, `min(requested, N-1)` capped by rank.
	pub dims: usize,
	/// Fraction of original variance retained, in [0, 1].
	pub explained_variance: f32,
}

/// Projects `matrix` (N items × n_labels) onto its top singular
/// directions, keeping at most `dims` components.
///
/// The reduction cannot exceed one less than the item count, so the
/// effective dimensionality is `min(dims, N-1)`; it also cannot exceed
/// the factorization rank `min(N, n_labels)`. Fails with `InvalidInput`
/// for fewer than two items or a label-less input.
pub fn reduce(matrix: &DMatrix<f32>, dims: usize) -> Result<Reduction> {
	let n_items = matrix.nrows();
	let n_labels = matrix.ncols();

	if n_items < 2 {
		return Err(EmbedError::InvalidInput(format!(
			"reduction requires at least 2 items, got {}",
			n_items
		)));
	}
	if n_labels == 0 {
		return Err(EmbedError::InvalidInput(
			"no labels present on any item".into(),
		));
	}
	if dims == 0 {
		return Err(EmbedError::InvalidArgument(
			"target dimensionality must be at least 1".into(),
		));
	}

	let svd = matrix
		.clone()
		.try_svd(true, false, f32::EPSILON, 0)
		.ok_or_else(|| {
			EmbedError::InvalidInput("singular value decomposition did not converge".into())
		})?;

	let sigma = &svd.singular_values;
	let u = svd.u.ok_or_else(|| {
		EmbedError::InvalidInput("decomposition produced no left singular vectors".into())
	})?;

	let dims_eff = dims.min(n_items - 1).min(sigma.len());

	// Projected coordinates are U * Σ, truncated to the top components.
	let mut rows = vec![vec![0.0f32; dims_eff]; n_items];
	for (i, row) in rows.iter_mut().enumerate() {
		for (j, value) in row.iter_mut().enumerate() {
			*value = u[(i, j)] * sigma[j];
		}
	}

	let explained_variance = explained_ratio(matrix, &rows);

	Ok(Reduction {
		rows,
		dims: dims_eff,
		explained_variance,
	})
}

/// Rescales each row onto the unit sphere.
///
/// The divisor is `norm + epsilon`, so an all-zero row stays numerically
/// near zero instead of becoming NaN. That row is consequently NOT unit
/// norm; this is the accepted degenerate-input policy.
pub fn normalize_rows(rows: &mut [Vec<f32>]) {
	for row in rows.iter_mut() {
		let norm: f32 = row.iter().map(|x| x * x).sum::<f32>().sqrt();
		let denom = norm + NORM_EPSILON;
		row.iter_mut().for_each(|x| *x /= denom);
	}
}

/// Variance of the projected coordinates over total variance of the
/// original features. 0.0 when the input carries no variance at all.
fn explained_ratio(matrix: &DMatrix<f32>, rows: &[Vec<f32>]) -> f32 {
	let total: f32 = (0..matrix.ncols())
		.map(|col| {
			let values: Vec<f32> = matrix.column(col).iter().copied().collect();
			variance(&values)
		})
		.sum();

	if total <= 0.0 {
		return 0.0;
	}

	let dims = rows.first().map_or(0, Vec::len);
	let retained: f32 = (0..dims)
		.map(|col| {
			let values: Vec<f32> = rows.iter().map(|row| row[col]).collect();
			variance(&values)
		})
		.sum();

	(retained / total).clamp(0.0, 1.0)
}

fn variance(values: &[f32]) -> f32 {
	let n = values.len() as f32;
	let mean: f32 = values.iter().sum::<f32>() / n;
	values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n
}
