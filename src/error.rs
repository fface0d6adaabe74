// Error - typed failure taxonomy for fitting, retrieval and export

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbedError>;

/// Errors surfaced by the embedding pipeline and retrieval engine.
///
/// None of these are retried internally; fit either fully succeeds or
/// produces no store at all.
#[derive(Error, Debug)]
pub enum EmbedError {
	/// Malformed fit input (too few items, bad identifier, no labels).
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// Caller-supplied parameter outside its domain.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// Identifier absent from the fitted store.
	#[error("identifier '{0}' not found in fitted store")]
	NotFound(String),

	/// Failure while writing or reading the binary export.
	#[error("export I/O failed: {0}")]
	Io(#[from] std::io::Error),
}
