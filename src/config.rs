//! Application defaults and numeric constants

// === Fit ===
pub const DEFAULT_DIMS: usize = 8;
pub const NORM_EPSILON: f32 = 1e-8;

// === Retrieval ===
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_SAMPLES: usize = 3;

// === Export ===
pub const DEFAULT_EXPORT: &str = "tags.emb";
