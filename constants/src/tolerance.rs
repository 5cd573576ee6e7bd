/// Norms at or below this are treated as zero-magnitude vectors.
pub const MIN_VECTOR_NORM: f64 = 1e-12;

/// Slack allowed on a cosine argument outside [-1, 1] before it is rejected.
/// Anything within the slack is clamped.
pub const COSINE_TOLERANCE: f64 = 1e-9;

/// Default tolerance for post-alignment validation (off-plane residuals,
/// orthogonality and identity checks).
pub const ALIGNMENT_TOLERANCE: f64 = 1e-9;
