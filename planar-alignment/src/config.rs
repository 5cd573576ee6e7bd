//! Alignment configuration.
use crate::types::{Pt3, ReferenceTriple, Vec3};
use constants::processing::{CHUNK_SIZE, PARALLEL_THRESHOLD};
use constants::tolerance::ALIGNMENT_TOLERANCE;
use serde::{Deserialize, Serialize};

/// How the two in-plane reference vectors are derived from the triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorBasis {
    /// `p2 − p1` and `p3 − p1`.
    #[default]
    PivotRelative,
    /// `(p2 − p1) − p1` and `(p3 − p1) − p1`. Only the legacy double
    /// subtraction of p1; the builders still use the corrected sign
    /// convention. Coincides with `PivotRelative` when p1 is the origin.
    DoubleSubtracted,
}

impl VectorBasis {
    /// The vectors driven onto +X and into the XZ-plane respectively.
    pub fn reference_vectors(self, reference: &ReferenceTriple) -> (Vec3, Vec3) {
        let p1p2 = reference.p2 - reference.p1;
        let p1p3 = reference.p3 - reference.p1;
        match self {
            VectorBasis::PivotRelative => (p1p2, p1p3),
            VectorBasis::DoubleSubtracted => {
                let offset = reference.p1 - Pt3::origin();
                (p1p2 - offset, p1p3 - offset)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    pub basis: VectorBasis,
    /// Point sets at least this large are rotated on the rayon pool.
    pub parallel_threshold: usize,
    /// Points per parallel work unit.
    pub chunk_size: usize,
    /// Residual allowed when validating the aligned reference vectors.
    pub tolerance: f64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            basis: VectorBasis::default(),
            parallel_threshold: PARALLEL_THRESHOLD,
            chunk_size: CHUNK_SIZE,
            tolerance: ALIGNMENT_TOLERANCE,
        }
    }
}
