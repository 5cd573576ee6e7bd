//! Error taxonomy for the alignment engine.
use crate::types::Vec3;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failure inside the vector-angle computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("zero-magnitude vector (|v| = {v_norm:e}, |w| = {w_norm:e})")]
    ZeroMagnitude { v_norm: f64, w_norm: f64 },
    #[error("cosine argument {0} lies outside [-1, 1]")]
    CosineOutOfRange(f64),
    #[error("vector has non-finite components")]
    NonFinite,
}

/// Input tables that do not describe points in 3D.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("reference triple needs exactly 3 points, got {0}")]
    ReferenceRowCount(usize),
    #[error("row {row}: expected 3 fields, got {found}")]
    FieldCount { row: usize, found: usize },
    #[error("row {row}, field {field}: '{value}' is not a number")]
    NotNumeric {
        row: usize,
        field: usize,
        value: String,
    },
}

/// Builder that was running when an alignment failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignStage {
    /// T1, rotation about Y onto the XY-plane.
    XyPlane,
    /// T2, rotation about Z onto the X axis.
    XAxis,
    /// T3, rotation about X onto the XZ-plane.
    YzPlane,
}

impl fmt::Display for AlignStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlignStage::XyPlane => "align_to_xy_plane",
            AlignStage::XAxis => "align_to_x_axis",
            AlignStage::YzPlane => "align_to_yz_plane",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    #[error("{stage} failed for vector ({:.6}, {:.6}, {:.6}): {source}", .vector[0], .vector[1], .vector[2])]
    Domain {
        stage: AlignStage,
        vector: [f64; 3],
        #[source]
        source: DomainError,
    },
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl AlignError {
    /// Attach builder context to a domain failure.
    pub fn domain(stage: AlignStage, vector: &Vec3, source: DomainError) -> Self {
        AlignError::Domain {
            stage,
            vector: [vector.x, vector.y, vector.z],
            source,
        }
    }

    /// The builder that failed, if this is a domain failure.
    pub fn stage(&self) -> Option<AlignStage> {
        match self {
            AlignError::Domain { stage, .. } => Some(*stage),
            AlignError::Shape(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_names_builder_and_vector() {
        let err = AlignError::domain(
            AlignStage::YzPlane,
            &Vec3::new(2.0, 0.0, 0.0),
            DomainError::ZeroMagnitude {
                v_norm: 0.0,
                w_norm: 1.0,
            },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("align_to_yz_plane failed"), "{msg}");
        assert!(msg.contains("(2.000000, 0.000000, 0.000000)"), "{msg}");
        assert_eq!(err.stage(), Some(AlignStage::YzPlane));
    }

    #[test]
    fn shape_error_is_transparent() {
        let err: AlignError = ShapeError::ReferenceRowCount(2).into();
        assert_eq!(err.to_string(), "reference triple needs exactly 3 points, got 2");
        assert_eq!(err.stage(), None);
    }
}
