//! Alignment report generation.
use crate::bounds::PointCloudBounds;
use constants::coordinate_system::REFERENCE_PLANE;
use planar_alignment::{Alignment, AlignmentDiagnostics, ReferenceTriple, RotationSummary, VectorBasis};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Everything needed to audit an alignment run after the fact.
#[derive(Debug, Serialize)]
pub struct AlignmentReport {
    pub files: ReportFiles,
    pub target_plane: &'static str,
    pub basis: VectorBasis,
    pub point_count: usize,
    /// Reference triple rows as read.
    pub reference: [[f64; 3]; 3],
    pub rotations: ReportRotations,
    /// `T3·T2·T1`, row-major.
    pub composite: [[f64; 3]; 3],
    pub diagnostics: AlignmentDiagnostics,
    pub aligned: bool,
    pub bounds_before: PointCloudBounds,
    pub bounds_after: PointCloudBounds,
}

#[derive(Debug, Serialize)]
pub struct ReportFiles {
    pub reference: String,
    pub points: String,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct ReportRotations {
    pub t1: RotationSummary,
    pub t2: RotationSummary,
    pub t3: RotationSummary,
}

impl AlignmentReport {
    pub fn new(
        files: ReportFiles,
        reference: &ReferenceTriple,
        alignment: &Alignment,
        tolerance: f64,
        bounds_before: PointCloudBounds,
        bounds_after: PointCloudBounds,
    ) -> Self {
        Self {
            files,
            target_plane: REFERENCE_PLANE,
            basis: alignment.diagnostics.basis,
            point_count: alignment.points.len(),
            reference: reference.to_rows(),
            rotations: ReportRotations {
                t1: RotationSummary::from(&alignment.t1),
                t2: RotationSummary::from(&alignment.t2),
                t3: RotationSummary::from(&alignment.t3),
            },
            composite: alignment.composite.to_rows(),
            diagnostics: alignment.diagnostics.clone(),
            aligned: alignment.diagnostics.is_aligned(tolerance),
            bounds_before,
            bounds_after,
        }
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        println!("Saved {}", path.display());
        Ok(())
    }
}
