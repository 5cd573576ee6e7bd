//! Alignment driver: derive T1, T2, T3 from a reference triple and rotate a
//! point set about the pivot.
use crate::builders::{align_to_x_axis, align_to_xy_plane, align_to_yz_plane};
use crate::config::{AlignConfig, VectorBasis};
use crate::error::AlignError;
use crate::rotation::{CompositeRotation, Rotation3x3};
use crate::types::{PointSet, Pt3, ReferenceTriple, Vec3};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Result of a successful alignment.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Rotated point set, row for row with the input.
    pub points: PointSet,
    /// Rotation about Y onto the XY-plane.
    pub t1: Rotation3x3,
    /// Rotation about Z onto the X axis.
    pub t2: Rotation3x3,
    /// Rotation about X onto the XZ-plane.
    pub t3: Rotation3x3,
    /// `t3·t2·t1`.
    pub composite: CompositeRotation,
    pub diagnostics: AlignmentDiagnostics,
}

/// Reference vectors before and after each stage, for validation.
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentDiagnostics {
    pub basis: VectorBasis,
    pub p1p2_orig: [f64; 3],
    pub p1p3_orig: [f64; 3],
    /// `T1·p1p2_orig`, z ≈ 0.
    pub p1p2_in_xy_plane: [f64; 3],
    /// `T2·T1·p1p2_orig`, y ≈ z ≈ 0.
    pub p1p2_on_x_axis: [f64; 3],
    /// `T·p1p3_orig`, y ≈ 0.
    pub p1p3_in_xz_plane: [f64; 3],
}

impl AlignmentDiagnostics {
    /// Largest off-target component across the validation vectors.
    pub fn residual(&self) -> f64 {
        let [_, y2, z2] = self.p1p2_on_x_axis;
        let [_, y3, _] = self.p1p3_in_xz_plane;
        y2.abs().max(z2.abs()).max(y3.abs())
    }

    /// p1p2 lies on +X and p1p3 in the XZ-plane, within `tolerance`
    /// relative to the reference vector lengths.
    pub fn is_aligned(&self, tolerance: f64) -> bool {
        let scale = norm(&self.p1p2_orig).max(norm(&self.p1p3_orig)).max(1.0);
        self.residual() <= tolerance * scale && self.p1p2_on_x_axis[0] > 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanarAligner {
    config: AlignConfig,
}

impl PlanarAligner {
    pub fn new(config: AlignConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Derive the three elementary rotations for `reference` without
    /// touching any point set.
    pub fn derive(
        &self,
        reference: &ReferenceTriple,
    ) -> Result<(Rotation3x3, Rotation3x3, Rotation3x3, AlignmentDiagnostics), AlignError> {
        let basis = self.config.basis;
        let (p1p2_orig, p1p3_orig) = basis.reference_vectors(reference);
        debug!(?basis, p1p2_orig = ?to_array(&p1p2_orig), p1p3_orig = ?to_array(&p1p3_orig), "reference vectors");

        let t1 = align_to_xy_plane(&p1p2_orig)?;
        let p1p2_in_xy_plane = t1.apply(&p1p2_orig);
        debug!(angle = t1.angle(), image = ?to_array(&p1p2_in_xy_plane), "T1 about y");

        let t2 = align_to_x_axis(&p1p2_in_xy_plane)?;
        let p1p2_on_x_axis = t2.apply(&p1p2_in_xy_plane);
        debug!(angle = t2.angle(), image = ?to_array(&p1p2_on_x_axis), "T2 about z");

        let t3 = align_to_yz_plane(&t2.apply(&t1.apply(&p1p3_orig)))?;
        let composite = CompositeRotation::compose(&[t1, t2, t3]);
        let p1p3_in_xz_plane = composite.apply(&p1p3_orig);
        debug!(angle = t3.angle(), image = ?to_array(&p1p3_in_xz_plane), "T3 about x");

        let diagnostics = AlignmentDiagnostics {
            basis,
            p1p2_orig: to_array(&p1p2_orig),
            p1p3_orig: to_array(&p1p3_orig),
            p1p2_in_xy_plane: to_array(&p1p2_in_xy_plane),
            p1p2_on_x_axis: to_array(&p1p2_on_x_axis),
            p1p3_in_xz_plane: to_array(&p1p3_in_xz_plane),
        };
        Ok((t1, t2, t3, diagnostics))
    }

    /// Rotate `points` so that the reference triple lands on the XZ-plane.
    /// Any failure aborts the whole call; there is no partial output.
    pub fn align(
        &self,
        reference: &ReferenceTriple,
        points: &PointSet,
    ) -> Result<Alignment, AlignError> {
        let (t1, t2, t3, diagnostics) = self.derive(reference)?;
        let composite = CompositeRotation::compose(&[t1, t2, t3]);

        let rotated = rotate_about_pivot(points, &composite, &reference.pivot(), &self.config);

        info!(
            points = rotated.len(),
            t1_deg = t1.angle().to_degrees(),
            t2_deg = t2.angle().to_degrees(),
            t3_deg = t3.angle().to_degrees(),
            residual = diagnostics.residual(),
            "aligned reference triple to XZ-plane"
        );

        Ok(Alignment {
            points: rotated,
            t1,
            t2,
            t3,
            composite,
            diagnostics,
        })
    }
}

/// Align with the default configuration.
pub fn align(reference: &ReferenceTriple, points: &PointSet) -> Result<Alignment, AlignError> {
    PlanarAligner::default().align(reference, points)
}

/// Apply `p' = T·(p − pivot) + pivot` to every point, keeping row order.
/// Large sets are split into chunks and rotated in parallel.
pub fn rotate_about_pivot(
    points: &PointSet,
    rotation: &CompositeRotation,
    pivot: &Pt3,
    config: &AlignConfig,
) -> PointSet {
    let slice = points.as_slice();
    if slice.len() < config.parallel_threshold {
        return slice
            .iter()
            .map(|p| rotation.apply_about(p, pivot))
            .collect();
    }

    let rotated: Vec<Pt3> = slice
        .par_chunks(config.chunk_size.max(1))
        .flat_map_iter(|chunk| chunk.iter().map(|p| rotation.apply_about(p, pivot)))
        .collect();
    PointSet::new(rotated)
}

fn to_array(v: &Vec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

fn norm(v: &[f64; 3]) -> f64 {
    Vec3::new(v[0], v[1], v[2]).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn skewed_triple() -> ReferenceTriple {
        ReferenceTriple::from_rows(&[[1.0, -2.0, 0.5], [3.0, 1.0, 2.0], [-1.0, 0.0, 4.0]])
            .unwrap()
    }

    #[test]
    fn derive_reports_validation_vectors() {
        let (t1, t2, t3, diagnostics) = PlanarAligner::default().derive(&skewed_triple()).unwrap();
        assert!(diagnostics.is_aligned(1e-9), "{diagnostics:?}");
        assert_relative_eq!(diagnostics.p1p2_in_xy_plane[2], 0.0, epsilon = 1e-12);

        let composite = CompositeRotation::compose(&[t1, t2, t3]);
        let [x, y, z] = diagnostics.p1p3_orig;
        let image = composite.apply(&Vec3::new(x, y, z));
        assert_relative_eq!(image.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_and_sequential_rotation_agree() {
        let points: PointSet = (0..1_000)
            .map(|i| {
                let t = i as f64 * 0.01;
                Pt3::new(t.sin() * 10.0, t.cos() - 2.0, t)
            })
            .collect();
        let reference = skewed_triple();
        let (t1, t2, t3, _) = PlanarAligner::default().derive(&reference).unwrap();
        let composite = CompositeRotation::compose(&[t1, t2, t3]);

        let sequential = AlignConfig::default();
        let parallel = AlignConfig {
            parallel_threshold: 0,
            chunk_size: 7,
            ..AlignConfig::default()
        };

        let a = rotate_about_pivot(&points, &composite, &reference.pivot(), &sequential);
        let b = rotate_about_pivot(&points, &composite, &reference.pivot(), &parallel);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_point_set_is_fine() {
        let alignment = align(&skewed_triple(), &PointSet::default()).unwrap();
        assert!(alignment.points.is_empty());
    }
}
