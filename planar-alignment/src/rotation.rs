//! Elementary and composite rotation matrices.
use crate::types::{Axis, Mat3, Pt3, Vec3};
use serde::Serialize;

/// Proper rotation about a single principal axis.
/// Right-handed: a positive angle turns Y toward Z about X, Z toward X
/// about Y and X toward Y about Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation3x3 {
    axis: Axis,
    angle: f64,
    matrix: Mat3,
}

impl Rotation3x3 {
    pub fn new(axis: Axis, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = match axis {
            Axis::X => Mat3::new(
                1.0, 0.0, 0.0,
                0.0, c,   -s,
                0.0, s,   c,
            ),
            Axis::Y => Mat3::new(
                c,   0.0, s,
                0.0, 1.0, 0.0,
                -s,  0.0, c,
            ),
            Axis::Z => Mat3::new(
                c,   -s,  0.0,
                s,   c,   0.0,
                0.0, 0.0, 1.0,
            ),
        };
        Self {
            axis,
            angle,
            matrix,
        }
    }

    pub fn about_x(angle: f64) -> Self {
        Self::new(Axis::X, angle)
    }

    pub fn about_y(angle: f64) -> Self {
        Self::new(Axis::Y, angle)
    }

    pub fn about_z(angle: f64) -> Self {
        Self::new(Axis::Z, angle)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Rotation angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    pub fn apply(&self, v: &Vec3) -> Vec3 {
        self.matrix * v
    }

    /// Row-major copy of the matrix.
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        to_rows(&self.matrix)
    }

    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    /// R·Rᵗ ≈ I and det(R) ≈ +1.
    pub fn is_proper(&self, tolerance: f64) -> bool {
        is_proper(&self.matrix, tolerance)
    }
}

/// Product of elementary rotations, applied in sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeRotation {
    matrix: Mat3,
}

impl CompositeRotation {
    pub fn identity() -> Self {
        Self {
            matrix: Mat3::identity(),
        }
    }

    /// Compose rotations so that `steps[0]` acts first.
    /// `compose(&[t1, t2, t3])` is the matrix `t3·t2·t1`.
    pub fn compose(steps: &[Rotation3x3]) -> Self {
        steps
            .iter()
            .fold(Self::identity(), |acc, step| acc.then(step))
    }

    /// Append a rotation that acts after everything composed so far.
    pub fn then(&self, next: &Rotation3x3) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    pub fn apply(&self, v: &Vec3) -> Vec3 {
        self.matrix * v
    }

    /// Rotate `point` about `pivot`: `T·(point − pivot) + pivot`.
    pub fn apply_about(&self, point: &Pt3, pivot: &Pt3) -> Pt3 {
        pivot + self.matrix * (point - pivot)
    }

    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        to_rows(&self.matrix)
    }

    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    pub fn is_proper(&self, tolerance: f64) -> bool {
        is_proper(&self.matrix, tolerance)
    }

    pub fn is_identity(&self, tolerance: f64) -> bool {
        (self.matrix - Mat3::identity()).amax() <= tolerance
    }
}

impl Default for CompositeRotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Rotation3x3> for CompositeRotation {
    fn from(rotation: Rotation3x3) -> Self {
        Self {
            matrix: rotation.matrix,
        }
    }
}

/// Serialised form used in reports.
#[derive(Debug, Clone, Serialize)]
pub struct RotationSummary {
    pub axis: Axis,
    pub angle_rad: f64,
    pub angle_deg: f64,
    pub rows: [[f64; 3]; 3],
}

impl From<&Rotation3x3> for RotationSummary {
    fn from(rotation: &Rotation3x3) -> Self {
        Self {
            axis: rotation.axis,
            angle_rad: rotation.angle,
            angle_deg: rotation.angle.to_degrees(),
            rows: rotation.to_rows(),
        }
    }
}

fn to_rows(m: &Mat3) -> [[f64; 3]; 3] {
    let mut rows = [[0.0; 3]; 3];
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = m[(i, j)];
        }
    }
    rows
}

fn is_proper(m: &Mat3, tolerance: f64) -> bool {
    let orthogonal = (m * m.transpose() - Mat3::identity()).amax() <= tolerance;
    orthogonal && (m.determinant() - 1.0).abs() <= tolerance
}
