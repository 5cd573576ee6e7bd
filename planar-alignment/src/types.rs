//! Point, vector and matrix types shared across the engine.
use crate::error::ShapeError;
use constants::coordinate_system::{AXIS_LABELS, UNIT_X, UNIT_Y, UNIT_Z};
use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Vec3 = Vector3<f64>;
pub type Pt3 = Point3<f64>;
pub type Mat3 = Matrix3<f64>;

/// Principal axis of the right-handed coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Standard basis vector along this axis.
    pub fn unit(self) -> Vec3 {
        let [x, y, z] = match self {
            Axis::X => UNIT_X,
            Axis::Y => UNIT_Y,
            Axis::Z => UNIT_Z,
        };
        Vec3::new(x, y, z)
    }

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(AXIS_LABELS[self.index()])
    }
}

/// Ordered point cloud. Row `i` of any output corresponds to row `i` here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet(Vec<Pt3>);

impl PointSet {
    pub fn new(points: Vec<Pt3>) -> Self {
        Self(points)
    }

    /// Build from `[x, y, z]` rows, keeping row order.
    pub fn from_rows(rows: &[[f64; 3]]) -> Self {
        Self(rows.iter().map(|&[x, y, z]| Pt3::new(x, y, z)).collect())
    }

    pub fn to_rows(&self) -> Vec<[f64; 3]> {
        self.0.iter().map(|p| [p.x, p.y, p.z]).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pt3> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Pt3] {
        &self.0
    }

    pub fn into_points(self) -> Vec<Pt3> {
        self.0
    }
}

impl From<Vec<Pt3>> for PointSet {
    fn from(points: Vec<Pt3>) -> Self {
        Self(points)
    }
}

impl FromIterator<Pt3> for PointSet {
    fn from_iter<I: IntoIterator<Item = Pt3>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The three points defining the target plane. `p1` is the pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTriple {
    pub p1: Pt3,
    pub p2: Pt3,
    pub p3: Pt3,
}

impl ReferenceTriple {
    pub fn new(p1: Pt3, p2: Pt3, p3: Pt3) -> Self {
        Self { p1, p2, p3 }
    }

    /// Build from exactly three points, in order.
    pub fn from_points(points: &[Pt3]) -> Result<Self, ShapeError> {
        match points {
            [p1, p2, p3] => Ok(Self::new(*p1, *p2, *p3)),
            _ => Err(ShapeError::ReferenceRowCount(points.len())),
        }
    }

    /// Build from exactly three `[x, y, z]` rows, in order.
    pub fn from_rows(rows: &[[f64; 3]]) -> Result<Self, ShapeError> {
        let points = PointSet::from_rows(rows);
        Self::from_points(points.as_slice())
    }

    /// Translation origin for the rotation.
    pub fn pivot(&self) -> Pt3 {
        self.p1
    }

    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        [self.p1, self.p2, self.p3].map(|p| [p.x, p.y, p.z])
    }
}
