//! Three-point planar alignment.
//!
//! Given a reference triple `p1, p2, p3`, derive three elementary rotations
//! `T1` (about Y), `T2` (about Z) and `T3` (about X) such that, with `p1` as
//! pivot, `p1p2` ends on the +X axis and `p1p3` ends in the XZ-plane (y = 0).
//! The composite `T = T3·T2·T1` is then applied to an arbitrary point set.
//!
//! ```
//! use planar_alignment::{PointSet, ReferenceTriple, align};
//!
//! let reference = ReferenceTriple::from_rows(&[
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 1.0, 1.0],
//! ])
//! .unwrap();
//! let points = PointSet::from_rows(&[[0.0, 1.0, 1.0]]);
//!
//! let alignment = align(&reference, &points).unwrap();
//! assert!(alignment.points.as_slice()[0].y.abs() < 1e-12);
//! ```

pub mod align;
pub mod angle;
pub mod builders;
pub mod config;
pub mod error;
pub mod rotation;
pub mod types;

pub use align::{Alignment, AlignmentDiagnostics, PlanarAligner, align, rotate_about_pivot};
pub use angle::angle_between;
pub use builders::{align_to_x_axis, align_to_xy_plane, align_to_yz_plane};
pub use config::{AlignConfig, VectorBasis};
pub use error::{AlignError, AlignStage, DomainError, ShapeError};
pub use rotation::{CompositeRotation, Rotation3x3, RotationSummary};
pub use types::{Axis, Mat3, PointSet, Pt3, ReferenceTriple, Vec3};
