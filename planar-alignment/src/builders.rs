//! Elementary rotation builders.
//!
//! Each builder fixes one degree of freedom: it measures an unsigned angle
//! with [`angle_between`], takes the sign from the input vector and returns
//! the rotation about a single principal axis that reaches its target.
//! Run in sequence (T1, then T2 on the T1 image, then T3 on the T2·T1 image)
//! they bring `p1p2` onto +X and `p1p3` into the XZ-plane.
use crate::angle::angle_between;
use crate::error::{AlignError, AlignStage};
use crate::rotation::Rotation3x3;
use crate::types::{Axis, Vec3};
use constants::tolerance::MIN_VECTOR_NORM;
use std::f64::consts::FRAC_PI_2;

/// Rotation about Y that brings `v` into the XY-plane (z = 0, x ≥ 0).
pub fn align_to_xy_plane(v: &Vec3) -> Result<Rotation3x3, AlignError> {
    let projection = Vec3::new(v.x, 0.0, v.z);

    // On the Y axis the vector is already in the XY-plane.
    if projection.norm() <= MIN_VECTOR_NORM && v.norm() > MIN_VECTOR_NORM {
        return Ok(Rotation3x3::about_y(0.0));
    }

    let theta = angle_between(&projection, &Axis::X.unit())
        .map_err(|e| AlignError::domain(AlignStage::XyPlane, v, e))?;
    let angle = if v.z < 0.0 { -theta } else { theta };

    Ok(Rotation3x3::about_y(angle))
}

/// Rotation about Z that brings an XY-plane vector onto the +X axis.
pub fn align_to_x_axis(v: &Vec3) -> Result<Rotation3x3, AlignError> {
    let theta = angle_between(v, &Axis::X.unit())
        .map_err(|e| AlignError::domain(AlignStage::XAxis, v, e))?;
    let angle = if v.y > 0.0 { -theta } else { theta };

    Ok(Rotation3x3::about_z(angle))
}

/// Rotation about X that brings `v` into the XZ-plane (y = 0).
///
/// Takes the shorter way round: the image lands on the side of the
/// XZ-plane `v` already leans toward, so a vector already in the plane
/// gets the identity.
pub fn align_to_yz_plane(v: &Vec3) -> Result<Rotation3x3, AlignError> {
    let projection = Vec3::new(0.0, v.y, v.z);
    let theta = angle_between(&projection, &Axis::Y.unit())
        .map_err(|e| AlignError::domain(AlignStage::YzPlane, v, e))?;
    let angle = if v.z < 0.0 {
        theta - FRAC_PI_2
    } else {
        FRAC_PI_2 - theta
    };

    Ok(Rotation3x3::about_x(angle))
}
