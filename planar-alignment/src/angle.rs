//! Angle between two vectors.
use crate::error::DomainError;
use crate::types::Vec3;
use constants::tolerance::{COSINE_TOLERANCE, MIN_VECTOR_NORM};

/// Unsigned angle between `v` and `w`, in radians within `[0, π]`.
///
/// Fails on zero-magnitude or non-finite input. Rounding that pushes the
/// cosine slightly past ±1 is tolerated; anything further out is an error.
/// The angle itself is taken from `atan2(|v × w|, v · w)`, which equals
/// the arccos of the cosine but keeps full precision near 0 and π.
pub fn angle_between(v: &Vec3, w: &Vec3) -> Result<f64, DomainError> {
    if !v.iter().chain(w.iter()).all(|c| c.is_finite()) {
        return Err(DomainError::NonFinite);
    }

    let v_norm = v.norm();
    let w_norm = w.norm();
    if v_norm <= MIN_VECTOR_NORM || w_norm <= MIN_VECTOR_NORM {
        return Err(DomainError::ZeroMagnitude { v_norm, w_norm });
    }

    let cosine = v.dot(w) / (v_norm * w_norm);
    if !cosine.is_finite() || cosine.abs() > 1.0 + COSINE_TOLERANCE {
        return Err(DomainError::CosineOutOfRange(cosine));
    }

    Ok(v.cross(w).norm().atan2(v.dot(w)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn right_angle() {
        let theta = angle_between(&Vec3::x(), &Vec3::y()).unwrap();
        assert_abs_diff_eq!(theta, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn ignores_magnitude() {
        let theta = angle_between(&Vec3::new(0.0, 5.0, 5.0), &Vec3::new(0.0, 0.1, 0.0)).unwrap();
        assert_abs_diff_eq!(theta, FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn parallel_and_antiparallel_stay_in_range() {
        let v = Vec3::new(0.1, 0.2, 0.3);
        let same = angle_between(&v, &(v * 3.0)).unwrap();
        let opposite = angle_between(&v, &(-v)).unwrap();
        assert_abs_diff_eq!(same, 0.0, epsilon = 1e-7);
        assert_abs_diff_eq!(opposite, PI, epsilon = 1e-7);
        assert!(!same.is_nan());
        assert!(!opposite.is_nan());
    }

    #[test]
    fn zero_vector_is_rejected() {
        let err = angle_between(&Vec3::zeros(), &Vec3::x()).unwrap_err();
        assert!(matches!(err, DomainError::ZeroMagnitude { v_norm, .. } if v_norm == 0.0));

        let err = angle_between(&Vec3::x(), &Vec3::zeros()).unwrap_err();
        assert!(matches!(err, DomainError::ZeroMagnitude { w_norm, .. } if w_norm == 0.0));
    }

    #[test]
    fn tiny_angles_keep_precision() {
        let theta = angle_between(&Vec3::new(1.0, 0.0, 1e-8), &Vec3::x()).unwrap();
        assert_relative_eq!(theta, 1e-8, max_relative = 1e-9);

        let theta = angle_between(&Vec3::new(-1.0, 1e-9, 0.0), &Vec3::x()).unwrap();
        assert_relative_eq!(PI - theta, 1e-9, max_relative = 1e-6);
    }

    #[test]
    fn overflowing_cosine_is_rejected() {
        let err = angle_between(&Vec3::new(1e200, 1e200, 0.0), &Vec3::new(1e200, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, DomainError::CosineOutOfRange(c) if c.is_nan()));
    }

    #[test]
    fn non_finite_is_rejected() {
        let err = angle_between(&Vec3::new(f64::NAN, 0.0, 1.0), &Vec3::x()).unwrap_err();
        assert_eq!(err, DomainError::NonFinite);
    }
}
