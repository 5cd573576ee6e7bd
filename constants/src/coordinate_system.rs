/// Standard basis vectors, row order [x, y, z].
pub const UNIT_X: [f64; 3] = [1.0, 0.0, 0.0];
pub const UNIT_Y: [f64; 3] = [0.0, 1.0, 0.0];
pub const UNIT_Z: [f64; 3] = [0.0, 0.0, 1.0];

/// Axis labels used in reports and log output.
pub const AXIS_LABELS: [&str; 3] = ["x", "y", "z"];

/// Reference plane the three reference points are rotated onto.
/// p1p2 ends on +X, p1p3 ends in the XZ-plane.
pub const REFERENCE_PLANE: &str = "XZ-plane (y = 0)";
