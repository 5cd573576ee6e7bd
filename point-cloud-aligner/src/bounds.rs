//! Point cloud coordinate bounds tracking
use constants::processing::CHUNK_SIZE;
use planar_alignment::PointSet;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointCloudBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl PointCloudBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    /// Calculate bounds over a whole point set in parallel chunks.
    pub fn from_points(points: &PointSet) -> Self {
        points
            .as_slice()
            .par_chunks(CHUNK_SIZE)
            .map(|chunk| {
                let mut local_bounds = Self::new();
                for p in chunk {
                    local_bounds.update(p.x, p.y, p.z);
                }
                local_bounds
            })
            .reduce_with(|a, b| a.merge(&b))
            .unwrap_or_else(Self::new)
    }

    /// Update bounds with a new point
    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    pub fn merge(mut self, other: &Self) -> Self {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
        self.min_z = self.min_z.min(other.min_z);
        self.max_z = self.max_z.max(other.max_z);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    /// World space extent along each axis
    pub fn dimensions(&self) -> (f64, f64, f64) {
        (
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }
}

impl Default for PointCloudBounds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planar_alignment::Pt3;

    #[test]
    fn bounds_cover_all_points() {
        let points: PointSet = (0..60_000)
            .map(|i| Pt3::new(i as f64, -(i as f64) * 2.0, (i % 7) as f64))
            .collect();
        let bounds = PointCloudBounds::from_points(&points);

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 59_999.0);
        assert_eq!(bounds.min_y, -119_998.0);
        assert_eq!(bounds.max_y, 0.0);
        assert_eq!(bounds.dimensions().2, 6.0);
    }

    #[test]
    fn empty_point_set_gives_empty_bounds() {
        let bounds = PointCloudBounds::from_points(&PointSet::default());
        assert!(bounds.is_empty());
    }
}
