//! LAS/LAZ point cloud input and output.
use constants::processing::{
    LOAD_PROGRESS_TEMPLATE, PROGRESS_CHARS, PROGRESS_UPDATE_INTERVAL, WRITE_PROGRESS_TEMPLATE,
};
use indicatif::{ProgressBar, ProgressStyle};
use las::{Header, Point, Reader, Writer};
use planar_alignment::{PointSet, Pt3};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loaded LAS/LAZ cloud. Point records are kept so that every attribute
/// other than position survives the rewrite.
pub struct LasCloud {
    pub header: Header,
    pub points: Vec<Point>,
}

impl LasCloud {
    /// Point positions, in file order.
    pub fn positions(&self) -> PointSet {
        self.points.iter().map(|p| Pt3::new(p.x, p.y, p.z)).collect()
    }
}

/// True for `.las` and `.laz` paths.
pub fn is_las_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("las") || ext.eq_ignore_ascii_case("laz"))
}

/// Create LAS file reader for point cloud access.
/// Handles both .las and .laz compressed formats.
pub fn create_reader(file_path: &Path) -> Result<Reader, Box<dyn std::error::Error>> {
    let file = File::open(file_path)?;
    let buf_reader = BufReader::new(file);
    Ok(Reader::new(buf_reader)?)
}

/// Load every point of a LAS/LAZ file with progress tracking.
pub fn read_cloud(file_path: &Path) -> Result<LasCloud, Box<dyn std::error::Error>> {
    let mut reader = create_reader(file_path)?;
    let header = reader.header().clone();
    let total_points = header.number_of_points() as usize;

    println!("LAS/LAZ File Information:");
    println!("  File: {}", file_path.display());
    println!(
        "  Version: {}.{}",
        header.version().major,
        header.version().minor
    );
    println!("  Points: {}", total_points);

    let pb = progress_bar(total_points, LOAD_PROGRESS_TEMPLATE)?;
    pb.set_message("Loading points");

    let mut points = Vec::with_capacity(total_points);
    for (idx, point_result) in reader.points().enumerate() {
        points.push(point_result?);

        if idx % PROGRESS_UPDATE_INTERVAL == 0 {
            pb.set_position(idx as u64);
        }
    }
    pb.finish_with_message("Points loaded");

    Ok(LasCloud { header, points })
}

/// Write `rotated` positions into copies of the original records.
/// Record `i` of the output is record `i` of the input with its position
/// replaced by row `i` of `rotated`.
pub fn write_cloud(
    file_path: &Path,
    cloud: &LasCloud,
    rotated: &PointSet,
) -> Result<(), Box<dyn std::error::Error>> {
    if cloud.points.len() != rotated.len() {
        return Err(format!(
            "Rotated point count {} does not match input count {}",
            rotated.len(),
            cloud.points.len()
        )
        .into());
    }

    let mut writer = Writer::from_path(file_path, cloud.header.clone())?;

    let pb = progress_bar(rotated.len(), WRITE_PROGRESS_TEMPLATE)?;
    pb.set_message("Writing points");

    for (idx, (original, position)) in cloud.points.iter().zip(rotated.iter()).enumerate() {
        let point = Point {
            x: position.x,
            y: position.y,
            z: position.z,
            ..original.clone()
        };
        writer.write_point(point)?;

        if idx % PROGRESS_UPDATE_INTERVAL == 0 {
            pb.set_position(idx as u64);
        }
    }
    writer.close()?;
    pb.finish_with_message("Points written");

    Ok(())
}

fn progress_bar(len: usize, template: &str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)?
            .progress_chars(PROGRESS_CHARS),
    );
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use las::point::Format;
    use las::Builder;

    /// Five points with distinct intensity and GPS time.
    fn write_fixture(path: &Path) {
        let mut builder = Builder::from((1, 2));
        builder.point_format = Format::new(1).unwrap();
        let mut writer = Writer::from_path(path, builder.into_header().unwrap()).unwrap();
        for i in 0..5 {
            let t = i as f64;
            writer
                .write_point(Point {
                    x: t,
                    y: 2.0 + t * 0.5,
                    z: 3.0 - t,
                    intensity: 100 + i as u16,
                    gps_time: Some(t),
                    ..Default::default()
                })
                .unwrap();
        }
        writer.close().unwrap();
    }

    fn rewrites_positions_and_keeps_attributes(extension: &str) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(format!("scan.{extension}"));
        let output = dir.path().join(format!("aligned.{extension}"));
        write_fixture(&input);

        let cloud = read_cloud(&input).unwrap();
        assert_eq!(cloud.points.len(), 5);
        let moved: PointSet = cloud
            .positions()
            .iter()
            .map(|p| Pt3::new(p.x + 10.0, p.y, -p.z))
            .collect();
        write_cloud(&output, &cloud, &moved).unwrap();

        let mut reader = create_reader(&output).unwrap();
        assert_eq!(reader.header().number_of_points(), 5);
        let points: Vec<Point> = reader.points().map(|p| p.unwrap()).collect();
        assert_eq!(points.len(), 5);
        for (i, point) in points.iter().enumerate() {
            let t = i as f64;
            assert_abs_diff_eq!(point.x, t + 10.0, epsilon = 1e-6);
            assert_abs_diff_eq!(point.y, 2.0 + t * 0.5, epsilon = 1e-6);
            assert_abs_diff_eq!(point.z, t - 3.0, epsilon = 1e-6);
            assert_eq!(point.intensity, 100 + i as u16);
            assert_eq!(point.gps_time, Some(t));
        }
    }

    #[test]
    fn las_rewrite_keeps_attributes() {
        rewrites_positions_and_keeps_attributes("las");
    }

    #[test]
    fn laz_rewrite_keeps_attributes() {
        rewrites_positions_and_keeps_attributes("laz");
    }

    #[test]
    fn point_count_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.las");
        let output = dir.path().join("aligned.las");
        write_fixture(&input);

        let cloud = read_cloud(&input).unwrap();
        let short = PointSet::from_rows(&[[0.0, 0.0, 0.0]]);
        assert!(write_cloud(&output, &cloud, &short).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn recognises_las_extensions() {
        assert!(is_las_path(Path::new("scan.las")));
        assert!(is_las_path(Path::new("/data/scan.LAZ")));
        assert!(!is_las_path(Path::new("points.csv")));
        assert!(!is_las_path(Path::new("las")));
    }
}
