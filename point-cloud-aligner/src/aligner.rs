//! Point cloud aligner orchestrating input, alignment and output.
use crate::bounds::PointCloudBounds;
use crate::laz::{LasCloud, is_las_path, read_cloud, write_cloud};
use crate::report::{AlignmentReport, ReportFiles};
use crate::table::{read_table, write_table};
use constants::coordinate_system::REFERENCE_PLANE;
use planar_alignment::{AlignConfig, Alignment, PlanarAligner, PointSet, ReferenceTriple};
use std::path::{Path, PathBuf};

/// Points as loaded, remembering where they came from so they can be
/// written back in the same format.
enum LoadedPoints {
    Table(PointSet),
    Las(LasCloud),
}

impl LoadedPoints {
    fn positions(&self) -> PointSet {
        match self {
            LoadedPoints::Table(points) => points.clone(),
            LoadedPoints::Las(cloud) => cloud.positions(),
        }
    }
}

/// Aligns a point cloud so that three reference points lie on the
/// reference plane. Supports delimited tables and LAS/LAZ clouds.
pub struct PointCloudAligner {
    /// Table of exactly three reference points.
    reference_path: PathBuf,
    /// Points to rotate.
    points_path: PathBuf,
    /// Destination for the rotated points.
    output_path: PathBuf,
    /// Optional JSON report destination.
    report_path: Option<PathBuf>,
    aligner: PlanarAligner,
}

impl PointCloudAligner {
    /// Create new aligner instance.
    /// Validates input paths and that the output format can hold the input.
    pub fn new(
        reference_path: &Path,
        points_path: &Path,
        output_path: &Path,
        config: AlignConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if !reference_path.is_file() {
            return Err(format!(
                "Reference file does not exist: {}",
                reference_path.display()
            )
            .into());
        }

        if !points_path.is_file() {
            return Err(format!("Points file does not exist: {}", points_path.display()).into());
        }

        if is_las_path(points_path) != is_las_path(output_path) {
            return Err(format!(
                "Output {} must use the same format as input {} (LAS/LAZ or delimited table)",
                output_path.display(),
                points_path.display()
            )
            .into());
        }

        Ok(Self {
            reference_path: reference_path.to_path_buf(),
            points_path: points_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            report_path: None,
            aligner: PlanarAligner::new(config),
        })
    }

    /// Also write a JSON report of the run.
    pub fn with_report(mut self, report_path: &Path) -> Self {
        self.report_path = Some(report_path.to_path_buf());
        self
    }

    /// Executes the complete alignment pipeline.
    /// Nothing is written if the alignment fails.
    pub fn run(&self) -> Result<AlignmentReport, Box<dyn std::error::Error>> {
        println!(
            "Aligning {} onto the {} using reference {}...",
            self.points_path.display(),
            REFERENCE_PLANE,
            self.reference_path.display()
        );

        let reference = self.load_reference()?;
        self.print_reference(&reference);

        let loaded = self.load_points()?;
        let points = loaded.positions();
        let bounds_before = PointCloudBounds::from_points(&points);
        self.print_bounds("Input bounds", &bounds_before);

        let alignment = self.aligner.align(&reference, &points)?;
        self.print_validation(&alignment);

        let bounds_after = PointCloudBounds::from_points(&alignment.points);
        self.print_bounds("Aligned bounds", &bounds_after);

        self.save_points(&loaded, &alignment.points)?;

        let report = AlignmentReport::new(
            ReportFiles {
                reference: self.reference_path.display().to_string(),
                points: self.points_path.display().to_string(),
                output: self.output_path.display().to_string(),
            },
            &reference,
            &alignment,
            self.aligner.config().tolerance,
            bounds_before,
            bounds_after,
        );

        if let Some(report_path) = &self.report_path {
            report.save(report_path)?;
        }

        println!("Alignment complete!");
        Ok(report)
    }

    fn load_reference(&self) -> Result<ReferenceTriple, Box<dyn std::error::Error>> {
        let rows = read_table(&self.reference_path)?;
        Ok(ReferenceTriple::from_rows(&rows)?)
    }

    fn load_points(&self) -> Result<LoadedPoints, Box<dyn std::error::Error>> {
        if is_las_path(&self.points_path) {
            Ok(LoadedPoints::Las(read_cloud(&self.points_path)?))
        } else {
            let rows = read_table(&self.points_path)?;
            println!("Loaded {} points from {}", rows.len(), self.points_path.display());
            Ok(LoadedPoints::Table(PointSet::from_rows(&rows)))
        }
    }

    fn save_points(
        &self,
        loaded: &LoadedPoints,
        rotated: &PointSet,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match loaded {
            LoadedPoints::Table(_) => write_table(&self.output_path, &rotated.to_rows())?,
            LoadedPoints::Las(cloud) => write_cloud(&self.output_path, cloud, rotated)?,
        }
        println!("Saved {} ({} points)", self.output_path.display(), rotated.len());
        Ok(())
    }

    fn print_reference(&self, reference: &ReferenceTriple) {
        println!("Reference points:");
        for (label, p) in [("p1", reference.p1), ("p2", reference.p2), ("p3", reference.p3)] {
            println!("  {}: ({:.6}, {:.6}, {:.6})", label, p.x, p.y, p.z);
        }
    }

    /// Print the reference vectors after each stage.
    fn print_validation(&self, alignment: &Alignment) {
        let d = &alignment.diagnostics;
        println!("Rotations:");
        for (name, r) in [("T1", &alignment.t1), ("T2", &alignment.t2), ("T3", &alignment.t3)] {
            println!(
                "  {} about {}: {:.6} rad ({:.3} deg)",
                name,
                r.axis(),
                r.angle(),
                r.angle().to_degrees()
            );
        }
        println!("Validation:");
        println!("  p1p2 aligned to XY-plane: {:?}", d.p1p2_in_xy_plane);
        println!("  p1p2 aligned to X-axis:   {:?}", d.p1p2_on_x_axis);
        println!("  p1p3 aligned to XZ-plane: {:?}", d.p1p3_in_xz_plane);
        println!("  Residual: {:e}", d.residual());
    }

    fn print_bounds(&self, title: &str, bounds: &PointCloudBounds) {
        if bounds.is_empty() {
            println!("{}: empty", title);
            return;
        }
        println!("{}:", title);
        println!("  X: {:.4} to {:.4}", bounds.min_x, bounds.max_x);
        println!("  Y: {:.4} to {:.4}", bounds.min_y, bounds.max_y);
        println!("  Z: {:.4} to {:.4}", bounds.min_z, bounds.max_z);
        let (dx, dy, dz) = bounds.dimensions();
        println!("  Extent: {:.4} x {:.4} x {:.4}", dx, dy, dz);
    }
}
