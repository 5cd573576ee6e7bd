//! Three-point planar alignment of point clouds, command line entry point
mod aligner;
mod bounds;
mod laz;
mod report;
mod table;

use aligner::PointCloudAligner;
use clap::Parser;
use planar_alignment::{AlignConfig, VectorBasis};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Rotate a point cloud so that three reference points lie on the XZ-plane.
#[derive(Debug, Parser)]
#[command(author, version, about = "Three-point planar alignment of point clouds")]
struct Args {
    /// Table of the three reference points, one `x,y,z` per row.
    reference: PathBuf,

    /// Points to rotate: a delimited `x,y,z` table or a .las/.laz cloud.
    points: PathBuf,

    /// Output path, same format as the input points.
    output: PathBuf,

    /// Optional JSON AlignConfig. Defaults are used if omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON report of rotations, validation vectors and bounds.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Subtract p1 twice when deriving the reference vectors. Only the
    /// legacy double subtraction; rotations keep the corrected signs.
    #[arg(long)]
    legacy_basis: bool,

    /// Enable debug logging of intermediate vectors and angles.
    #[arg(short, long)]
    verbose: bool,
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    let value = serde_json::from_str(&data)?;
    Ok(value)
}

fn load_config(args: &Args) -> Result<AlignConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => load_json_file::<AlignConfig>(path)?,
        None => AlignConfig::default(),
    };
    if args.legacy_basis {
        config.basis = VectorBasis::DoubleSubtracted;
    }
    Ok(config)
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&args)?;
    let mut aligner = PointCloudAligner::new(&args.reference, &args.points, &args.output, config)?;
    if let Some(report_path) = &args.report {
        aligner = aligner.with_report(report_path);
    }
    aligner.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_and_flags() {
        let args = Args::parse_from([
            "point-cloud-aligner",
            "p.csv",
            "m.csv",
            "out.csv",
            "--legacy-basis",
            "--report",
            "report.json",
        ]);
        assert_eq!(args.reference, PathBuf::from("p.csv"));
        assert_eq!(args.output, PathBuf::from("out.csv"));
        assert_eq!(args.report, Some(PathBuf::from("report.json")));

        let config = load_config(&args).unwrap();
        assert_eq!(config.basis, VectorBasis::DoubleSubtracted);
    }

    #[test]
    fn config_file_is_merged_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "chunk_size": 512 }"#).unwrap();

        let args = Args::parse_from([
            "point-cloud-aligner",
            "p.csv",
            "m.csv",
            "out.csv",
            "--config",
            path.to_str().unwrap(),
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.basis, VectorBasis::PivotRelative);
    }
}
