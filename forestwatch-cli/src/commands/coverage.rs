//! Coverage command - vegetation share of an image.

use std::path::PathBuf;

use clap::Args;
use console::style;

use forestwatch::config::ConfigFile;
use forestwatch::coverage::{analyze, overlay, CoverageReport, KMeansSegmenter};
use forestwatch::mosaic::save_image;
use forestwatch::pipeline::derived_path;

use crate::error::CliError;

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Image to analyse, usually a mosaic
    pub image: PathBuf,

    /// Write the binary vegetation mask here
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Write the highlighted overlay image here
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Write mask and overlay next to the image (<name>_mask.png, <name>_overlay.png)
    #[arg(long)]
    pub save_images: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the coverage command.
pub fn run(args: CoverageArgs, config: &ConfigFile) -> Result<(), CliError> {
    let report = analyze_file(&args, config)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(CliError::Report)?;
        println!("{}", json);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn analyze_file(args: &CoverageArgs, config: &ConfigFile) -> Result<CoverageReport, CliError> {
    let image = image::open(&args.image)
        .map_err(|error| CliError::ImageRead {
            path: args.image.clone(),
            error,
        })?
        .to_rgb8();

    let segmenter = KMeansSegmenter::new(
        config.coverage.max_iterations,
        config.coverage.kernel_size,
    )?;
    let analysis = analyze(&segmenter, &image)?;
    let mut report = analysis.report;

    let mask_path = args
        .mask
        .clone()
        .or_else(|| args.save_images.then(|| derived_path(&args.image, "mask")));
    let overlay_path = args
        .overlay
        .clone()
        .or_else(|| args.save_images.then(|| derived_path(&args.image, "overlay")));

    if let Some(path) = mask_path {
        save_image(&analysis.mask, &path)?;
        report.mask_path = Some(path);
    }
    if let Some(path) = overlay_path {
        let highlighted = overlay(&image, &analysis.mask, config.coverage.overlay_alpha)?;
        save_image(&highlighted, &path)?;
        report.overlay_path = Some(path);
    }

    Ok(report)
}

fn print_summary(report: &CoverageReport) {
    println!("{}", style("Coverage analysis").green().bold());
    println!("  Image size:      {}x{} px", report.width, report.height);
    println!("  Forest coverage: {:.2}%", report.forest_coverage);
    println!("  Deforested area: {:.2}%", report.deforested_area);
    if let Some(path) = &report.mask_path {
        println!("  Mask:            {}", path.display());
    }
    if let Some(path) = &report.overlay_path {
        println!("  Overlay:         {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_half_forest(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("area_1.png");
        RgbImage::from_fn(20, 10, |x, _| {
            if x < 10 {
                Rgb([30, 140, 40])
            } else {
                Rgb([150, 120, 90])
            }
        })
        .save(&path)
        .unwrap();
        path
    }

    #[test]
    fn test_save_images_writes_derived_files() {
        let temp_dir = TempDir::new().unwrap();
        let image = write_half_forest(temp_dir.path());
        let args = CoverageArgs {
            image,
            mask: None,
            overlay: None,
            save_images: true,
            json: true,
        };

        let report = analyze_file(&args, &ConfigFile::default()).unwrap();

        assert!((report.forest_coverage - 50.0).abs() < 1e-9);
        let mask = temp_dir.path().join("area_1_mask.png");
        let overlay = temp_dir.path().join("area_1_overlay.png");
        assert_eq!(report.mask_path.as_deref(), Some(mask.as_path()));
        assert_eq!(report.overlay_path.as_deref(), Some(overlay.as_path()));
        assert!(mask.exists());
        assert!(overlay.exists());
    }

    #[test]
    fn test_without_outputs_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let image = write_half_forest(temp_dir.path());
        let args = CoverageArgs {
            image,
            mask: None,
            overlay: None,
            save_images: false,
            json: false,
        };

        let report = analyze_file(&args, &ConfigFile::default()).unwrap();

        assert!(report.mask_path.is_none());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_image_is_read_error() {
        let args = CoverageArgs {
            image: PathBuf::from("/nonexistent/area.png"),
            mask: None,
            overlay: None,
            save_images: false,
            json: false,
        };
        assert!(matches!(
            analyze_file(&args, &ConfigFile::default()),
            Err(CliError::ImageRead { .. })
        ));
    }
}
