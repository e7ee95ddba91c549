use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};

use photogrid::cli::Args;
use photogrid::collage_generator::{render_collage, save_collage, write_layout_json};
use photogrid::config::Config;
use photogrid::file_scanner::FileScanner;
use photogrid::layout::{generate_layout, Layout};
use photogrid::metadata_extractor::analyze_images;
use photogrid::shuffle::shuffle_images;

/// Layouts covering less of the canvas than this are reported as sparse
const LOW_COVERAGE: f64 = 0.5;

/// Overflowing layouts are reported by `generate_layout` itself
fn is_sparse(layout: &Layout) -> bool {
    layout.fits_canvas && layout.coverage < LOW_COVERAGE
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::init();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    args.apply(&mut config).context("Invalid command line arguments")?;

    info!("Photo path: {}", config.photo_path);
    info!(
        "Canvas: {}x{}, spacing {}-{}px, {:?}",
        config.canvas.output_width,
        config.canvas.output_height,
        config.canvas.min_spacing,
        config.canvas.max_spacing,
        config.canvas.sizing
    );

    let files = FileScanner::new(vec![PathBuf::from(&config.photo_path)]).scan();
    let mut images = analyze_images(&files);
    if images.is_empty() {
        bail!(
            "No compatible (horizontal/vertical) JPEG images found in {}",
            config.photo_path
        );
    }

    shuffle_images(&mut images, config.seed);

    let layout = generate_layout(&images, &config.canvas).context("Failed to compute layout")?;

    if is_sparse(&layout) {
        warn!(
            "The layout only covers {:.1}% of the canvas",
            layout.coverage_percent()
        );
    }

    let collage = render_collage(&layout, config.canvas.sizing);
    save_collage(&collage, Path::new(&config.output_path))
        .with_context(|| format!("Could not save the image to {}", config.output_path))?;

    if let Some(json_path) = &config.layout_json_path {
        write_layout_json(&layout, Path::new(json_path))
            .with_context(|| format!("Could not write the layout to {}", json_path))?;
    }

    println!(
        "Saved {} photos to {} ({:.1}% area coverage)",
        layout.images.len(),
        config.output_path,
        layout.coverage_percent()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(coverage: f64, fits_canvas: bool) -> Layout {
        Layout {
            canvas_width: 1920,
            canvas_height: 1080,
            scale: 100.0,
            coverage,
            fits_canvas,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_is_sparse() {
        assert!(is_sparse(&layout(0.3, true)));
        assert!(!is_sparse(&layout(0.7, true)));
        // The overflow warning comes from the layout engine alone
        assert!(!is_sparse(&layout(0.3, false)));
        assert!(!is_sparse(&layout(1.4, false)));
    }
}
