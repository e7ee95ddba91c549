use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use log::{error, info};
use std::fs;
use std::path::Path;

use crate::layout::{Layout, PositionedImage, SizingMode};
use crate::metadata_extractor::MetadataExtractor;

/// Canvas color behind and between photos
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, thiserror::Error)]
pub enum CollageError {
    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Layout serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type CollageResult<T> = Result<T, CollageError>;

fn apply_orientation(img: DynamicImage, orientation: Option<u32>) -> DynamicImage {
    match orientation {
        Some(2) => img.fliph(),
        Some(3) => img.rotate180(),
        Some(4) => img.flipv(),
        Some(5) => img.fliph().rotate270(), // Transpose
        Some(6) => img.rotate90(),
        Some(7) => img.fliph().rotate90(), // Transverse
        Some(8) => img.rotate270(),
        _ => img,
    }
}

/// Cut the largest centered region with the given aspect ratio
pub fn crop_to_aspect_ratio(img: DynamicImage, aspect: f64) -> DynamicImage {
    let (width, height) = img.dimensions();
    let current = width as f64 / height as f64;

    if current > aspect {
        let new_width = ((height as f64 * aspect).round() as u32).clamp(1, width);
        img.crop_imm((width - new_width) / 2, 0, new_width, height)
    } else if current < aspect {
        let new_height = ((width as f64 / aspect).round() as u32).clamp(1, height);
        img.crop_imm(0, (height - new_height) / 2, width, new_height)
    } else {
        img
    }
}

fn load_photo(path: &Path, crop_aspect: Option<f64>) -> CollageResult<DynamicImage> {
    let img = image::open(path)?;
    let img = apply_orientation(img, MetadataExtractor::read_orientation(path));

    Ok(match crop_aspect {
        Some(aspect) => crop_to_aspect_ratio(img, aspect),
        None => img,
    })
}

/// Pixel rectangle for a placement. Edges are rounded independently so
/// neighbours that do not overlap in layout space never overlap in pixels.
fn pixel_rect(placement: &PositionedImage) -> (i64, i64, u32, u32) {
    let left = placement.x.round();
    let top = placement.y.round();
    let width = (placement.right().round() - left).max(1.0);
    let height = (placement.bottom().round() - top).max(1.0);

    (left as i64, top as i64, width as u32, height as u32)
}

/// Paint every placed photo onto a white canvas.
///
/// Photos that fail to load are logged and left out.
pub fn render_collage(layout: &Layout, sizing: SizingMode) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(layout.canvas_width, layout.canvas_height, BACKGROUND);
    let crop_aspect = sizing
        .is_crop()
        .then(|| layout.canvas_width as f64 / layout.canvas_height as f64);

    for placement in &layout.images {
        let img = match load_photo(&placement.path, crop_aspect) {
            Ok(img) => img,
            Err(e) => {
                error!("Failed to load image {}: {}", placement.path.display(), e);
                continue;
            }
        };

        let (x, y, width, height) = pixel_rect(placement);
        let resized = img.resize_exact(width, height, FilterType::Lanczos3);

        imageops::overlay(&mut canvas, &resized.to_rgb8(), x, y);
    }

    canvas
}

fn ensure_parent_dir(path: &Path) -> CollageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Save the collage; the format follows the file extension
pub fn save_collage(collage: &RgbImage, path: &Path) -> CollageResult<()> {
    ensure_parent_dir(path)?;
    collage.save(path)?;

    info!("Saved collage to {}", path.display());
    Ok(())
}

pub fn write_layout_json(layout: &Layout, path: &Path) -> CollageResult<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(layout)?;
    fs::write(path, json)?;

    info!("Wrote layout to {}", path.display());
    Ok(())
}
