use exif::{In, Reader, Tag};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::file_scanner::PhotoFile;
use crate::layout::{ImageCategory, SourceImage};

pub struct MetadataExtractor;

impl MetadataExtractor {
    /// EXIF orientation tag value (1-8), if the file carries one
    pub fn read_orientation(path: &Path) -> Option<u32> {
        let file = File::open(path).ok()?;
        let mut reader = BufReader::new(file);

        match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif
                .get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0)),
            Err(e) => {
                debug!("Failed to read EXIF data for {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Orientations 5 through 8 rotate the picture by 90 degrees
    pub fn swaps_dimensions(orientation: Option<u32>) -> bool {
        matches!(orientation, Some(5..=8))
    }

    /// Displayed dimensions of the image, after EXIF orientation
    pub fn display_dimensions(path: &Path) -> image::ImageResult<(u32, u32)> {
        let (width, height) = image::image_dimensions(path)?;

        if Self::swaps_dimensions(Self::read_orientation(path)) {
            Ok((height, width))
        } else {
            Ok((width, height))
        }
    }

    /// Read one file into a layout source, skipping squares and unreadable files
    pub fn extract(path: &Path) -> Option<SourceImage> {
        let (width, height) = match Self::display_dimensions(path) {
            Ok(dimensions) => dimensions,
            Err(e) => {
                warn!("Could not process file {}: {}", path.display(), e);
                return None;
            }
        };

        if width == 0 || height == 0 {
            warn!("Skipping empty image {}", path.display());
            return None;
        }

        let source = SourceImage::new(path, width, height);
        if source.is_square() {
            debug!("Skipping square image {}", path.display());
            return None;
        }

        Some(source)
    }
}

/// Read dimensions for all scanned files in parallel, keeping scan order
pub fn analyze_images(files: &[PhotoFile]) -> Vec<SourceImage> {
    let images: Vec<SourceImage> = files
        .par_iter()
        .filter_map(|file| MetadataExtractor::extract(&file.path))
        .collect();

    let (wide, tall) = split_by_orientation(&images);
    info!(
        "Analyzed {} files: {} wide, {} tall",
        files.len(),
        wide.len(),
        tall.len()
    );

    images
}

pub fn split_by_orientation(images: &[SourceImage]) -> (Vec<&SourceImage>, Vec<&SourceImage>) {
    images
        .iter()
        .partition(|image| image.category() == ImageCategory::Wide)
}
