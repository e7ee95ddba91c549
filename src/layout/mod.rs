//! Justified photo grid layout engine
//!
//! Turns a list of photos into non-overlapping placements on a fixed canvas:
//! - Sizing every photo from a single scale value (per category or uniform)
//! - Greedy row packing bounded by the canvas width
//! - Scoring each candidate by coverage and silhouette aspect ratio
//! - Sweeping the scale and keeping the best candidate
//! - Justifying the winning rows into absolute positions

mod assembler;
mod rows;
mod scorer;
mod search;
mod sizer;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use assembler::assemble;
pub use rows::{build_rows, justified_spacing, justify_row, Row};
pub use scorer::{score_rows, Score};
pub use search::{estimate_target_scale, evaluate, sample_scales, search, Candidate, SCALE_SAMPLES};
pub use sizer::{equal_area_dimensions, Sizer, DEFAULT_TALL_ASPECT, DEFAULT_WIDE_ASPECT};

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("No images to lay out")]
    EmptyInput,
    #[error("Invalid image dimensions for {}", .0.display())]
    InvalidImage(PathBuf),
    #[error("No scale sample produced a layout candidate")]
    NoViableScale,
}

pub type LayoutResult<T> = Result<T, LayoutError>;

/// How target dimensions are derived from the scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingMode {
    /// Wide and tall photos keep their category's mean aspect ratio at equal area
    #[default]
    AspectPreserving,
    /// Every photo gets the canvas aspect ratio and is center-cropped when rendered
    UniformCrop,
}

impl SizingMode {
    pub fn from_crop_flag(crop: bool) -> Self {
        if crop {
            SizingMode::UniformCrop
        } else {
            SizingMode::AspectPreserving
        }
    }

    pub fn is_crop(self) -> bool {
        self == SizingMode::UniformCrop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasConfig {
    pub output_width: u32,
    pub output_height: u32,
    pub min_spacing: u32,
    pub max_spacing: u32,
    pub sizing: SizingMode,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            output_width: 1920,
            output_height: 1080,
            min_spacing: 10,
            max_spacing: 50,
            sizing: SizingMode::default(),
        }
    }
}

impl CanvasConfig {
    /// Reject configurations the search cannot run against
    pub fn validate(&self) -> LayoutResult<()> {
        if self.output_width == 0 {
            return Err(LayoutError::Configuration(
                "output width must be greater than zero".to_string(),
            ));
        }
        if self.output_height == 0 {
            return Err(LayoutError::Configuration(
                "output height must be greater than zero".to_string(),
            ));
        }
        if self.max_spacing < self.min_spacing {
            return Err(LayoutError::Configuration(format!(
                "max spacing ({}) must not be smaller than min spacing ({})",
                self.max_spacing, self.min_spacing
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.output_width as f64
    }

    pub fn height(&self) -> f64 {
        self.output_height as f64
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width() / self.height()
    }

    pub(crate) fn min_gap(&self) -> f64 {
        self.min_spacing as f64
    }

    pub(crate) fn max_gap(&self) -> f64 {
        self.max_spacing as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageCategory {
    Wide,
    Tall,
}

/// A photo as found on disk, with orientation-corrected dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
}

impl SourceImage {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            aspect_ratio: width as f64 / height as f64,
        }
    }

    /// Both sides non-zero and a finite, positive aspect ratio
    pub fn has_valid_dimensions(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.aspect_ratio.is_finite()
            && self.aspect_ratio > 0.0
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn category(&self) -> ImageCategory {
        if self.aspect_ratio > 1.0 {
            ImageCategory::Wide
        } else {
            ImageCategory::Tall
        }
    }
}

/// A photo paired with the render size chosen for one candidate scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizedImage<'a> {
    pub path: &'a Path,
    pub width: f64,
    pub height: f64,
}

impl SizedImage<'_> {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Final placement on the canvas, top-left origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedImage {
    pub path: PathBuf,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionedImage {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the two rectangles share interior area (touching edges do not count)
    pub fn overlaps(&self, other: &PositionedImage) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub scale: f64,
    /// Fraction of the canvas covered by photos
    pub coverage: f64,
    /// False when even the best candidate overflowed the canvas
    pub fits_canvas: bool,
    pub images: Vec<PositionedImage>,
}

impl Layout {
    pub fn coverage_percent(&self) -> f64 {
        self.coverage * 100.0
    }
}

/// Reject an empty list or any image the sizer cannot scale
pub fn validate_images(images: &[SourceImage]) -> LayoutResult<()> {
    if images.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    match images.iter().find(|image| !image.has_valid_dimensions()) {
        Some(image) => Err(LayoutError::InvalidImage(image.path.clone())),
        None => Ok(()),
    }
}

/// Compute the best justified layout for `images` on the configured canvas.
///
/// The images are packed in the order given; shuffle them beforehand for a
/// different arrangement.
pub fn generate_layout(images: &[SourceImage], canvas: &CanvasConfig) -> LayoutResult<Layout> {
    canvas.validate()?;
    validate_images(images)?;

    let sizer = Sizer::new(canvas.sizing, images, canvas);
    let best = search(images, &sizer, canvas)?;
    let layout = assemble(&best, canvas);

    info!(
        "Best layout found at scale {:.1} with {} rows and {:.1}% area coverage",
        layout.scale,
        best.rows.len(),
        layout.coverage_percent()
    );
    if !layout.fits_canvas {
        warn!(
            "No candidate fits the {}x{} canvas, using the least overflowing one; some photos will be cut off",
            canvas.output_width, canvas.output_height
        );
    }

    Ok(layout)
}
