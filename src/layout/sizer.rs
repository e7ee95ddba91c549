use super::{CanvasConfig, ImageCategory, SizedImage, SizingMode, SourceImage};

/// Stand-in mean aspect ratio when no wide photo is present
pub const DEFAULT_WIDE_ASPECT: f64 = 16.0 / 9.0;
/// Stand-in mean aspect ratio when no tall photo is present
pub const DEFAULT_TALL_ASPECT: f64 = 9.0 / 16.0;

/// Maps a scale value to target render dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizer {
    UniformCrop { target_aspect: f64 },
    AspectPreserving { wide_aspect: f64, tall_aspect: f64 },
}

impl Sizer {
    pub fn new(mode: SizingMode, images: &[SourceImage], canvas: &CanvasConfig) -> Self {
        match mode {
            SizingMode::UniformCrop => Self::uniform_crop(canvas.aspect_ratio()),
            SizingMode::AspectPreserving => Self::aspect_preserving(images),
        }
    }

    pub fn uniform_crop(target_aspect: f64) -> Self {
        Sizer::UniformCrop { target_aspect }
    }

    /// Collect the mean aspect ratio of each category
    pub fn aspect_preserving(images: &[SourceImage]) -> Self {
        let wide_aspect = mean_aspect(images, ImageCategory::Wide).unwrap_or(DEFAULT_WIDE_ASPECT);
        let tall_aspect = mean_aspect(images, ImageCategory::Tall).unwrap_or(DEFAULT_TALL_ASPECT);

        Sizer::AspectPreserving {
            wide_aspect,
            tall_aspect,
        }
    }

    /// Target (width, height) for one category at `scale`
    pub fn category_dimensions(&self, scale: f64, category: ImageCategory) -> (f64, f64) {
        match *self {
            Sizer::UniformCrop { target_aspect } => (scale * target_aspect, scale),
            Sizer::AspectPreserving {
                wide_aspect,
                tall_aspect,
            } => match category {
                ImageCategory::Wide => equal_area_dimensions(scale, wide_aspect),
                ImageCategory::Tall => equal_area_dimensions(scale, tall_aspect),
            },
        }
    }

    pub fn size_images<'a>(&self, scale: f64, images: &'a [SourceImage]) -> Vec<SizedImage<'a>> {
        let wide = self.category_dimensions(scale, ImageCategory::Wide);
        let tall = self.category_dimensions(scale, ImageCategory::Tall);

        images
            .iter()
            .map(|image| {
                let (width, height) = match image.category() {
                    ImageCategory::Wide => wide,
                    ImageCategory::Tall => tall,
                };
                SizedImage {
                    path: &image.path,
                    width,
                    height,
                }
            })
            .collect()
    }
}

/// Solve `width / height = aspect` and `width * height = scale²`
pub fn equal_area_dimensions(scale: f64, aspect: f64) -> (f64, f64) {
    let root = aspect.sqrt();
    (scale * root, scale / root)
}

fn mean_aspect(images: &[SourceImage], category: ImageCategory) -> Option<f64> {
    let (sum, count) = images
        .iter()
        .filter(|image| image.category() == category)
        .fold((0.0, 0usize), |(sum, count), image| {
            (sum + image.aspect_ratio, count + 1)
        });

    (count > 0).then(|| sum / count as f64)
}
