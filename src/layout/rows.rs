use super::SizedImage;

/// One horizontal strip of the grid, in packing order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row<'a> {
    images: Vec<SizedImage<'a>>,
}

impl<'a> Row<'a> {
    pub fn images(&self) -> &[SizedImage<'a>] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Sum of image widths, without spacing
    pub fn image_width(&self) -> f64 {
        self.images.iter().map(|image| image.width).sum()
    }

    /// Width of the row with `spacing` between neighbours
    pub fn packed_width(&self, spacing: f64) -> f64 {
        let gaps = self.len().saturating_sub(1) as f64;
        self.image_width() + gaps * spacing
    }

    /// Tallest image in the row
    pub fn height(&self) -> f64 {
        self.images
            .iter()
            .map(|image| image.height)
            .fold(0.0, f64::max)
    }

    pub fn photo_area(&self) -> f64 {
        self.images.iter().map(SizedImage::area).sum()
    }
}

impl<'a> From<Vec<SizedImage<'a>>> for Row<'a> {
    fn from(images: Vec<SizedImage<'a>>) -> Self {
        Self { images }
    }
}

/// Greedily pack images into rows no wider than `output_width`.
///
/// Order is preserved and there is no backtracking. The first image of a row
/// is always accepted, so an image wider than the canvas sits alone in its row.
pub fn build_rows<'a, I>(images: I, output_width: f64, min_spacing: f64) -> Vec<Row<'a>>
where
    I: IntoIterator<Item = SizedImage<'a>>,
{
    let mut rows = Vec::new();
    let mut current = Row::default();
    let mut current_width = 0.0;

    for image in images {
        if !current.is_empty() {
            // Adding an image introduces one gap per image already in the row
            let candidate_width =
                current_width + current.len() as f64 * min_spacing + image.width;
            if candidate_width > output_width {
                rows.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
        }

        current_width += image.width;
        current.images.push(image);
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}

/// Uniform gap used between neighbours once the row's slack is spread out
pub fn justified_spacing(row: &Row, output_width: f64, min_spacing: f64, max_spacing: f64) -> f64 {
    let gaps = row.len().saturating_sub(1);
    if gaps == 0 {
        return 0.0;
    }

    let gaps = gaps as f64;
    let leftover = output_width - row.image_width() - gaps * min_spacing;
    let extra_per_gap = if leftover > 0.0 { leftover / gaps } else { 0.0 };

    (min_spacing + extra_per_gap).min(max_spacing)
}

/// X offsets of each image in the row, starting at 0
pub fn justify_row(row: &Row, output_width: f64, min_spacing: f64, max_spacing: f64) -> Vec<f64> {
    let spacing = justified_spacing(row, output_width, min_spacing, max_spacing);

    let mut x = 0.0;
    row.images
        .iter()
        .map(|image| {
            let offset = x;
            x += image.width + spacing;
            offset
        })
        .collect()
}
