use super::{justify_row, CanvasConfig, Candidate, Layout, PositionedImage};

/// Turn the winning candidate into absolute placements.
///
/// Rows are justified horizontally and stacked with the minimum spacing;
/// vertical gaps are never stretched.
pub fn assemble(candidate: &Candidate, canvas: &CanvasConfig) -> Layout {
    let mut images = Vec::with_capacity(candidate.rows.iter().map(|row| row.len()).sum());
    let mut y = 0.0;

    for row in &candidate.rows {
        let offsets = justify_row(row, canvas.width(), canvas.min_gap(), canvas.max_gap());

        images.extend(row.images().iter().zip(offsets).map(|(image, x)| {
            PositionedImage {
                path: image.path.to_path_buf(),
                x,
                y,
                width: image.width,
                height: image.height,
            }
        }));

        y += row.height() + canvas.min_gap();
    }

    let photo_area: f64 = images.iter().map(|image| image.width * image.height).sum();

    Layout {
        canvas_width: canvas.output_width,
        canvas_height: canvas.output_height,
        scale: candidate.scale,
        coverage: photo_area / canvas.area(),
        fits_canvas: candidate.score.fits_canvas,
        images,
    }
}
