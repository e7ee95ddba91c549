use super::{CanvasConfig, Row};

/// Evaluation of one candidate row grouping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub layout_width: f64,
    pub layout_height: f64,
    pub photo_area: f64,
    pub coverage: f64,
    pub balance_penalty: f64,
    /// Coverage minus balance penalty when the layout fits; negative overflow otherwise
    pub value: f64,
    pub fits_canvas: bool,
}

impl Score {
    /// Any candidate that fits outranks every candidate that overflows
    pub fn is_better_than(&self, other: &Score) -> bool {
        match (self.fits_canvas, other.fits_canvas) {
            (true, false) => true,
            (false, true) => false,
            _ => self.value > other.value,
        }
    }
}

/// Score rows packed with the minimum spacing, before justification
pub fn score_rows(rows: &[Row], canvas: &CanvasConfig) -> Score {
    let spacing = canvas.min_gap();

    let layout_width = rows
        .iter()
        .map(|row| row.packed_width(spacing))
        .fold(0.0, f64::max);
    let row_gaps = rows.len().saturating_sub(1) as f64;
    let layout_height = rows.iter().map(Row::height).sum::<f64>() + row_gaps * spacing;
    let photo_area: f64 = rows.iter().map(Row::photo_area).sum();

    let coverage = photo_area / canvas.area();
    let canvas_aspect = canvas.aspect_ratio();
    let layout_aspect = if layout_height > 0.0 {
        layout_width / layout_height
    } else {
        0.0
    };
    let balance_penalty = (canvas_aspect - layout_aspect).abs() / canvas_aspect;

    let fits_canvas = layout_width <= canvas.width() && layout_height <= canvas.height();
    let value = if fits_canvas {
        coverage - balance_penalty
    } else {
        let width_overflow = (layout_width / canvas.width() - 1.0).max(0.0);
        let height_overflow = (layout_height / canvas.height() - 1.0).max(0.0);
        -(width_overflow + height_overflow)
    };

    Score {
        layout_width,
        layout_height,
        photo_area,
        coverage,
        balance_penalty,
        value,
        fits_canvas,
    }
}
