use log::debug;

use super::{
    build_rows, score_rows, validate_images, CanvasConfig, LayoutError, LayoutResult, Row,
    Score, Sizer, SourceImage,
};

/// Number of scale values tried per layout
pub const SCALE_SAMPLES: usize = 50;

// Samples cover 50% to 300% of the estimated scale
const MIN_SCALE_FACTOR: f64 = 0.5;
const SCALE_FACTOR_SPAN: f64 = 2.5;

/// One scale value's rows and score
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub scale: f64,
    pub rows: Vec<Row<'a>>,
    pub score: Score,
}

/// Starting scale from an estimated column count.
///
/// Assumes a roughly uniform grid of images at the mean aspect ratio that
/// spans the canvas width.
pub fn estimate_target_scale(images: &[SourceImage], canvas: &CanvasConfig) -> f64 {
    if images.is_empty() {
        return 1.0;
    }

    let count = images.len() as f64;
    let mean_aspect = images.iter().map(|image| image.aspect_ratio).sum::<f64>() / count;

    let estimated_columns = (count * canvas.aspect_ratio() / mean_aspect)
        .sqrt()
        .round()
        .max(1.0);
    let target_width =
        (canvas.width() - (estimated_columns - 1.0) * canvas.min_gap()) / estimated_columns;
    let target_height = target_width / mean_aspect;

    (target_width * target_height).sqrt().max(1.0)
}

/// The fixed set of scales swept around `target_scale`
pub fn sample_scales(target_scale: f64) -> impl Iterator<Item = f64> {
    let last = (SCALE_SAMPLES - 1) as f64;
    (0..SCALE_SAMPLES)
        .map(move |i| target_scale * (MIN_SCALE_FACTOR + (i as f64 / last) * SCALE_FACTOR_SPAN))
}

/// Size, pack and score the images at a single scale
pub fn evaluate<'a>(
    scale: f64,
    images: &'a [SourceImage],
    sizer: &Sizer,
    canvas: &CanvasConfig,
) -> Candidate<'a> {
    let sized = sizer.size_images(scale, images);
    let rows = build_rows(sized, canvas.width(), canvas.min_gap());
    let score = score_rows(&rows, canvas);

    Candidate { scale, rows, score }
}

/// Sweep the sample scales and keep the best candidate.
///
/// Ties keep the earlier sample. Overflowing candidates are only chosen when no
/// sample fits the canvas.
pub fn search<'a>(
    images: &'a [SourceImage],
    sizer: &Sizer,
    canvas: &CanvasConfig,
) -> LayoutResult<Candidate<'a>> {
    validate_images(images)?;

    let target_scale = estimate_target_scale(images, canvas);
    debug!(
        "Searching {} scales around target scale {:.2}",
        SCALE_SAMPLES, target_scale
    );

    sample_scales(target_scale)
        .filter(|scale| scale.is_finite() && *scale > 0.0)
        .map(|scale| {
            let candidate = evaluate(scale, images, sizer, canvas);
            debug!(
                "scale {:.2}: {} rows, {:.0}x{:.0}, coverage {:.3}, score {:.4}{}",
                scale,
                candidate.rows.len(),
                candidate.score.layout_width,
                candidate.score.layout_height,
                candidate.score.coverage,
                candidate.score.value,
                if candidate.score.fits_canvas { "" } else { " (overflow)" }
            );
            candidate
        })
        .fold(None, |best: Option<Candidate<'a>>, candidate| match best {
            Some(best) if !candidate.score.is_better_than(&best.score) => Some(best),
            _ => Some(candidate),
        })
        .ok_or(LayoutError::NoViableScale)
}
