use image::{ImageBuffer, Rgb};
use photogrid::collage_generator::{render_collage, save_collage};
use photogrid::file_scanner::FileScanner;
use photogrid::layout::*;
use photogrid::metadata_extractor::analyze_images;
use photogrid::shuffle::shuffle_images;
use tempfile::TempDir;

const EPSILON: f64 = 1e-6;

/// A gallery mixing landscape, portrait and panorama shots
fn gallery(count: usize) -> Vec<SourceImage> {
    let shapes = [
        (4000, 3000),
        (3000, 4000),
        (1920, 1080),
        (1080, 1920),
        (6000, 2000),
        (2400, 3600),
        (3600, 2400),
    ];
    (0..count)
        .map(|i| {
            let (width, height) = shapes[(i * 5 + i / 3) % shapes.len()];
            SourceImage::new(format!("photo_{:03}.jpg", i), width, height)
        })
        .collect()
}

fn canvas(width: u32, height: u32, min: u32, max: u32, sizing: SizingMode) -> CanvasConfig {
    CanvasConfig {
        output_width: width,
        output_height: height,
        min_spacing: min,
        max_spacing: max,
        sizing,
    }
}

fn test_canvases() -> Vec<CanvasConfig> {
    vec![
        CanvasConfig::default(),
        canvas(1080, 1920, 4, 40, SizingMode::AspectPreserving),
        canvas(3840, 2160, 0, 0, SizingMode::AspectPreserving),
        canvas(1920, 1080, 10, 50, SizingMode::UniformCrop),
        canvas(800, 800, 20, 20, SizingMode::UniformCrop),
    ]
}

#[test]
fn test_layouts_never_overlap() {
    for count in [1, 2, 7, 30, 120] {
        let images = gallery(count);
        for config in test_canvases() {
            let layout = generate_layout(&images, &config).unwrap();
            assert_eq!(layout.images.len(), count);

            for (i, a) in layout.images.iter().enumerate() {
                for b in &layout.images[i + 1..] {
                    assert!(
                        !a.overlaps(b),
                        "{:?} overlaps {:?} on {:?}",
                        a,
                        b,
                        config
                    );
                }
            }
        }
    }
}

#[test]
fn test_fitting_layouts_stay_on_canvas() {
    for count in [3, 25, 80] {
        let images = gallery(count);
        for config in test_canvases() {
            let layout = generate_layout(&images, &config).unwrap();
            if !layout.fits_canvas {
                continue;
            }

            assert!(layout.coverage >= 0.0 && layout.coverage <= 1.0);
            for placed in &layout.images {
                assert!(placed.x >= 0.0 && placed.y >= 0.0);
                assert!(placed.right() <= config.width() + EPSILON);
                assert!(placed.bottom() <= config.height() + EPSILON);
            }
        }
    }
}

#[test]
fn test_typical_gallery_fits() {
    let layout = generate_layout(&gallery(40), &CanvasConfig::default()).unwrap();

    assert!(layout.fits_canvas);
    assert!(layout.coverage > 0.2);
}

#[test]
fn test_layout_keeps_input_order() {
    let images = gallery(45);
    let layout = generate_layout(&images, &CanvasConfig::default()).unwrap();

    let placed: Vec<_> = layout.images.iter().map(|i| i.path.clone()).collect();
    let expected: Vec<_> = images.iter().map(|i| i.path.clone()).collect();
    assert_eq!(placed, expected);
}

#[test]
fn test_search_is_deterministic() {
    let images = gallery(60);
    let config = CanvasConfig::default();

    let first = generate_layout(&images, &config).unwrap();
    let second = generate_layout(&images, &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_seeded_shuffle_gives_reproducible_layout() {
    let config = CanvasConfig::default();

    let mut first_images = gallery(30);
    let mut second_images = gallery(30);
    shuffle_images(&mut first_images, Some(1234));
    shuffle_images(&mut second_images, Some(1234));

    assert_eq!(
        generate_layout(&first_images, &config).unwrap(),
        generate_layout(&second_images, &config).unwrap()
    );
}

#[test]
fn test_uniform_crop_sizes_every_photo_alike() {
    let config = canvas(1920, 1080, 10, 50, SizingMode::UniformCrop);
    let layout = generate_layout(&gallery(20), &config).unwrap();

    let first = &layout.images[0];
    assert!((first.width / first.height - 1920.0 / 1080.0).abs() < EPSILON);
    for placed in &layout.images {
        assert!((placed.width - first.width).abs() < EPSILON);
        assert!((placed.height - first.height).abs() < EPSILON);
    }
}

#[test]
fn test_aspect_preserving_gives_equal_areas() {
    let layout = generate_layout(&gallery(20), &CanvasConfig::default()).unwrap();
    let area = layout.scale * layout.scale;

    let mut shapes: Vec<(f64, f64)> = Vec::new();
    for placed in &layout.images {
        assert!((placed.width * placed.height - area).abs() < 1e-6 * area);
        if !shapes
            .iter()
            .any(|&(w, h)| (w - placed.width).abs() < EPSILON && (h - placed.height).abs() < EPSILON)
        {
            shapes.push((placed.width, placed.height));
        }
    }

    // One size for wide photos, one for tall ones
    assert_eq!(shapes.len(), 2);
}

#[test]
fn test_winning_scale_is_best_sample() {
    let images = gallery(35);
    let config = CanvasConfig::default();
    let sizer = Sizer::new(config.sizing, &images, &config);

    let best = search(&images, &sizer, &config).unwrap();
    let scores: Vec<Score> = sample_scales(estimate_target_scale(&images, &config))
        .map(|scale| evaluate(scale, &images, &sizer, &config).score)
        .collect();

    assert_eq!(scores.len(), SCALE_SAMPLES);
    assert!(scores.iter().all(|score| !score.is_better_than(&best.score)));
    assert!(scores.iter().any(|score| *score == best.score));
}

#[test]
fn test_overflowing_configuration_still_returns_layout() {
    let config = canvas(100, 100, 50, 50, SizingMode::AspectPreserving);
    let layout = generate_layout(&gallery(16), &config).unwrap();

    assert!(!layout.fits_canvas);
    assert_eq!(layout.images.len(), 16);
}

#[test]
fn test_errors() {
    assert!(matches!(
        generate_layout(&[], &CanvasConfig::default()),
        Err(LayoutError::EmptyInput)
    ));
    assert!(matches!(
        generate_layout(
            &gallery(3),
            &canvas(1920, 1080, 30, 10, SizingMode::AspectPreserving)
        ),
        Err(LayoutError::Configuration(_))
    ));

    let mut images = gallery(5);
    images.push(SourceImage::new("broken.jpg", 400, 0));
    assert!(matches!(
        generate_layout(&images, &CanvasConfig::default()),
        Err(LayoutError::InvalidImage(path)) if path.to_str() == Some("broken.jpg")
    ));
}

#[test]
fn test_end_to_end_collage() {
    let temp_dir = TempDir::new().unwrap();
    let shapes = [(64, 48), (48, 64), (80, 45), (45, 80), (60, 40), (50, 50)];
    for (i, (width, height)) in shapes.iter().enumerate() {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(*width, *height, |x, _y| Rgb([(x * 3) as u8, 120, 200]));
        img.save(temp_dir.path().join(format!("img_{}.jpg", i)))
            .unwrap();
    }

    let files = FileScanner::new(vec![temp_dir.path().to_path_buf()]).scan();
    assert_eq!(files.len(), shapes.len());

    let mut images = analyze_images(&files);
    // The square shot is dropped
    assert_eq!(images.len(), shapes.len() - 1);
    shuffle_images(&mut images, Some(99));

    let config = canvas(320, 180, 4, 12, SizingMode::UniformCrop);
    let layout = generate_layout(&images, &config).unwrap();
    let collage = render_collage(&layout, config.sizing);

    let output = temp_dir.path().join("collage").join("grid.jpg");
    save_collage(&collage, &output).unwrap();
    assert_eq!(image::image_dimensions(&output).unwrap(), (320, 180));
}
