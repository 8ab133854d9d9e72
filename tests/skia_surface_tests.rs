//! Raster tests for the tiny-skia surface.
//!
//! Tests that need real glyph outlines are skipped when no TrueType font is
//! installed on the test machine.

mod test_utils;

use canvas_textpath::*;
use test_utils::*;
use tiny_skia::Pixmap;

fn painted_pixels(pixmap: &Pixmap) -> usize {
    pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
}

#[test]
fn test_unloaded_family_is_an_error() {
    let mut pixmap = Pixmap::new(64, 64).unwrap();
    let mut surface = SkiaSurface::new(pixmap.as_mut());
    let result = render_text_on_path(
        &mut surface,
        &straight(50.0),
        "AB",
        &StyleOptions::new("12px Missing"),
    );
    assert_eq!(result, Err(TextPathError::FontNotLoaded("Missing".to_string())));
    assert_eq!(surface.state_depth(), 0);
}

#[test]
fn test_degenerate_path_leaves_pixmap_blank() {
    let mut pixmap = Pixmap::new(64, 64).unwrap();
    {
        let mut surface = SkiaSurface::new(pixmap.as_mut());
        // No font is needed when nothing is drawn.
        render_text_on_path(
            &mut surface,
            &[Point::new(5.0, 5.0), Point::new(5.0, 5.0)],
            "AB",
            &StyleOptions::new("12px Missing"),
        )
        .unwrap();
    }
    assert_eq!(painted_pixels(&pixmap), 0);
}

#[test]
fn test_stroke_path_draws_polyline() {
    let mut pixmap = Pixmap::new(64, 64).unwrap();
    {
        let mut surface = SkiaSurface::new(pixmap.as_mut());
        surface.set_stroke_style(Color::rgb(255, 0, 0));
        surface.set_line_width(4.0);
        surface.begin_path();
        surface.move_to(4.0, 32.0);
        surface.line_to(60.0, 32.0);
        surface.stroke_path(1.0).unwrap();
    }
    assert!(painted_pixels(&pixmap) > 0);
    let center = pixmap.pixel(32, 32).unwrap();
    assert_eq!(center.red(), 255);
}

#[test]
fn test_render_text_on_path() {
    init_logger();
    let Some(font) = load_system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };

    let mut pixmap = Pixmap::new(200, 120).unwrap();
    {
        let mut surface = SkiaSurface::new(pixmap.as_mut());
        surface.load_font("Test", font).unwrap();
        surface.set_fill_style(Color::rgb(0, 0, 0));
        surface.set_stroke_style(Color::rgb(255, 255, 255));
        surface.set_line_width(2.0);

        let points = vec![
            Point::new(10.0, 60.0),
            Point::new(100.0, 20.0),
            Point::new(190.0, 60.0),
        ];
        let style = StyleOptions::new("16px Test")
            .with_justify(true)
            .with_baseline(TextBaseline::Middle);
        render_text_on_path(&mut surface, &points, "Canal Street", &style).unwrap();
        assert_eq!(surface.state_depth(), 0);
    }
    assert!(painted_pixels(&pixmap) > 0);

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("text_path.png");
    pixmap.save_png(&output).unwrap();
    assert!(output.exists());
}

#[test]
fn test_measure_uses_loaded_font() {
    let Some(font) = load_system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };

    let mut pixmap = Pixmap::new(8, 8).unwrap();
    let mut surface = SkiaSurface::new(pixmap.as_mut());
    surface.load_font("Test", font).unwrap();

    let small = surface.measure_text("Hello", "10px Test").unwrap();
    let large = surface.measure_text("Hello", "20px Test").unwrap();

    assert!(small > 0.0);
    assert!((large - 2.0 * small).abs() < 1e-6);
}

#[test]
fn test_feature_paints_on_raster() {
    let Some(font) = load_system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };

    let feature = TextPathFeature::new(
        TextPathOptions {
            text_name: "Ring Road".to_string(),
            font_family: "Test".to_string(),
            ..TextPathOptions::default()
        },
        Some(TextPathSymbol {
            text_path_size: 24.0,
            line_color: Color::rgb(0, 128, 0),
        }),
    );

    let mut pixmap = Pixmap::new(200, 200).unwrap();
    {
        let mut surface = SkiaSurface::new(pixmap.as_mut());
        surface.load_font("Test", font).unwrap();
        let mut points = vec![
            Point::new(20.0, 100.0),
            Point::new(20.0, 100.0),
            Point::new(180.0, 100.0),
        ];
        let outcome = feature.paint_on(&mut surface, &mut points, 1.0, 1.0).unwrap();
        assert_eq!(outcome, PaintOutcome::Painted);
        assert_eq!(points.len(), 2);
        assert_eq!(surface.state_depth(), 0);
    }
    assert!(painted_pixels(&pixmap) > 0);
}
