use image::{Rgba, RgbaImage};

use mypostcard_core::export::{RasterizeOptions, Rasterizer};
use mypostcard_core::filter::FilterKind;
use mypostcard_core::fonts::FontLibrary;
use mypostcard_core::geometry::{CanvasGeometry, Orientation};
use mypostcard_core::raster::SoftwareRasterizer;
use mypostcard_core::scene::{Color, CropWindow, Node, Rect, Scene};
use mypostcard_core::state::SourceImage;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fontless() -> SoftwareRasterizer {
    SoftwareRasterizer::new(FontLibrary::empty())
}

fn landscape_scene() -> Scene {
    Scene::new(&CanvasGeometry::for_orientation(Orientation::Landscape))
}

fn preview() -> RasterizeOptions {
    RasterizeOptions::preview()
}

// ---------------------------------------------------------------------------
// Background and scale
// ---------------------------------------------------------------------------

#[test]
fn test_empty_scene_is_opaque_white() {
    let img = fontless().capture(&landscape_scene(), &preview()).unwrap();
    assert_eq!((img.width(), img.height()), (600, 400));
    assert_eq!(img.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    assert_eq!(img.get_pixel(599, 399), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_output_scale_multiplies_dimensions() {
    let img = fontless()
        .capture(&landscape_scene(), &RasterizeOptions::default())
        .unwrap();
    assert_eq!((img.width(), img.height()), (2400, 1600));
}

#[test]
fn test_transparent_scene_keeps_transparent_backdrop() {
    let mut scene = landscape_scene();
    scene.background = Color::TRANSPARENT;
    let img = fontless().capture(&scene, &preview()).unwrap();
    assert_eq!(img.get_pixel(10, 10)[3], 0);
}

#[test]
fn test_background_option_fills_backdrop() {
    let mut scene = landscape_scene();
    scene.background = Color::TRANSPARENT;
    let options = RasterizeOptions {
        background: Some(Color::BLACK),
        ..preview()
    };
    let img = fontless().capture(&scene, &options).unwrap();
    assert_eq!(img.get_pixel(10, 10), &Rgba([0, 0, 0, 255]));
}

// ---------------------------------------------------------------------------
// Fill nodes
// ---------------------------------------------------------------------------

#[test]
fn test_fill_node_paints_rect() {
    let mut scene = landscape_scene();
    scene.nodes.push(Node::Fill {
        rect: Rect::new(10.0, 20.0, 50.0, 30.0),
        color: Color::rgb(0xdc, 0x26, 0x26),
    });
    let img = fontless().capture(&scene, &preview()).unwrap();
    assert_eq!(img.get_pixel(30, 30), &Rgba([0xdc, 0x26, 0x26, 255]));
    // Outside the rect stays white.
    assert_eq!(img.get_pixel(5, 5), &Rgba([255, 255, 255, 255]));
    assert_eq!(img.get_pixel(70, 30), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_fill_scales_with_output_scale() {
    let mut scene = landscape_scene();
    scene.nodes.push(Node::Fill {
        rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        color: Color::BLACK,
    });
    let options = RasterizeOptions {
        output_scale: 4,
        background: None,
    };
    let img = fontless().capture(&scene, &options).unwrap();
    assert_eq!(img.get_pixel(39, 39), &Rgba([0, 0, 0, 255]));
    assert_eq!(img.get_pixel(41, 41), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_translucent_fill_blends() {
    let mut scene = landscape_scene();
    scene.nodes.push(Node::Fill {
        rect: Rect::new(0.0, 0.0, 600.0, 400.0),
        color: Color::rgba(0, 0, 0, 128),
    });
    let img = fontless().capture(&scene, &preview()).unwrap();
    let px = img.get_pixel(100, 100);
    // Half-black over white is mid-gray, opaque.
    assert!(px[0] > 100 && px[0] < 150, "got {:?}", px);
    assert_eq!(px[3], 255);
}

// ---------------------------------------------------------------------------
// Photo nodes
// ---------------------------------------------------------------------------

#[test]
fn test_photo_fills_target_rect() {
    let source = SourceImage::from_rgba(RgbaImage::from_pixel(600, 400, Rgba([0, 0, 200, 255])));
    let mut scene = landscape_scene();
    scene.nodes.push(Node::Photo {
        rect: Rect::new(0.0, 0.0, 600.0, 400.0),
        source,
        window: CropWindow {
            x: 0.0,
            y: 0.0,
            w: 600.0,
            h: 400.0,
        },
        filter: FilterKind::None.settings(100),
    });
    let img = fontless().capture(&scene, &preview()).unwrap();
    assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 200, 255]));
    assert_eq!(img.get_pixel(599, 399), &Rgba([0, 0, 200, 255]));
}

#[test]
fn test_photo_crop_window_selects_region() {
    // Left half red, right half green; crop to the right half only.
    let mut rgba = RgbaImage::from_pixel(200, 100, Rgba([255, 0, 0, 255]));
    for y in 0..100 {
        for x in 100..200 {
            rgba.put_pixel(x, y, Rgba([0, 255, 0, 255]));
        }
    }
    let mut scene = landscape_scene();
    scene.nodes.push(Node::Photo {
        rect: Rect::new(0.0, 0.0, 600.0, 400.0),
        source: SourceImage::from_rgba(rgba),
        window: CropWindow {
            x: 100.0,
            y: 0.0,
            w: 100.0,
            h: 100.0,
        },
        filter: FilterKind::None.settings(100),
    });
    let img = fontless().capture(&scene, &preview()).unwrap();
    let px = img.get_pixel(300, 200);
    assert!(px[1] > 200 && px[0] < 50, "expected green, got {:?}", px);
}

#[test]
fn test_photo_filter_is_applied() {
    let source = SourceImage::from_rgba(RgbaImage::from_pixel(100, 100, Rgba([200, 40, 40, 255])));
    let mut scene = landscape_scene();
    scene.nodes.push(Node::Photo {
        rect: Rect::new(0.0, 0.0, 600.0, 400.0),
        source,
        window: CropWindow {
            x: 0.0,
            y: 0.0,
            w: 100.0,
            h: 100.0,
        },
        filter: FilterKind::Mono.settings(100),
    });
    let img = fontless().capture(&scene, &preview()).unwrap();
    let px = img.get_pixel(300, 200);
    assert_eq!(px[0], px[1]);
    assert_eq!(px[1], px[2]);
}

// ---------------------------------------------------------------------------
// Text nodes without fonts
// ---------------------------------------------------------------------------

#[test]
fn test_text_without_faces_is_skipped() {
    use mypostcard_core::scene::TextNode;
    let mut scene = landscape_scene();
    scene.nodes.push(Node::Text(TextNode {
        text: "hello".to_owned(),
        rect: Rect::new(0.0, 0.0, 600.0, 400.0),
        ..TextNode::default()
    }));
    // Must not fail, and must leave the canvas untouched.
    let img = fontless().capture(&scene, &preview()).unwrap();
    assert_eq!(img.get_pixel(50, 50), &Rgba([255, 255, 255, 255]));
}

// ---------------------------------------------------------------------------
// End-to-end export capture
// ---------------------------------------------------------------------------

#[test]
fn test_portrait_export_capture() {
    use mypostcard_core::state::{PostcardState, SourceImage};
    use mypostcard_core::template;

    let mut state = PostcardState::default();
    state.set_orientation(Orientation::Portrait);
    state.install_image(SourceImage::from_rgba(RgbaImage::from_pixel(
        800,
        800,
        Rgba([180, 60, 60, 255]),
    )));
    state.set_filter_kind(FilterKind::Mono);
    state.set_filter_intensity(50);

    let scene = template::compose(&state);
    let img = fontless()
        .capture(&scene, &RasterizeOptions::default())
        .unwrap();
    assert_eq!((img.width(), img.height()), (1600, 2400));
    // Half-strength mono pulls the channels together without equalizing.
    let px = img.get_pixel(800, 1200);
    assert!(px[0] > px[1]);
    assert!(i32::from(px[0]) - i32::from(px[1]) < 120);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn test_capture_is_deterministic() {
    let source = SourceImage::from_rgba(RgbaImage::from_pixel(320, 240, Rgba([80, 120, 160, 255])));
    let mut scene = landscape_scene();
    scene.nodes.push(Node::Photo {
        rect: Rect::new(0.0, 0.0, 600.0, 400.0),
        source,
        window: CropWindow {
            x: 20.0,
            y: 10.0,
            w: 300.0,
            h: 200.0,
        },
        filter: FilterKind::Warm.settings(70),
    });
    scene.nodes.push(Node::Fill {
        rect: Rect::new(30.0, 30.0, 40.0, 40.0),
        color: Color::rgba(20, 30, 40, 200),
    });

    let rasterizer = fontless();
    let a = rasterizer.capture(&scene, &preview()).unwrap();
    let b = rasterizer.capture(&scene, &preview()).unwrap();
    assert_eq!(a, b);
}
