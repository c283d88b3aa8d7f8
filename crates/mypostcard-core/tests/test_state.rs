use image::{Rgba, RgbaImage};

use mypostcard_core::export::encode_png;
use mypostcard_core::filter::FilterKind;
use mypostcard_core::geometry::Orientation;
use mypostcard_core::state::{
    FontStyle, PostcardState, Side, SourceImage, Template, ACCENT_PALETTE, DEFAULT_SUBTITLE,
    DEFAULT_TITLE,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn solid_source(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba(RgbaImage::from_pixel(w, h, Rgba([120, 130, 140, 255])))
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 255]))).unwrap()
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_state() {
    let state = PostcardState::default();
    assert_eq!(state.orientation(), Orientation::Landscape);
    assert_eq!(state.side(), Side::Front);
    assert_eq!(state.template(), Template::Exhibition);
    assert_eq!(state.font_style(), FontStyle::Sans);
    assert_eq!(state.accent_color(), ACCENT_PALETTE[0]);
    assert_eq!(state.title(), DEFAULT_TITLE);
    assert_eq!(state.subtitle(), DEFAULT_SUBTITLE);
    assert!(!state.message().is_empty());
    assert!(state.source_image().is_none());
    assert_eq!(state.zoom(), 1.0);
    assert_eq!(state.crop_offset(), (0.0, 0.0));
    assert_eq!(state.filter_kind(), FilterKind::None);
    assert_eq!(state.filter_intensity(), 100);
}

#[test]
fn test_default_canvas_is_landscape() {
    let state = PostcardState::default();
    let canvas = state.canvas();
    assert_eq!((canvas.width, canvas.height), (600, 400));
}

// ---------------------------------------------------------------------------
// Range invariants
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_clamps_to_range() {
    let mut state = PostcardState::default();
    state.set_zoom(0.2);
    assert_eq!(state.zoom(), 1.0);
    state.set_zoom(7.5);
    assert_eq!(state.zoom(), 3.0);
    state.set_zoom(1.8);
    assert_eq!(state.zoom(), 1.8);
}

#[test]
fn test_filter_intensity_clamps() {
    let mut state = PostcardState::default();
    state.set_filter_intensity(250);
    assert_eq!(state.filter_intensity(), 100);
    state.set_filter_intensity(33);
    assert_eq!(state.filter_intensity(), 33);
}

#[test]
fn test_crop_offset_noop_without_image() {
    let mut state = PostcardState::default();
    state.set_crop_offset((50.0, 50.0));
    assert_eq!(state.crop_offset(), (0.0, 0.0));
}

#[test]
fn test_crop_offset_clamps_to_cover_bounds() {
    let mut state = PostcardState::default();
    // 1200x400 on the landscape canvas: 300px of horizontal slack, none
    // vertically.
    state.install_image(solid_source(1200, 400));
    state.set_crop_offset((1000.0, 80.0));
    assert_eq!(state.crop_offset(), (300.0, 0.0));
    state.set_crop_offset((-1000.0, -80.0));
    assert_eq!(state.crop_offset(), (-300.0, 0.0));
}

#[test]
fn test_zoom_out_reclamps_offset() {
    let mut state = PostcardState::default();
    state.install_image(solid_source(600, 400));
    state.set_zoom(2.0);
    state.set_crop_offset((300.0, 200.0));
    assert_eq!(state.crop_offset(), (300.0, 200.0));
    // Back to 1x the photo fits snugly; no offset slack remains.
    state.set_zoom(1.0);
    assert_eq!(state.crop_offset(), (0.0, 0.0));
}

#[test]
fn test_orientation_switch_reclamps_offset() {
    let mut state = PostcardState::default();
    state.install_image(solid_source(1200, 400));
    state.set_crop_offset((250.0, 0.0));
    assert_eq!(state.crop_offset(), (250.0, 0.0));
    // Portrait cover-fit leaves different slack; offset must stay legal.
    state.set_orientation(Orientation::Portrait);
    let (x, y) = state.crop_offset();
    assert!(x.abs() <= 1200.0 && y.abs() <= 600.0);
    assert_eq!(state.zoom(), 1.0);
}

// ---------------------------------------------------------------------------
// Upload semantics
// ---------------------------------------------------------------------------

#[test]
fn test_upload_decodes_png() {
    let mut state = PostcardState::default();
    state.upload_image(&png_bytes(32, 16)).unwrap();
    let source = state.source_image().unwrap();
    assert_eq!((source.width(), source.height()), (32, 16));
}

#[test]
fn test_upload_garbage_fails_and_keeps_state() {
    let mut state = PostcardState::default();
    state.install_image(solid_source(600, 400));
    assert!(state.upload_image(b"not an image").is_err());
    assert!(state.source_image().is_some());
}

#[test]
fn test_new_upload_resets_crop_and_zoom_but_keeps_filter() {
    let mut state = PostcardState::default();
    state.install_image(solid_source(1200, 800));
    state.set_zoom(2.5);
    state.set_crop_offset((40.0, 30.0));
    state.set_filter_kind(FilterKind::Vintage);
    state.set_filter_intensity(60);

    state.install_image(solid_source(900, 900));
    assert_eq!(state.zoom(), 1.0);
    assert_eq!(state.crop_offset(), (0.0, 0.0));
    assert_eq!(state.filter_kind(), FilterKind::Vintage);
    assert_eq!(state.filter_intensity(), 60);
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

#[test]
fn test_reset_restores_every_default() {
    let mut state = PostcardState::default();
    state.install_image(solid_source(800, 600));
    state.set_orientation(Orientation::Portrait);
    state.set_side(Side::Back);
    state.set_template(Template::Blank);
    state.set_font_style(FontStyle::Serif);
    state.set_accent_color(ACCENT_PALETTE[2]);
    state.set_title("Hello");
    state.set_message("Changed");
    state.set_zoom(2.0);
    state.set_filter_kind(FilterKind::Mono);

    state.reset();
    assert!(state.source_image().is_none());
    assert_eq!(state.orientation(), Orientation::Landscape);
    assert_eq!(state.side(), Side::Front);
    assert_eq!(state.template(), Template::Exhibition);
    assert_eq!(state.font_style(), FontStyle::Sans);
    assert_eq!(state.accent_color(), ACCENT_PALETTE[0]);
    assert_eq!(state.title(), DEFAULT_TITLE);
    assert_eq!(state.zoom(), 1.0);
    assert_eq!(state.filter_kind(), FilterKind::None);
}

#[test]
fn test_filter_settings_reflect_selection() {
    let mut state = PostcardState::default();
    state.set_filter_kind(FilterKind::Mono);
    state.set_filter_intensity(0);
    assert!(state.filter_settings().is_identity());
    state.set_filter_intensity(100);
    assert!(!state.filter_settings().is_identity());
}
