use image::{Rgba, RgbaImage};

use mypostcard_core::filter::FilterKind;
use mypostcard_core::geometry::Orientation;
use mypostcard_core::scene::{Node, Scene};
use mypostcard_core::state::{
    FontStyle, PostcardState, Side, SourceImage, Template, ACCENT_PALETTE,
};
use mypostcard_core::template::compose;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn back_state(template: Template) -> PostcardState {
    let mut state = PostcardState::default();
    state.set_side(Side::Back);
    state.set_template(template);
    state
}

fn texts_of(scene: &Scene) -> Vec<&str> {
    scene.texts().map(|t| t.text.as_str()).collect()
}

fn solid_source(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba(RgbaImage::from_pixel(w, h, Rgba([9, 9, 9, 255])))
}

// ---------------------------------------------------------------------------
// Purity and canvas size
// ---------------------------------------------------------------------------

#[test]
fn test_compose_matches_orientation() {
    let mut state = PostcardState::default();
    let scene = compose(&state);
    assert_eq!((scene.width, scene.height), (600, 400));

    state.set_orientation(Orientation::Portrait);
    let scene = compose(&state);
    assert_eq!((scene.width, scene.height), (400, 600));
}

#[test]
fn test_compose_is_pure() {
    let state = back_state(Template::Exhibition);
    let a = compose(&state);
    let b = compose(&state);
    assert_eq!(a.nodes.len(), b.nodes.len());
    assert_eq!(texts_of(&a), texts_of(&b));
}

// ---------------------------------------------------------------------------
// Front face
// ---------------------------------------------------------------------------

#[test]
fn test_front_without_photo_shows_placeholder() {
    let state = PostcardState::default();
    let scene = compose(&state);
    assert!(texts_of(&scene).iter().any(|t| t.contains("UPLOAD")));
    assert!(!scene
        .nodes
        .iter()
        .any(|n| matches!(n, Node::Photo { .. })));
}

#[test]
fn test_front_with_photo_emits_photo_node() {
    let mut state = PostcardState::default();
    state.install_image(solid_source(1200, 400));
    state.set_filter_kind(FilterKind::Mono);
    let scene = compose(&state);

    let photo = scene
        .nodes
        .iter()
        .find_map(|n| match n {
            Node::Photo { rect, window, filter, .. } => Some((rect, window, filter)),
            _ => None,
        })
        .unwrap();
    let (rect, window, filter) = photo;
    // Photo spans the full canvas, crop window is centered cover-fit.
    assert_eq!((rect.w, rect.h), (600.0, 400.0));
    assert_eq!((window.x, window.w), (300.0, 600.0));
    assert!(!filter.is_identity());
    // No placeholder text alongside the photo.
    assert!(texts_of(&scene).is_empty());
}

// ---------------------------------------------------------------------------
// Exhibition template
// ---------------------------------------------------------------------------

#[test]
fn test_exhibition_contains_expected_texts() {
    let mut state = back_state(Template::Exhibition);
    state.set_title("Greetings");
    state.set_subtitle("busan, 2026");
    state.set_message("wish you were here");
    let scene = compose(&state);

    let texts = texts_of(&scene);
    assert!(texts.contains(&"Greetings"));
    // Subtitle renders upper-cased.
    assert!(texts.contains(&"BUSAN, 2026"));
    assert!(texts.contains(&"wish you were here"));
    assert!(texts.contains(&"→ SEOUL"));
    assert!(texts.contains(&"8 809669 735726"));
}

#[test]
fn test_exhibition_title_uses_accent_color() {
    let mut state = back_state(Template::Exhibition);
    state.set_accent_color(ACCENT_PALETTE[1]);
    state.set_title("Tinted");
    let scene = compose(&state);

    let title = scene.texts().find(|t| t.text == "Tinted").unwrap();
    assert_eq!(title.color, ACCENT_PALETTE[1]);
    assert!(title.bold);
}

#[test]
fn test_exhibition_has_rotated_edge_caption() {
    let scene = compose(&back_state(Template::Exhibition));
    let caption = scene.texts().find(|t| t.rotate_quarter).unwrap();
    assert!(caption.text.contains("MY POSTCARD MAKER"));
}

#[test]
fn test_exhibition_respects_font_style() {
    use mypostcard_core::scene::FontSlot;
    let mut state = back_state(Template::Exhibition);
    state.set_font_style(FontStyle::Serif);
    state.set_title("Serifed");
    let scene = compose(&state);
    let title = scene.texts().find(|t| t.text == "Serifed").unwrap();
    assert_eq!(title.font, FontSlot::Serif);
}

#[test]
fn test_exhibition_has_barcode_bars() {
    let scene = compose(&back_state(Template::Exhibition));
    let fills = scene
        .nodes
        .iter()
        .filter(|n| matches!(n, Node::Fill { .. }))
        .count();
    // Footer rule plus a run of barcode bars.
    assert!(fills > 10, "expected barcode bars, found {fills} fills");
}

// ---------------------------------------------------------------------------
// Basic template
// ---------------------------------------------------------------------------

#[test]
fn test_basic_contains_message_and_address_lines() {
    let mut state = back_state(Template::Basic);
    state.set_title("From Me");
    state.set_subtitle("to you");
    state.set_message("hello there");
    let scene = compose(&state);

    let texts = texts_of(&scene);
    assert!(texts.contains(&"hello there"));
    assert!(texts.contains(&"From Me"));
    assert!(texts.contains(&"TO YOU"));
    // Nothing from the exhibition layout leaks in.
    assert!(!texts.contains(&"→ SEOUL"));
    assert!(!texts.contains(&"8 809669 735726"));
}

#[test]
fn test_basic_empty_title_keeps_layout() {
    let mut state = back_state(Template::Basic);
    state.set_title("");
    let scene = compose(&state);
    // The rule stays in place with an empty label on it.
    assert!(texts_of(&scene).contains(&""));
}

#[test]
fn test_basic_draws_stamp_box_and_rules() {
    let scene = compose(&back_state(Template::Basic));
    let fills = scene
        .nodes
        .iter()
        .filter(|n| matches!(n, Node::Fill { .. }))
        .count();
    // Stamp box, dashed inner frame, divider and three address rules.
    assert!(fills > 20, "expected stamp/divider/rule fills, found {fills}");
}

// ---------------------------------------------------------------------------
// Blank template
// ---------------------------------------------------------------------------

#[test]
fn test_blank_only_has_footer_caption() {
    let mut state = back_state(Template::Blank);
    state.set_title("Should not appear");
    state.set_message("Neither should this");
    let scene = compose(&state);

    let texts = texts_of(&scene);
    assert_eq!(texts, ["MY POSTCARD MAKER"]);
}

#[test]
fn test_blank_ignores_accent_and_font_style() {
    let mut state = back_state(Template::Blank);
    state.set_accent_color(ACCENT_PALETTE[3]);
    state.set_font_style(FontStyle::Serif);
    let scene = compose(&state);

    let caption = scene.texts().next().unwrap();
    assert_ne!(caption.color, ACCENT_PALETTE[3]);
    assert_eq!(caption.font, mypostcard_core::scene::FontSlot::Sans);
}
