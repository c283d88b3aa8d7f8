//! Pure composition of editor state into a renderable scene.
//!
//! `compose` is the single entry point: the same `PostcardState` always
//! yields the same display list, for both the live preview and export.

use crate::geometry;
use crate::scene::{Color, FontSlot, HAlign, Node, Rect, Scene, TextNode, VAlign};
use crate::state::{FontStyle, PostcardState, Side, Template};

// Neutral grays used by every template.
const GRAY_50: Color = Color::rgb(0xf9, 0xfa, 0xfb);
const GRAY_100: Color = Color::rgb(0xf3, 0xf4, 0xf6);
const GRAY_200: Color = Color::rgb(0xe5, 0xe7, 0xeb);
const GRAY_300: Color = Color::rgb(0xd1, 0xd5, 0xdb);
const GRAY_400: Color = Color::rgb(0x9c, 0xa3, 0xaf);
const GRAY_600: Color = Color::rgb(0x4b, 0x56, 0x63);
const GRAY_900: Color = Color::rgb(0x11, 0x18, 0x27);

/// Inner padding of the back face.
const BACK_PADDING: f32 = 32.0;

const EDGE_CAPTION: &str = "© MY POSTCARD MAKER 2026";
const FOOTER_DESTINATION: &str = "→ SEOUL";
const BARCODE_DIGITS: &str = "8 809669 735726";
const BLANK_CAPTION: &str = "MY POSTCARD MAKER";
const UPLOAD_PROMPT: &str = "UPLOAD YOUR PHOTO";

/// Compose the currently edited face into a scene.
pub fn compose(state: &PostcardState) -> Scene {
    let mut scene = Scene::new(&state.canvas());
    match state.side() {
        Side::Front => compose_front(state, &mut scene),
        Side::Back => compose_back(state, &mut scene),
    }
    scene
}

fn compose_front(state: &PostcardState, scene: &mut Scene) {
    let bounds = scene.bounds();
    match state.source_image() {
        Some(source) => {
            let window = geometry::crop_window(
                source.width(),
                source.height(),
                &state.canvas(),
                state.crop_offset(),
                state.zoom(),
            );
            scene.nodes.push(Node::Photo {
                rect: bounds,
                source: source.clone(),
                window,
                filter: state.filter_settings(),
            });
        }
        None => {
            scene.nodes.push(Node::Fill {
                rect: bounds,
                color: GRAY_100,
            });
            scene.nodes.push(Node::Text(TextNode {
                text: UPLOAD_PROMPT.to_owned(),
                rect: bounds,
                size: 14.0,
                letter_spacing: 1.4,
                color: GRAY_300,
                font: FontSlot::Serif,
                halign: HAlign::Center,
                valign: VAlign::Middle,
                ..TextNode::default()
            }));
        }
    }
}

fn compose_back(state: &PostcardState, scene: &mut Scene) {
    let content = Rect::new(
        BACK_PADDING,
        BACK_PADDING,
        scene.width as f32 - 2.0 * BACK_PADDING,
        scene.height as f32 - 2.0 * BACK_PADDING,
    );
    match state.template() {
        Template::Exhibition => compose_exhibition(state, scene, content),
        Template::Basic => compose_basic(state, scene, content),
        Template::Blank => compose_blank(scene, content),
    }
}

fn body_font(style: FontStyle) -> FontSlot {
    match style {
        FontStyle::Sans => FontSlot::Sans,
        FontStyle::Serif => FontSlot::Serif,
    }
}

fn compose_exhibition(state: &PostcardState, scene: &mut Scene, content: Rect) {
    let font = body_font(state.font_style());

    // Rotated copyright line hugging the right edge.
    scene.nodes.push(Node::Text(TextNode {
        text: EDGE_CAPTION.to_owned(),
        rect: Rect::new(content.right() - 10.0, content.y, 10.0, content.h),
        size: 8.0,
        letter_spacing: 0.8,
        color: GRAY_300,
        halign: HAlign::Center,
        valign: VAlign::Middle,
        rotate_quarter: true,
        ..TextNode::default()
    }));

    // Header: title in the accent color, subtitle in small caps below.
    scene.nodes.push(Node::Text(TextNode {
        text: state.title().to_owned(),
        rect: Rect::new(content.x, content.y, content.w - 16.0, 28.0),
        size: 24.0,
        line_height: 1.0,
        color: state.accent_color(),
        font,
        bold: true,
        ..TextNode::default()
    }));
    scene.nodes.push(Node::Text(TextNode {
        text: state.subtitle().to_uppercase(),
        rect: Rect::new(content.x, content.y + 36.0, content.w - 16.0, 12.0),
        size: 9.0,
        letter_spacing: 1.35,
        color: GRAY_400,
        bold: true,
        ..TextNode::default()
    }));

    // Message centered between header and footer, with extra side margins.
    let footer_top = content.bottom() - 54.0;
    let message_top = content.y + 96.0;
    scene.nodes.push(Node::Text(TextNode {
        text: state.message().to_owned(),
        rect: Rect::new(
            content.x + 48.0,
            message_top,
            content.w - 96.0,
            footer_top - message_top - 24.0,
        ),
        size: 12.0,
        line_height: 2.0,
        color: GRAY_600,
        font,
        halign: HAlign::Center,
        valign: VAlign::Middle,
        ..TextNode::default()
    }));

    // Footer rule and contents.
    scene.nodes.push(Node::Fill {
        rect: Rect::new(content.x, footer_top, content.w, 2.0),
        color: GRAY_900,
    });
    scene.nodes.push(Node::Text(TextNode {
        text: FOOTER_DESTINATION.to_owned(),
        rect: Rect::new(content.x, footer_top + 2.0, content.w / 2.0, 52.0),
        size: 10.0,
        letter_spacing: 1.0,
        color: GRAY_900,
        bold: true,
        valign: VAlign::Bottom,
        ..TextNode::default()
    }));

    let barcode = Rect::new(content.right() - 130.0, footer_top + 10.0, 120.0, 30.0);
    compose_barcode(scene, barcode);
    scene.nodes.push(Node::Text(TextNode {
        text: BARCODE_DIGITS.to_owned(),
        rect: Rect::new(barcode.x, barcode.bottom() + 2.0, barcode.w, 10.0),
        size: 8.0,
        letter_spacing: 0.4,
        color: GRAY_400,
        font: FontSlot::Mono,
        halign: HAlign::Right,
        ..TextNode::default()
    }));
}

fn compose_basic(state: &PostcardState, scene: &mut Scene, content: Rect) {
    let font = body_font(state.font_style());
    let column_w = (content.w - 32.0) / 2.0;
    let left = Rect::new(content.x, content.y, column_w, content.h);
    let right = Rect::new(content.right() - column_w, content.y, column_w, content.h);

    // Message fills the left column, vertically centered.
    scene.nodes.push(Node::Text(TextNode {
        text: state.message().to_owned(),
        rect: Rect::new(left.x, left.y, left.w - 16.0, left.h),
        size: 12.0,
        line_height: 2.4,
        color: GRAY_600,
        font,
        valign: VAlign::Middle,
        ..TextNode::default()
    }));

    // Hairline divider between the columns, 80% of the content height.
    let divider_h = content.h * 0.8;
    scene.nodes.push(Node::Fill {
        rect: Rect::new(
            content.x + content.w / 2.0,
            content.y + (content.h - divider_h) / 2.0,
            1.0,
            divider_h,
        ),
        color: GRAY_200,
    });

    // Stamp box in the top-right corner, with a dashed inner frame.
    let stamp = Rect::new(right.right() - 64.0, right.y, 64.0, 80.0);
    scene.nodes.push(Node::Fill {
        rect: stamp,
        color: GRAY_50,
    });
    compose_frame(scene, stamp, 1.0, GRAY_300);
    compose_dashed_frame(
        scene,
        Rect::new(stamp.x + 8.0, stamp.y + 8.0, 48.0, 64.0),
        GRAY_300,
    );

    // Three address rules stacked above the bottom margin; the first two
    // carry the title and subtitle right-aligned, the last stays blank.
    let rule_gap = 24.0;
    let rule_bottom = right.bottom() - 32.0;
    let rules = [
        rule_bottom - 2.0 * rule_gap - 2.0 * 18.0,
        rule_bottom - rule_gap - 18.0,
        rule_bottom,
    ];

    scene.nodes.push(Node::Text(TextNode {
        text: state.title().to_owned(),
        rect: Rect::new(right.x + 16.0, rules[0] - 18.0, right.w - 16.0, 16.0),
        size: 12.0,
        color: GRAY_900,
        font,
        bold: true,
        halign: HAlign::Right,
        valign: VAlign::Bottom,
        ..TextNode::default()
    }));
    scene.nodes.push(Node::Text(TextNode {
        text: state.subtitle().to_uppercase(),
        rect: Rect::new(right.x + 16.0, rules[1] - 16.0, right.w - 16.0, 14.0),
        size: 10.0,
        letter_spacing: 1.0,
        color: GRAY_400,
        halign: HAlign::Right,
        valign: VAlign::Bottom,
        ..TextNode::default()
    }));
    for y in rules {
        scene.nodes.push(Node::Fill {
            rect: Rect::new(right.x + 16.0, y, right.w - 16.0, 1.0),
            color: GRAY_300,
        });
    }
}

fn compose_blank(scene: &mut Scene, content: Rect) {
    scene.nodes.push(Node::Text(TextNode {
        text: BLANK_CAPTION.to_owned(),
        rect: Rect::new(content.x, content.bottom() - 26.0, content.w, 10.0),
        size: 8.0,
        letter_spacing: 2.4,
        color: GRAY_300,
        halign: HAlign::Center,
        valign: VAlign::Bottom,
        ..TextNode::default()
    }));
}

/// One-pixel-weight rectangular outline made of four fills.
fn compose_frame(scene: &mut Scene, rect: Rect, weight: f32, color: Color) {
    scene.nodes.push(Node::Fill {
        rect: Rect::new(rect.x, rect.y, rect.w, weight),
        color,
    });
    scene.nodes.push(Node::Fill {
        rect: Rect::new(rect.x, rect.bottom() - weight, rect.w, weight),
        color,
    });
    scene.nodes.push(Node::Fill {
        rect: Rect::new(rect.x, rect.y, weight, rect.h),
        color,
    });
    scene.nodes.push(Node::Fill {
        rect: Rect::new(rect.right() - weight, rect.y, weight, rect.h),
        color,
    });
}

/// Dashed outline: alternating 4px dashes with 3px gaps along each edge.
fn compose_dashed_frame(scene: &mut Scene, rect: Rect, color: Color) {
    let color = Color::rgba(color.r, color.g, color.b, 0x80);
    let dash: f32 = 4.0;
    let gap: f32 = 3.0;

    let mut x = rect.x;
    while x < rect.right() {
        let w = dash.min(rect.right() - x);
        scene.nodes.push(Node::Fill {
            rect: Rect::new(x, rect.y, w, 1.0),
            color,
        });
        scene.nodes.push(Node::Fill {
            rect: Rect::new(x, rect.bottom() - 1.0, w, 1.0),
            color,
        });
        x += dash + gap;
    }
    let mut y = rect.y;
    while y < rect.bottom() {
        let h = dash.min(rect.bottom() - y);
        scene.nodes.push(Node::Fill {
            rect: Rect::new(rect.x, y, 1.0, h),
            color,
        });
        scene.nodes.push(Node::Fill {
            rect: Rect::new(rect.right() - 1.0, y, 1.0, h),
            color,
        });
        y += dash + gap;
    }
}

/// Synthetic Code 128-look barcode: bar widths keyed off the digit values so
/// the same digit string always draws the same bars.
fn compose_barcode(scene: &mut Scene, rect: Rect) {
    let color = Color::rgba(0x11, 0x18, 0x27, 0xcc);
    let mut x = rect.x;
    for digit in BARCODE_DIGITS.chars().filter(|c| c.is_ascii_digit()) {
        let value = digit as u32 - '0' as u32;
        let bar_w = 1.0 + (value % 3) as f32;
        let gap_w = 1.0 + (value % 4) as f32 / 2.0;
        for _ in 0..2 {
            if x + bar_w > rect.right() {
                return;
            }
            scene.nodes.push(Node::Fill {
                rect: Rect::new(x, rect.y, bar_w, rect.h),
                color,
            });
            x += bar_w + gap_w;
        }
    }
}
