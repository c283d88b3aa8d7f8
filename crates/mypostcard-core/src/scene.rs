use crate::filter::FilterSettings;
use crate::geometry::CanvasGeometry;
use crate::state::SourceImage;

/// Plain RGBA color, no GUI type leakage into the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Axis-aligned rectangle in canvas units (logical pixels at 1x).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Rectangular window into a source photo, in source pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropWindow {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl CropWindow {
    pub fn aspect(&self) -> f32 {
        self.w / self.h
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontSlot {
    #[default]
    Sans,
    Serif,
    Mono,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// A block of text laid out inside `rect`.
///
/// `size` and `letter_spacing` are in canvas units; `line_height` is a
/// multiple of `size`. Lines break on explicit newlines and by greedy word
/// wrap against the box width.
#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    pub text: String,
    pub rect: Rect,
    pub size: f32,
    pub line_height: f32,
    pub letter_spacing: f32,
    pub color: Color,
    pub font: FontSlot,
    pub bold: bool,
    pub halign: HAlign,
    pub valign: VAlign,
    /// Rotate the rendered block a quarter turn clockwise (edge captions).
    pub rotate_quarter: bool,
}

impl Default for TextNode {
    fn default() -> Self {
        Self {
            text: String::new(),
            rect: Rect::default(),
            size: 12.0,
            line_height: 1.4,
            letter_spacing: 0.0,
            color: Color::BLACK,
            font: FontSlot::Sans,
            bold: false,
            halign: HAlign::Left,
            valign: VAlign::Top,
            rotate_quarter: false,
        }
    }
}

/// One display-list entry of a composed postcard face.
#[derive(Clone, Debug)]
pub enum Node {
    /// Solid rectangle, alpha-blended over what is below.
    Fill { rect: Rect, color: Color },
    /// The front photo: a crop window of the source, resized into `rect`
    /// with the filter descriptor applied.
    Photo {
        rect: Rect,
        source: SourceImage,
        window: CropWindow,
        filter: FilterSettings,
    },
    Text(TextNode),
}

/// Deterministic display list for one postcard face, in canvas units.
///
/// Scenes are pure data: composing one has no side effects, and rasterizing
/// the same scene twice yields identical bitmaps.
#[derive(Clone, Debug)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(geometry: &CanvasGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            background: Color::WHITE,
            nodes: Vec::new(),
        }
    }

    /// Full canvas rect.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextNode> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Text(text) => Some(text),
            _ => None,
        })
    }
}
