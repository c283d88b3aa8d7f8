use std::sync::Arc;

use image::RgbaImage;

use crate::consts::{MAX_FILTER_INTENSITY, MAX_ZOOM, MIN_ZOOM};
use crate::error::Result;
use crate::filter::{FilterKind, FilterSettings};
use crate::geometry::{self, CanvasGeometry, Orientation};
use crate::scene::Color;

/// Which face of the postcard is being edited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    Front,
    Back,
}

/// Layout preset for the back face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Template {
    #[default]
    Exhibition,
    Basic,
    Blank,
}

pub const TEMPLATES: [Template; 3] = [Template::Exhibition, Template::Basic, Template::Blank];

impl Template {
    pub fn label(&self) -> &'static str {
        match self {
            Template::Exhibition => "Exhibition",
            Template::Basic => "Basic",
            Template::Blank => "Blank",
        }
    }
}

/// Typeface family used for back-face text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Sans,
    Serif,
}

impl FontStyle {
    pub fn label(&self) -> &'static str {
        match self {
            FontStyle::Sans => "Sans",
            FontStyle::Serif => "Serif",
        }
    }
}

/// Selectable accent colors, in UI order. The first entry is the default.
pub const ACCENT_PALETTE: [Color; 5] = [
    Color::rgb(0x1a, 0x1a, 0x1a),
    Color::rgb(0x25, 0x63, 0xeb),
    Color::rgb(0xdc, 0x26, 0x26),
    Color::rgb(0x05, 0x96, 0x69),
    Color::rgb(0xd9, 0x77, 0x06),
];

pub const DEFAULT_TITLE: &str = "My Postcard Maker";
pub const DEFAULT_SUBTITLE: &str = "SEOUL, 2026";
pub const DEFAULT_MESSAGE: &str =
    "Write your message here.\nA postcard only holds a few lines, so make them count.";

/// Decoded source photo, shared cheaply between the store, composed scenes
/// and the worker thread.
#[derive(Clone, Debug)]
pub struct SourceImage {
    rgba: Arc<RgbaImage>,
}

impl SourceImage {
    /// Decode an uploaded file from its raw bytes, format sniffed from
    /// content.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_rgba(image.to_rgba8()))
    }

    pub fn from_rgba(rgba: RgbaImage) -> Self {
        Self {
            rgba: Arc::new(rgba),
        }
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.rgba
    }
}

/// Front-photo state: the uploaded source plus its crop and filter controls.
#[derive(Clone, Debug)]
pub struct ImageState {
    source: Option<SourceImage>,
    crop_offset: (f32, f32),
    zoom: f32,
    filter_kind: FilterKind,
    filter_intensity: u8,
}

impl Default for ImageState {
    fn default() -> Self {
        Self {
            source: None,
            crop_offset: (0.0, 0.0),
            zoom: MIN_ZOOM,
            filter_kind: FilterKind::default(),
            filter_intensity: MAX_FILTER_INTENSITY,
        }
    }
}

/// Editor-wide state: everything that influences composed output.
#[derive(Clone, Debug)]
pub struct EditorState {
    orientation: Orientation,
    side: Side,
    template: Template,
    font_style: FontStyle,
    accent_color: Color,
    title: String,
    subtitle: String,
    message: String,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            side: Side::default(),
            template: Template::default(),
            font_style: FontStyle::default(),
            accent_color: ACCENT_PALETTE[0],
            title: DEFAULT_TITLE.to_owned(),
            subtitle: DEFAULT_SUBTITLE.to_owned(),
            message: DEFAULT_MESSAGE.to_owned(),
        }
    }
}

/// The single mutable store behind the editor.
///
/// All mutation goes through setters that enforce range invariants, so a
/// `PostcardState` can never hold an out-of-range zoom, intensity or crop
/// offset.
#[derive(Clone, Debug, Default)]
pub struct PostcardState {
    editor: EditorState,
    image: ImageState,
}

impl PostcardState {
    // ------------------------------------------------------------------
    // Editor state
    // ------------------------------------------------------------------

    pub fn orientation(&self) -> Orientation {
        self.editor.orientation
    }

    /// Switching orientation swaps the canvas but keeps crop and zoom as-is;
    /// the crop window is re-derived (and re-clamped) against the new aspect
    /// at composition time.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.editor.orientation = orientation;
        self.clamp_crop_offset();
    }

    pub fn side(&self) -> Side {
        self.editor.side
    }

    pub fn set_side(&mut self, side: Side) {
        self.editor.side = side;
    }

    pub fn template(&self) -> Template {
        self.editor.template
    }

    pub fn set_template(&mut self, template: Template) {
        self.editor.template = template;
    }

    pub fn font_style(&self) -> FontStyle {
        self.editor.font_style
    }

    pub fn set_font_style(&mut self, font_style: FontStyle) {
        self.editor.font_style = font_style;
    }

    pub fn accent_color(&self) -> Color {
        self.editor.accent_color
    }

    pub fn set_accent_color(&mut self, color: Color) {
        self.editor.accent_color = color;
    }

    pub fn title(&self) -> &str {
        &self.editor.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.editor.title = title.into();
    }

    pub fn subtitle(&self) -> &str {
        &self.editor.subtitle
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.editor.subtitle = subtitle.into();
    }

    pub fn message(&self) -> &str {
        &self.editor.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.editor.message = message.into();
    }

    pub fn title_mut(&mut self) -> &mut String {
        &mut self.editor.title
    }

    pub fn subtitle_mut(&mut self) -> &mut String {
        &mut self.editor.subtitle
    }

    pub fn message_mut(&mut self) -> &mut String {
        &mut self.editor.message
    }

    /// Canvas geometry implied by the current orientation.
    pub fn canvas(&self) -> CanvasGeometry {
        CanvasGeometry::for_orientation(self.editor.orientation)
    }

    // ------------------------------------------------------------------
    // Image state
    // ------------------------------------------------------------------

    pub fn source_image(&self) -> Option<&SourceImage> {
        self.image.source.as_ref()
    }

    pub fn crop_offset(&self) -> (f32, f32) {
        self.image.crop_offset
    }

    /// Clamped so the photo keeps covering the whole canvas. A no-op while
    /// no photo is loaded.
    pub fn set_crop_offset(&mut self, offset: (f32, f32)) {
        if self.image.source.is_none() {
            return;
        }
        self.image.crop_offset = offset;
        self.clamp_crop_offset();
    }

    pub fn zoom(&self) -> f32 {
        self.image.zoom
    }

    /// Clamped to the valid zoom range; zooming out re-clamps the offset.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.image.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp_crop_offset();
    }

    pub fn filter_kind(&self) -> FilterKind {
        self.image.filter_kind
    }

    pub fn set_filter_kind(&mut self, kind: FilterKind) {
        self.image.filter_kind = kind;
    }

    pub fn filter_intensity(&self) -> u8 {
        self.image.filter_intensity
    }

    pub fn set_filter_intensity(&mut self, intensity: u8) {
        self.image.filter_intensity = intensity.min(MAX_FILTER_INTENSITY);
    }

    /// Descriptor for the currently selected filter at its intensity.
    pub fn filter_settings(&self) -> FilterSettings {
        self.image
            .filter_kind
            .settings(self.image.filter_intensity)
    }

    /// Decode `bytes` and install the result as the front photo.
    pub fn upload_image(&mut self, bytes: &[u8]) -> Result<()> {
        let source = SourceImage::decode(bytes)?;
        self.install_image(source);
        Ok(())
    }

    /// Replace the front photo. Crop and zoom reset so the new photo starts
    /// centered at 1x; the filter selection carries over.
    pub fn install_image(&mut self, source: SourceImage) {
        self.image.source = Some(source);
        self.image.crop_offset = (0.0, 0.0);
        self.image.zoom = MIN_ZOOM;
    }

    /// Restore every control to its default in one step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn clamp_crop_offset(&mut self) {
        let Some(source) = &self.image.source else {
            return;
        };
        let (max_x, max_y) = geometry::max_crop_offset(
            source.width(),
            source.height(),
            &self.canvas(),
            self.image.zoom,
        );
        let (x, y) = self.image.crop_offset;
        self.image.crop_offset = (x.clamp(-max_x, max_x), y.clamp(-max_y, max_y));
    }
}
