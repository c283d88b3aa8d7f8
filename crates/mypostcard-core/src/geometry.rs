use crate::consts::{LANDSCAPE_SIZE, PORTRAIT_SIZE, VIEWPORT_PADDING};
use crate::scene::CropWindow;

/// Orientation of the postcard face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

/// Fixed logical pixel size of the postcard face, determined by orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub width: u32,
    pub height: u32,
}

impl CanvasGeometry {
    pub fn for_orientation(orientation: Orientation) -> Self {
        let (width, height) = match orientation {
            Orientation::Landscape => LANDSCAPE_SIZE,
            Orientation::Portrait => PORTRAIT_SIZE,
        };
        Self { width, height }
    }

    /// Width/height ratio; also the locked aspect of the front crop window.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Fit the canvas into the available viewport, never upscaling past 100%.
///
/// Pure and idempotent: the same inputs always yield the same scale. The
/// fixed padding is subtracted from each axis before computing the per-axis
/// fit ratios; degenerate (too small) viewports floor at 0.0.
pub fn measure(avail_w: f32, avail_h: f32, geometry: &CanvasGeometry) -> f32 {
    let scale_x = (avail_w - VIEWPORT_PADDING) / geometry.width as f32;
    let scale_y = (avail_h - VIEWPORT_PADDING) / geometry.height as f32;
    scale_x.min(scale_y).min(1.0).max(0.0)
}

/// Visible source window for cover-fit display of a photo on the canvas.
///
/// The photo is scaled so it covers the whole canvas (cover fit), then
/// further enlarged by `zoom`. A positive `offset` drags the photo right/down
/// in display pixels, which moves the sampled window left/up in source
/// coordinates. The window is clamped to the source bounds and its aspect
/// always equals `geometry.aspect()`.
pub fn crop_window(
    src_w: u32,
    src_h: u32,
    geometry: &CanvasGeometry,
    offset: (f32, f32),
    zoom: f32,
) -> CropWindow {
    let canvas_w = geometry.width as f32;
    let canvas_h = geometry.height as f32;
    let src_w = src_w.max(1) as f32;
    let src_h = src_h.max(1) as f32;

    let cover = (canvas_w / src_w).max(canvas_h / src_h);
    let display_scale = cover * zoom.max(1.0);

    let w = canvas_w / display_scale;
    let h = canvas_h / display_scale;
    let cx = src_w / 2.0 - offset.0 / display_scale;
    let cy = src_h / 2.0 - offset.1 / display_scale;

    // Rounding in the cover division can leave the window a hair wider than
    // the source; floor the clamp bound at zero so clamp never inverts.
    CropWindow {
        x: (cx - w / 2.0).clamp(0.0, (src_w - w).max(0.0)),
        y: (cy - h / 2.0).clamp(0.0, (src_h - h).max(0.0)),
        w,
        h,
    }
}

/// Largest crop offset magnitude (per axis, display pixels) that still keeps
/// the photo covering the whole canvas at the given zoom.
pub fn max_crop_offset(src_w: u32, src_h: u32, geometry: &CanvasGeometry, zoom: f32) -> (f32, f32) {
    let canvas_w = geometry.width as f32;
    let canvas_h = geometry.height as f32;
    let src_w = src_w.max(1) as f32;
    let src_h = src_h.max(1) as f32;

    let cover = (canvas_w / src_w).max(canvas_h / src_h);
    let display_scale = cover * zoom.max(1.0);

    (
        ((src_w * display_scale - canvas_w) / 2.0).max(0.0),
        ((src_h * display_scale - canvas_h) / 2.0).max(0.0),
    )
}
