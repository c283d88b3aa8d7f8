//! Export pipeline: scene capture, PNG encoding and the in-flight guard.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use image::codecs::png::PngEncoder;
use image::RgbaImage;
use tracing::info;

use crate::consts::EXPORT_SCALE;
use crate::error::{PostcardError, Result};
use crate::scene::{Color, Scene};

/// How a scene should be turned into a bitmap.
#[derive(Clone, Copy, Debug)]
pub struct RasterizeOptions {
    /// Device pixels per canvas unit.
    pub output_scale: u32,
    /// Base color under the scene; `None` keeps the backdrop transparent so
    /// the scene's own background is the outermost layer.
    pub background: Option<Color>,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        Self {
            output_scale: EXPORT_SCALE,
            background: None,
        }
    }
}

impl RasterizeOptions {
    /// Options for the on-screen preview at canvas resolution.
    pub fn preview() -> Self {
        Self {
            output_scale: 1,
            ..Self::default()
        }
    }
}

/// Capability that turns a composed scene into pixels.
///
/// Injected rather than constructed by the exporter so the pipeline can be
/// exercised with a fake in tests and swapped for another backend without
/// touching export logic.
pub trait Rasterizer: Send + Sync {
    fn capture(&self, scene: &Scene, options: &RasterizeOptions) -> Result<RgbaImage>;
}

/// Drives exports and rejects overlapping requests.
#[derive(Debug, Default)]
pub struct Exporter {
    in_flight: AtomicBool,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Capture `scene` at export resolution and encode it as PNG bytes.
    ///
    /// At most one export runs at a time; a second call while one is in
    /// flight fails with [`PostcardError::ExportInFlight`] without touching
    /// the rasterizer.
    pub fn export(&self, rasterizer: &dyn Rasterizer, scene: &Scene) -> Result<Vec<u8>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(PostcardError::ExportInFlight);
        }
        let result = rasterizer
            .capture(scene, &RasterizeOptions::default())
            .and_then(|bitmap| encode_png(&bitmap));
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    /// Export and write the PNG in a single write, so a failed capture or
    /// encode never leaves a partial file behind.
    pub fn export_to_file(
        &self,
        rasterizer: &dyn Rasterizer,
        scene: &Scene,
        path: &Path,
    ) -> Result<()> {
        let png = self.export(rasterizer, scene)?;
        fs::write(path, &png)?;
        info!(path = %path.display(), bytes = png.len(), "postcard exported");
        Ok(())
    }
}

/// Encode a bitmap as PNG into memory.
pub fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    bitmap.write_with_encoder(PngEncoder::new(Cursor::new(&mut buffer)))?;
    Ok(buffer)
}

/// Download filename for an export taken at `epoch_ms`.
pub fn export_filename(epoch_ms: u128) -> String {
    format!("mypostcard-{epoch_ms}.png")
}

/// Filename stamped with the current wall-clock time.
pub fn timestamped_filename() -> String {
    let epoch_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    export_filename(epoch_ms)
}
