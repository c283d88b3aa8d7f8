use image::RgbaImage;

/// Convert a rasterized RGBA bitmap into an egui ColorImage for texture
/// upload. The rasterizer works in straight alpha, which is what
/// `from_rgba_unmultiplied` expects.
pub fn bitmap_to_color_image(bitmap: &RgbaImage) -> egui::ColorImage {
    let size = [bitmap.width() as usize, bitmap.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, bitmap.as_raw())
}
