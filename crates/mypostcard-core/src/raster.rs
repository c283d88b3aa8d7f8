//! CPU rasterizer for postcard scenes.
//!
//! Renders the display list with the `image` crate for pixel work and
//! `fontdue` for glyph coverage. The same code path serves the preview (1x)
//! and the export bitmap (4x); only the output scale differs.

use fontdue::Font;
use image::{imageops, Rgba, RgbaImage};
use tracing::warn;

use crate::error::{PostcardError, Result};
use crate::export::{RasterizeOptions, Rasterizer};
use crate::filter::FilterSettings;
use crate::fonts::FontLibrary;
use crate::scene::{Color, CropWindow, HAlign, Node, Rect, Scene, TextNode, VAlign};
use crate::state::SourceImage;

pub struct SoftwareRasterizer {
    fonts: FontLibrary,
}

impl SoftwareRasterizer {
    pub fn new(fonts: FontLibrary) -> Self {
        Self { fonts }
    }

    /// Rasterizer backed by the system font database.
    pub fn from_system_fonts() -> Result<Self> {
        Ok(Self::new(FontLibrary::from_system()?))
    }
}

impl Rasterizer for SoftwareRasterizer {
    fn capture(&self, scene: &Scene, options: &RasterizeOptions) -> Result<RgbaImage> {
        let scale = options.output_scale.max(1);
        let width = scene.width * scale;
        let height = scene.height * scale;
        if width == 0 || height == 0 {
            return Err(PostcardError::Raster(format!(
                "degenerate scene size {}x{}",
                scene.width, scene.height
            )));
        }

        let base = options
            .background
            .map(|c| Rgba([c.r, c.g, c.b, c.a]))
            .unwrap_or(Rgba([0, 0, 0, 0]));
        let mut canvas = RgbaImage::from_pixel(width, height, base);

        let scale = scale as f32;
        fill_rect(&mut canvas, scene.bounds(), scene.background, scale);
        for node in &scene.nodes {
            match node {
                Node::Fill { rect, color } => fill_rect(&mut canvas, *rect, *color, scale),
                Node::Photo {
                    rect,
                    source,
                    window,
                    filter,
                } => draw_photo(&mut canvas, *rect, source, *window, filter, scale),
                Node::Text(text) => self.draw_text(&mut canvas, text, scale),
            }
        }
        Ok(canvas)
    }
}

// ----------------------------------------------------------------------
// Fills and photos
// ----------------------------------------------------------------------

fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Color, scale: f32) {
    if color.a == 0 {
        return;
    }
    let x0 = ((rect.x * scale).round().max(0.0)) as u32;
    let y0 = ((rect.y * scale).round().max(0.0)) as u32;
    let x1 = ((rect.right() * scale).round() as u32).min(canvas.width());
    let y1 = ((rect.bottom() * scale).round() as u32).min(canvas.height());

    for y in y0..y1 {
        for x in x0..x1 {
            blend(canvas.get_pixel_mut(x, y), color.r, color.g, color.b, color.a);
        }
    }
}

fn draw_photo(
    canvas: &mut RgbaImage,
    rect: Rect,
    source: &SourceImage,
    window: CropWindow,
    filter: &FilterSettings,
    scale: f32,
) {
    let src = source.pixels();
    let wx = (window.x.round().max(0.0) as u32).min(src.width().saturating_sub(1));
    let wy = (window.y.round().max(0.0) as u32).min(src.height().saturating_sub(1));
    let ww = (window.w.round() as u32).clamp(1, src.width() - wx);
    let wh = (window.h.round() as u32).clamp(1, src.height() - wy);

    let target_w = ((rect.w * scale).round() as u32).max(1);
    let target_h = ((rect.h * scale).round() as u32).max(1);

    let cropped = imageops::crop_imm(src, wx, wy, ww, wh).to_image();
    let mut resized =
        imageops::resize(&cropped, target_w, target_h, imageops::FilterType::Triangle);
    filter.apply(&mut resized);

    let x = (rect.x * scale).round() as i64;
    let y = (rect.y * scale).round() as i64;
    imageops::overlay(canvas, &resized, x, y);
}

// ----------------------------------------------------------------------
// Text
// ----------------------------------------------------------------------

impl SoftwareRasterizer {
    fn draw_text(&self, canvas: &mut RgbaImage, node: &TextNode, scale: f32) {
        let Some(font) = self.fonts.face(node.font, node.bold) else {
            warn!(slot = ?node.font, bold = node.bold, "no font face available, skipping text");
            return;
        };

        if node.rotate_quarter {
            // Render into an unrotated buffer with swapped axes, then give
            // it a quarter turn and composite at the node's position.
            let flat = TextNode {
                rect: Rect::new(0.0, 0.0, node.rect.h, node.rect.w),
                rotate_quarter: false,
                ..node.clone()
            };
            let buf_w = ((flat.rect.w * scale).round() as u32).max(1);
            let buf_h = ((flat.rect.h * scale).round() as u32).max(1);
            let mut buffer = RgbaImage::from_pixel(buf_w, buf_h, Rgba([0, 0, 0, 0]));
            draw_text_block(&mut buffer, font, &flat, scale);
            let rotated = imageops::rotate90(&buffer);
            let x = (node.rect.x * scale).round() as i64;
            let y = (node.rect.y * scale).round() as i64;
            imageops::overlay(canvas, &rotated, x, y);
        } else {
            draw_text_block(canvas, font, node, scale);
        }
    }
}

fn draw_text_block(canvas: &mut RgbaImage, font: &Font, node: &TextNode, scale: f32) {
    let size = node.size * scale;
    let letter_spacing = node.letter_spacing * scale;
    let rect = Rect::new(
        node.rect.x * scale,
        node.rect.y * scale,
        node.rect.w * scale,
        node.rect.h * scale,
    );
    let lines = layout_lines(font, &node.text, size, letter_spacing, rect.w);
    if lines.is_empty() {
        return;
    }

    let line_h = size * node.line_height;
    let (ascent, descent) = match font.horizontal_line_metrics(size) {
        Some(m) => (m.ascent, -m.descent),
        None => (size * 0.8, size * 0.2),
    };
    let total_h = lines.len() as f32 * line_h;
    let top = match node.valign {
        VAlign::Top => rect.y,
        VAlign::Middle => rect.y + (rect.h - total_h) / 2.0,
        VAlign::Bottom => rect.bottom() - total_h,
    };

    for (i, line) in lines.iter().enumerate() {
        let line_top = top + i as f32 * line_h;
        let baseline = line_top + (line_h - (ascent + descent)) / 2.0 + ascent;
        let line_w = measure_line(font, line, size, letter_spacing);
        let start_x = match node.halign {
            HAlign::Left => rect.x,
            HAlign::Center => rect.x + (rect.w - line_w) / 2.0,
            HAlign::Right => rect.right() - line_w,
        };
        draw_line(canvas, font, line, size, letter_spacing, start_x, baseline, node.color);
    }
}

fn draw_line(
    canvas: &mut RgbaImage,
    font: &Font,
    line: &str,
    size: f32,
    letter_spacing: f32,
    start_x: f32,
    baseline: f32,
    color: Color,
) {
    let mut cursor = start_x;
    let baseline = baseline.round() as i32;
    for ch in line.chars() {
        let (metrics, bitmap) = font.rasterize(ch, size);
        let glyph_x = cursor.round() as i32 + metrics.xmin;
        let glyph_y = baseline - (metrics.height as i32 + metrics.ymin);
        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let coverage = bitmap[gy * metrics.width + gx];
                if coverage == 0 {
                    continue;
                }
                let px = glyph_x + gx as i32;
                let py = glyph_y + gy as i32;
                if px < 0 || py < 0 || px >= canvas.width() as i32 || py >= canvas.height() as i32 {
                    continue;
                }
                let alpha = (u16::from(coverage) * u16::from(color.a) / 255) as u8;
                blend(
                    canvas.get_pixel_mut(px as u32, py as u32),
                    color.r,
                    color.g,
                    color.b,
                    alpha,
                );
            }
        }
        cursor += metrics.advance_width + letter_spacing;
    }
}

/// Split on explicit newlines, then greedily wrap words against the box
/// width. A single word wider than the box stays on its own line.
fn layout_lines(
    font: &Font,
    text: &str,
    size: f32,
    letter_spacing: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty()
                && measure_line(font, &candidate, size, letter_spacing) > max_width
            {
                lines.push(current);
                current = word.to_owned();
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    // Drop a single trailing empty line from a trailing newline.
    while lines.last().is_some_and(|l| l.is_empty()) && lines.len() > 1 {
        lines.pop();
    }
    lines
}

fn measure_line(font: &Font, line: &str, size: f32, letter_spacing: f32) -> f32 {
    let mut width = 0.0;
    let mut chars = 0usize;
    for ch in line.chars() {
        width += font.metrics(ch, size).advance_width + letter_spacing;
        chars += 1;
    }
    if chars > 0 {
        width -= letter_spacing;
    }
    width
}

/// Source-over blend of a straight-alpha color into one pixel.
fn blend(dst: &mut Rgba<u8>, r: u8, g: u8, b: u8, a: u8) {
    if a == 0xff {
        *dst = Rgba([r, g, b, 0xff]);
        return;
    }
    let sa = u32::from(a);
    let da = u32::from(dst[3]);
    let out_a = sa + da * (255 - sa) / 255;
    if out_a == 0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for (i, src) in [r, g, b].into_iter().enumerate() {
        let sc = u32::from(src) * sa;
        let dc = u32::from(dst[i]) * da * (255 - sa) / 255;
        dst[i] = ((sc + dc) / out_a) as u8;
    }
    dst[3] = out_a as u8;
}
