use image::RgbaImage;
use rayon::prelude::*;

use crate::consts::{LUMA_B, LUMA_G, LUMA_R, MAX_FILTER_INTENSITY, PARALLEL_PIXEL_THRESHOLD};

/// Named preset combination of visual adjustments applied to the front photo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterKind {
    #[default]
    None,
    Mono,
    Warm,
    Cool,
    Vintage,
    Film,
}

/// All selectable filter kinds, in UI order.
pub const FILTER_KINDS: [FilterKind; 6] = [
    FilterKind::None,
    FilterKind::Mono,
    FilterKind::Warm,
    FilterKind::Cool,
    FilterKind::Vintage,
    FilterKind::Film,
];

impl FilterKind {
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::None => "None",
            FilterKind::Mono => "Mono",
            FilterKind::Warm => "Warm",
            FilterKind::Cool => "Cool",
            FilterKind::Vintage => "Vintage",
            FilterKind::Film => "Film",
        }
    }

    /// Descriptor for this kind at `intensity` percent (0..=100).
    ///
    /// Every adjustment scales linearly with intensity; at 0 every kind
    /// reduces to the identity, and `None` is the identity at any intensity.
    pub fn settings(self, intensity: u8) -> FilterSettings {
        let t = f32::from(intensity.min(MAX_FILTER_INTENSITY)) / 100.0;
        match self {
            FilterKind::None => FilterSettings::IDENTITY,
            FilterKind::Mono => FilterSettings {
                grayscale: t,
                contrast: 1.0 + 0.10 * t,
                ..FilterSettings::IDENTITY
            },
            FilterKind::Warm => FilterSettings {
                sepia: 0.20 * t,
                contrast: 1.0 + 0.05 * t,
                brightness: 1.0 + 0.05 * t,
                saturate: 1.0 + 0.10 * t,
                ..FilterSettings::IDENTITY
            },
            FilterKind::Cool => FilterSettings {
                hue_rotate_deg: 180.0 * t,
                sepia: 0.10 * t,
                ..FilterSettings::IDENTITY
            },
            FilterKind::Vintage => FilterSettings {
                sepia: 0.40 * t,
                contrast: 1.0 - 0.15 * t,
                saturate: 1.0 - 0.30 * t,
                ..FilterSettings::IDENTITY
            },
            FilterKind::Film => FilterSettings {
                contrast: 1.0 + 0.15 * t,
                saturate: 1.0 - 0.20 * t,
                brightness: 1.0 + 0.05 * t,
                ..FilterSettings::IDENTITY
            },
        }
    }
}

/// Composed visual-filter descriptor for the photo layer.
///
/// `grayscale` and `sepia` are mix amounts in [0,1]; `saturate`, `contrast`
/// and `brightness` are multipliers with 1.0 as identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSettings {
    pub grayscale: f32,
    pub sepia: f32,
    pub hue_rotate_deg: f32,
    pub saturate: f32,
    pub contrast: f32,
    pub brightness: f32,
}

impl FilterSettings {
    pub const IDENTITY: Self = Self {
        grayscale: 0.0,
        sepia: 0.0,
        hue_rotate_deg: 0.0,
        saturate: 1.0,
        contrast: 1.0,
        brightness: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Collapse the descriptor into a single affine color transform, applying
    /// the adjustments in fixed order: grayscale, sepia, hue-rotate,
    /// saturate, contrast, brightness.
    pub fn color_matrix(&self) -> ColorMatrix {
        ColorMatrix::IDENTITY
            .then(&grayscale_matrix(self.grayscale))
            .then(&sepia_matrix(self.sepia))
            .then(&hue_rotate_matrix(self.hue_rotate_deg))
            .then(&saturate_matrix(self.saturate))
            .then(&contrast_matrix(self.contrast))
            .then(&brightness_matrix(self.brightness))
    }

    /// Apply the descriptor to RGBA pixels in place. Alpha is untouched and
    /// color channels clamp to [0,255].
    pub fn apply(&self, image: &mut RgbaImage) {
        if self.is_identity() {
            return;
        }
        let matrix = self.color_matrix();
        let row_bytes = image.width() as usize * 4;
        let pixel_count = image.width() as usize * image.height() as usize;
        let samples: &mut [u8] = &mut *image;

        if pixel_count >= PARALLEL_PIXEL_THRESHOLD {
            samples
                .par_chunks_mut(row_bytes)
                .for_each(|row| apply_row(&matrix, row));
        } else {
            for row in samples.chunks_mut(row_bytes) {
                apply_row(&matrix, row);
            }
        }
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn apply_row(matrix: &ColorMatrix, row: &mut [u8]) {
    for px in row.chunks_exact_mut(4) {
        let (r, g, b) = matrix.apply(
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
        );
        px[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
        px[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
        px[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

/// Affine RGB transform: `out = m * in + offset`, channels in [0,1].
#[derive(Clone, Copy, Debug)]
pub struct ColorMatrix {
    m: [[f32; 3]; 3],
    offset: [f32; 3],
}

impl ColorMatrix {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        offset: [0.0; 3],
    };

    /// Compose so that `next` runs after `self`.
    fn then(&self, next: &ColorMatrix) -> ColorMatrix {
        let mut m = [[0.0f32; 3]; 3];
        let mut offset = [0.0f32; 3];
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    m[i][j] += next.m[i][k] * self.m[k][j];
                }
            }
            for k in 0..3 {
                offset[i] += next.m[i][k] * self.offset[k];
            }
            offset[i] += next.offset[i];
        }
        ColorMatrix { m, offset }
    }

    pub fn apply(&self, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
        (
            self.m[0][0] * r + self.m[0][1] * g + self.m[0][2] * b + self.offset[0],
            self.m[1][0] * r + self.m[1][1] * g + self.m[1][2] * b + self.offset[1],
            self.m[2][0] * r + self.m[2][1] * g + self.m[2][2] * b + self.offset[2],
        )
    }
}

/// Linear mix of the identity and a fully desaturating luminance matrix.
fn grayscale_matrix(amount: f32) -> ColorMatrix {
    let a = amount.clamp(0.0, 1.0);
    let inv = 1.0 - a;
    ColorMatrix {
        m: [
            [inv + a * LUMA_R, a * LUMA_G, a * LUMA_B],
            [a * LUMA_R, inv + a * LUMA_G, a * LUMA_B],
            [a * LUMA_R, a * LUMA_G, inv + a * LUMA_B],
        ],
        offset: [0.0; 3],
    }
}

/// Linear mix of the identity and the standard sepia matrix.
fn sepia_matrix(amount: f32) -> ColorMatrix {
    let a = amount.clamp(0.0, 1.0);
    let inv = 1.0 - a;
    ColorMatrix {
        m: [
            [inv + a * 0.393, a * 0.769, a * 0.189],
            [a * 0.349, inv + a * 0.686, a * 0.168],
            [a * 0.272, a * 0.534, inv + a * 0.131],
        ],
        offset: [0.0; 3],
    }
}

fn saturate_matrix(s: f32) -> ColorMatrix {
    let inv = 1.0 - s;
    ColorMatrix {
        m: [
            [s + inv * LUMA_R, inv * LUMA_G, inv * LUMA_B],
            [inv * LUMA_R, s + inv * LUMA_G, inv * LUMA_B],
            [inv * LUMA_R, inv * LUMA_G, s + inv * LUMA_B],
        ],
        offset: [0.0; 3],
    }
}

/// Hue rotation matrix per the W3C filter-effects specification.
fn hue_rotate_matrix(degrees: f32) -> ColorMatrix {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    ColorMatrix {
        m: [
            [
                LUMA_R + cos * (1.0 - LUMA_R) - sin * LUMA_R,
                LUMA_G - cos * LUMA_G - sin * LUMA_G,
                LUMA_B - cos * LUMA_B + sin * (1.0 - LUMA_B),
            ],
            [
                LUMA_R - cos * LUMA_R + sin * 0.143,
                LUMA_G + cos * (1.0 - LUMA_G) + sin * 0.140,
                LUMA_B - cos * LUMA_B - sin * 0.283,
            ],
            [
                LUMA_R - cos * LUMA_R - sin * (1.0 - LUMA_R),
                LUMA_G - cos * LUMA_G + sin * LUMA_G,
                LUMA_B + cos * (1.0 - LUMA_B) + sin * LUMA_B,
            ],
        ],
        offset: [0.0; 3],
    }
}

/// Contrast pivots around mid-gray: slope `c`, intercept `0.5 - 0.5c`.
fn contrast_matrix(c: f32) -> ColorMatrix {
    ColorMatrix {
        m: [[c, 0.0, 0.0], [0.0, c, 0.0], [0.0, 0.0, c]],
        offset: [0.5 - 0.5 * c; 3],
    }
}

fn brightness_matrix(b: f32) -> ColorMatrix {
    ColorMatrix {
        m: [[b, 0.0, 0.0], [0.0, b, 0.0], [0.0, 0.0, b]],
        offset: [0.0; 3],
    }
}
