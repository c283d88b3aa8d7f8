/// Landscape canvas size in logical pixels.
pub const LANDSCAPE_SIZE: (u32, u32) = (600, 400);

/// Portrait canvas size in logical pixels.
pub const PORTRAIT_SIZE: (u32, u32) = (400, 600);

/// Fixed padding subtracted from each viewport axis before fit scaling.
pub const VIEWPORT_PADDING: f32 = 64.0;

/// Bitmap upscale relative to the logical canvas size at export time.
pub const EXPORT_SCALE: u32 = 4;

/// Lower bound of the front-photo zoom range.
pub const MIN_ZOOM: f32 = 1.0;

/// Upper bound of the front-photo zoom range.
pub const MAX_ZOOM: f32 = 3.0;

/// Upper bound of the filter intensity range, in percent.
pub const MAX_FILTER_INTENSITY: u8 = 100;

/// ITU-R BT.709 luminance coefficient for the red channel.
pub const LUMA_R: f32 = 0.2126;

/// ITU-R BT.709 luminance coefficient for the green channel.
pub const LUMA_G: f32 = 0.7152;

/// ITU-R BT.709 luminance coefficient for the blue channel.
pub const LUMA_B: f32 = 0.0722;

/// Minimum pixel count (w*h) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;
