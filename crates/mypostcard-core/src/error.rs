use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostcardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font loading error: {0}")]
    FontLoad(String),

    #[error("Rasterization failed: {0}")]
    Raster(String),

    #[error("An export is already in flight")]
    ExportInFlight,
}

pub type Result<T> = std::result::Result<T, PostcardError>;
