use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// The uploaded bytes could not be decoded into a raster image.
    ///
    /// The display text is part of the service contract; clients match on
    /// the literal string.
    #[error("Failed to load image")]
    ImageLoad(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
