// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CropError>;

#[derive(Debug, Error)]
pub enum CropError {
    #[error("not an image file: {}", path.display())]
    InvalidFileType { path: PathBuf },

    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("source image is no longer available")]
    SourceUnavailable,

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("failed to encode cropped image: {0}")]
    Encode(String),

    #[error("container has no usable area ({width}x{height})")]
    EmptyContainer { width: f64, height: f64 },
}
