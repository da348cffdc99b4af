// Author: Dustin Pilgrim
// License: MIT

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{UploadClient, Uploader};
pub use error::{Result, UploadError};
pub use protocol::{ErrorPayload, UploadImage, UploadResponse, IMAGE_FIELD};
