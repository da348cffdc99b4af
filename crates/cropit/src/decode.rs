// Author: Dustin Pilgrim
// License: MIT
//
// Background image decoding. Each file selection is tagged with a token;
// results come back over a channel in whatever order the threads finish,
// and the session decides which one still matters.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use cropit_core::{CropError, Result};
use image::{DynamicImage, ImageFormat};

pub type SelectionToken = u64;

#[derive(Debug)]
pub struct Decoded {
    pub token: SelectionToken,
    pub result: Result<DynamicImage>,
}

/// Reject anything that does not look like an image before any work starts.
pub fn check_image_path(path: &Path) -> Result<ImageFormat> {
    ImageFormat::from_path(path).map_err(|_| CropError::InvalidFileType {
        path: path.to_path_buf(),
    })
}

pub fn decode_file(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| CropError::ImageLoad(format!("read {}: {e}", path.display())))?;

    image::load_from_memory(&bytes).map_err(|e| CropError::ImageLoad(e.to_string()))
}

pub struct Decoder {
    tx: Sender<Decoded>,
    rx: Receiver<Decoded>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Decode `path` on a worker thread; the result is delivered tagged with `token`.
    pub fn spawn(&self, token: SelectionToken, path: PathBuf) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = decode_file(&path);
            // Receiver gone means the session was dropped; nothing to report to.
            let _ = tx.send(Decoded { token, result });
        });
    }

    /// Block until the next result arrives.
    pub fn recv(&self) -> Option<Decoded> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_image_extension_is_rejected() {
        let err = check_image_path(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, CropError::InvalidFileType { .. }));
        assert_eq!(check_image_path(Path::new("a.JPG")).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(decode_file(&path), Err(CropError::ImageLoad(_))));
    }

    #[test]
    fn worker_delivers_tagged_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbImage::new(3, 2).save(&path).unwrap();

        let decoder = Decoder::new();
        decoder.spawn(7, path);
        let decoded = decoder.recv().unwrap();
        assert_eq!(decoded.token, 7);
        let img = decoded.result.unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
    }
}
