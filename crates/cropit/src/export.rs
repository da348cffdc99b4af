// Author: Dustin Pilgrim
// License: MIT
//
// Render/export: map the display-space crop back to natural pixels, copy that
// region 1:1 out of the source, optionally mask it to a circle, encode.

use std::io::Cursor;
use std::path::Path;
use std::sync::Weak;

use cropit_core::{CropError, CropRect, ImageHandle, Result};
use cropit_upload::UploadImage;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};

use crate::config::DEFAULT_JPEG_QUALITY;

#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Mask the output to the circle inscribed in its shorter side.
    pub circle: bool,
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            circle: false,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl ExportedImage {
    pub fn mime(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }

    pub fn to_upload(&self) -> UploadImage {
        UploadImage {
            bytes: self.bytes.clone(),
            file_name: format!("crop.{}", self.extension()),
            mime: self.mime().to_string(),
        }
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        crate::paths::ensure_parent_dir(path)?;
        std::fs::write(path, &self.bytes)
    }
}

/// Natural-pixel region `(x, y, w, h)` for `rect`, rounded and clamped to the
/// image so it is never empty.
pub fn source_region(handle: &ImageHandle, rect: &CropRect) -> (u32, u32, u32, u32) {
    let n = handle.to_natural(rect);
    let iw = handle.natural_w;
    let ih = handle.natural_h;

    let x = (n.sx.round().max(0.0) as u32).min(iw - 1);
    let y = (n.sy.round().max(0.0) as u32).min(ih - 1);
    let w = (n.sw.round().max(1.0) as u32).min(iw - x);
    let h = (n.sh.round().max(1.0) as u32).min(ih - y);

    (x, y, w, h)
}

/// Scale alpha by coverage of the circle centred in `img` whose diameter is
/// the shorter side. The edge is antialiased over one pixel.
pub fn apply_circle_mask(img: &mut RgbaImage) {
    let (w, h) = img.dimensions();
    let r = w.min(h) as f64 / 2.0;
    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;

    for (x, y, px) in img.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        let coverage = (r - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);
        px[3] = (px[3] as f64 * coverage).round() as u8;
    }
}

/// Cut the crop out of `source` at natural resolution.
pub fn render(source: &DynamicImage, handle: &ImageHandle, rect: &CropRect, circle: bool) -> DynamicImage {
    let (x, y, w, h) = source_region(handle, rect);
    let cropped = source.crop_imm(x, y, w, h);

    if circle {
        let mut rgba = cropped.to_rgba8();
        apply_circle_mask(&mut rgba);
        DynamicImage::ImageRgba8(rgba)
    } else {
        cropped
    }
}

/// Circular crops are PNG (alpha survives), everything else JPEG.
pub fn encode(img: &DynamicImage, opts: ExportOptions) -> Result<ExportedImage> {
    let mut bytes = Vec::new();

    let format = if opts.circle {
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| CropError::Encode(e.to_string()))?;
        ImageFormat::Png
    } else {
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
        let encoder = JpegEncoder::new_with_quality(&mut bytes, opts.jpeg_quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| CropError::Encode(e.to_string()))?;
        ImageFormat::Jpeg
    };

    let (width, height) = img.dimensions();
    Ok(ExportedImage {
        bytes,
        width,
        height,
        format,
    })
}

/// Full export. Fails with `SourceUnavailable` if the source has been dropped;
/// nothing is produced in that case.
pub fn export(
    source: &Weak<DynamicImage>,
    handle: &ImageHandle,
    rect: &CropRect,
    opts: ExportOptions,
) -> Result<ExportedImage> {
    let source = source.upgrade().ok_or(CropError::SourceUnavailable)?;
    let img = render(&source, handle, rect, opts.circle);
    encode(&img, opts)
}
