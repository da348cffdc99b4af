// Author: Dustin Pilgrim
// License: MIT

use cropit_core::{AspectRatio, CropRect, ImageHandle, Size};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Layout {
    pub image: ImageHandle,
    pub display: Size,
    pub aspect: AspectRatio,
    pub crop: CropRect,
}

pub fn print_layout_json(layout: &Layout) -> Result<(), String> {
    let json = serde_json::to_string_pretty(layout).map_err(|e| format!("encode layout: {e}"))?;
    println!("{json}");
    Ok(())
}

pub fn print_layout(image: &ImageHandle, rect: &CropRect) {
    let d = image.display_size();
    println!("natural: {}x{}", image.natural_w, image.natural_h);
    println!("scale: {:.4}", image.scale);
    println!("display: {:.1}x{:.1}", d.w, d.h);
    print_rect("crop", rect);
}

pub fn print_rect(label: &str, r: &CropRect) {
    println!("{label}: x={:.1} y={:.1} w={:.1} h={:.1}", r.x, r.y, r.w, r.h);
}
