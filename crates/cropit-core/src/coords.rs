// Author: Dustin Pilgrim
// License: MIT
//
// Mapping between natural image pixels and display pixels.

use serde::{Deserialize, Serialize};

use crate::error::{CropError, Result};
use crate::rect::{CropRect, NaturalRect, Size};

/// The loaded source image as seen by the crop tool.
///
/// `scale` is display / natural and never exceeds 1, so small images are
/// shown at their real size instead of being blown up to fill the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageHandle {
    pub natural_w: u32,
    pub natural_h: u32,
    pub scale: f64,
}

impl ImageHandle {
    /// Fit a `natural_w` x `natural_h` image into `container`.
    pub fn fit(natural_w: u32, natural_h: u32, container: Size) -> Result<Self> {
        if natural_w == 0 || natural_h == 0 {
            return Err(CropError::ImageLoad(format!(
                "image has no pixels ({natural_w}x{natural_h})"
            )));
        }
        if !container.is_usable() {
            return Err(CropError::EmptyContainer {
                width: container.w,
                height: container.h,
            });
        }

        let scale = (container.w / natural_w as f64)
            .min(container.h / natural_h as f64)
            .min(1.0);

        Ok(Self {
            natural_w,
            natural_h,
            scale,
        })
    }

    /// Same image, new container. Returns the refitted handle.
    pub fn refit(&self, container: Size) -> Result<Self> {
        Self::fit(self.natural_w, self.natural_h, container)
    }

    pub fn natural_size(&self) -> Size {
        Size::new(self.natural_w as f64, self.natural_h as f64)
    }

    pub fn display_size(&self) -> Size {
        Size::new(
            self.natural_w as f64 * self.scale,
            self.natural_h as f64 * self.scale,
        )
    }

    /// Inverse transform: display-space crop to natural-space source region.
    pub fn to_natural(&self, rect: &CropRect) -> NaturalRect {
        NaturalRect {
            sx: rect.x / self.scale,
            sy: rect.y / self.scale,
            sw: rect.w / self.scale,
            sh: rect.h / self.scale,
        }
    }
}
