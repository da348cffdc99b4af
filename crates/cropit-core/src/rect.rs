// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn min_side(&self) -> f64 {
        self.w.min(self.h)
    }

    /// `true` when both sides are finite and strictly positive.
    pub fn is_usable(&self) -> bool {
        self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0
    }
}

/// Crop selection in display pixels (top-left corner + size).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    /// Multiply every component by `factor` (used when the display scale changes).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            w: self.w * factor,
            h: self.h * factor,
        }
    }

    /// Keep the size, shift the origin so the rect sits inside `bounds`.
    /// If the rect is larger than `bounds` it is shrunk to fit.
    pub fn clamp_to(&mut self, bounds: Size) {
        self.w = self.w.min(bounds.w).max(0.0);
        self.h = self.h.min(bounds.h).max(0.0);
        self.x = self.x.clamp(0.0, bounds.w - self.w);
        self.y = self.y.clamp(0.0, bounds.h - self.h);
    }
}

/// A region in natural (full resolution) image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NaturalRect {
    pub sx: f64,
    pub sy: f64,
    pub sw: f64,
    pub sh: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_rect_back_inside() {
        let mut r = CropRect::new(950.0, -20.0, 100.0, 100.0);
        r.clamp_to(Size::new(1000.0, 1000.0));
        assert_eq!(r, CropRect::new(900.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn clamp_shrinks_oversized_rect() {
        let mut r = CropRect::new(10.0, 10.0, 500.0, 80.0);
        r.clamp_to(Size::new(300.0, 300.0));
        assert_eq!(r, CropRect::new(0.0, 10.0, 300.0, 80.0));
    }

    #[test]
    fn contains_is_half_open() {
        let r = CropRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
    }
}
