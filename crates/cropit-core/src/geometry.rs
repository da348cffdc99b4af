// Author: Dustin Pilgrim
// License: MIT
//
// Crop rectangle transforms. Everything here is pure: a snapshot goes in,
// a new rectangle comes out. Out-of-range input is clamped, never rejected,
// so a drag can run past the image edge without sticking.

use crate::handle::Handle;
use crate::rect::{CropRect, Size};

/// Smallest side a crop rectangle may have, in display pixels.
pub const MIN_SIZE: f64 = 40.0;

/// Share of the display the initial rectangle covers.
pub const INITIAL_FRACTION: f64 = 0.7;

/// `v` limited to `lo..=hi`. Unlike `f64::clamp` this never panics:
/// when the range is empty the upper bound wins, so bounds beat min size.
fn span(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Smallest side allowed inside `bounds`.
fn min_side(bounds: Size) -> (f64, f64) {
    (MIN_SIZE.min(bounds.w), MIN_SIZE.min(bounds.h))
}

/// Width range for a rectangle locked to `ratio` with `room_w` x `room_h`
/// of free space from its anchor.
fn locked_width_range(ratio: f64, room_w: f64, room_h: f64) -> (f64, f64) {
    let lo = MIN_SIZE.max(MIN_SIZE * ratio);
    let hi = room_w.min(room_h * ratio);
    (lo, hi)
}

/// Centred starting rectangle for a display of size `display`.
///
/// Unlocked, it covers 70% of each axis. Locked, the width is 70% of the
/// shorter display side and the height follows from the ratio.
pub fn initialize(display: Size, aspect: Option<f64>) -> CropRect {
    let (w, h) = match aspect {
        None => {
            let (min_w, min_h) = min_side(display);
            (
                span(display.w * INITIAL_FRACTION, min_w, display.w),
                span(display.h * INITIAL_FRACTION, min_h, display.h),
            )
        }
        Some(ratio) => {
            let (lo, hi) = locked_width_range(ratio, display.w, display.h);
            let w = span(display.min_side() * INITIAL_FRACTION, lo, hi);
            (w, w / ratio)
        }
    };

    CropRect {
        x: (display.w - w) / 2.0,
        y: (display.h - h) / 2.0,
        w,
        h,
    }
}

/// Apply a drag of `handle` by the cumulative pointer delta `(dx, dy)` to the
/// rectangle captured at drag start.
///
/// The corner (or edge) opposite the dragged handle stays put. With a ratio
/// lock, corners and the `e`/`w` edges are driven by `dx`, the `n`/`s` edges
/// by `dy`, and the other side is derived. Edge drags under a lock grow the
/// derived side away from the top-left.
pub fn resize(
    handle: Handle,
    dx: f64,
    dy: f64,
    snapshot: &CropRect,
    bounds: Size,
    aspect: Option<f64>,
) -> CropRect {
    if dx == 0.0 && dy == 0.0 {
        return *snapshot;
    }

    match (handle, aspect) {
        (Handle::Move, _) => translate(dx, dy, snapshot, bounds),
        (_, None) => resize_free(handle, dx, dy, snapshot, bounds),
        (_, Some(ratio)) => resize_locked(handle, dx, dy, snapshot, bounds, ratio),
    }
}

fn translate(dx: f64, dy: f64, s: &CropRect, bounds: Size) -> CropRect {
    CropRect {
        x: span(s.x + dx, 0.0, bounds.w - s.w),
        y: span(s.y + dy, 0.0, bounds.h - s.h),
        w: s.w,
        h: s.h,
    }
}

fn resize_free(handle: Handle, dx: f64, dy: f64, s: &CropRect, bounds: Size) -> CropRect {
    let edges = handle.edges();
    let (min_w, min_h) = min_side(bounds);
    let mut r = *s;

    if edges.right {
        r.w = span(s.w + dx, min_w, bounds.w - s.x);
    }
    if edges.left {
        let right = s.right();
        r.w = span(s.w - dx, min_w, right);
        r.x = right - r.w;
    }
    if edges.bottom {
        r.h = span(s.h + dy, min_h, bounds.h - s.y);
    }
    if edges.top {
        let bottom = s.bottom();
        r.h = span(s.h - dy, min_h, bottom);
        r.y = bottom - r.h;
    }

    r
}

fn resize_locked(
    handle: Handle,
    dx: f64,
    dy: f64,
    s: &CropRect,
    bounds: Size,
    ratio: f64,
) -> CropRect {
    let edges = handle.edges();

    // Free space between the anchored side and the display edge it grows toward.
    let room_w = if edges.left { s.right() } else { bounds.w - s.x };
    let room_h = if edges.top { s.bottom() } else { bounds.h - s.y };

    let (w, h) = if edges.left || edges.right {
        let raw = if edges.left { s.w - dx } else { s.w + dx };
        let (lo, hi) = locked_width_range(ratio, room_w, room_h);
        let w = span(raw, lo, hi);
        (w, w / ratio)
    } else {
        let raw = if edges.top { s.h - dy } else { s.h + dy };
        let lo = MIN_SIZE.max(MIN_SIZE / ratio);
        let hi = room_h.min(room_w / ratio);
        let h = span(raw, lo, hi);
        (h * ratio, h)
    };

    CropRect {
        x: if edges.left { s.right() - w } else { s.x },
        y: if edges.top { s.bottom() - h } else { s.y },
        w,
        h,
    }
}

/// Map a rectangle to a display that was rescaled by `factor`
/// (new scale / old scale), then restore the bounds and min-size rules.
pub fn rescale(rect: &CropRect, factor: f64, bounds: Size, aspect: Option<f64>) -> CropRect {
    let mut r = rect.scaled(factor);

    let (min_w, min_h) = match aspect {
        None => min_side(bounds),
        Some(ratio) => {
            let (lo, hi) = locked_width_range(ratio, bounds.w, bounds.h);
            let w = lo.min(hi);
            (w, w / ratio)
        }
    };

    if r.w < min_w || r.h < min_h {
        let c = r.center();
        r.w = r.w.max(min_w);
        r.h = match aspect {
            Some(ratio) => r.w / ratio,
            None => r.h.max(min_h),
        };
        r.x = c.x - r.w / 2.0;
        r.y = c.y - r.h / 2.0;
    }

    r.clamp_to(bounds);
    r
}
