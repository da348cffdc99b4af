// Author: Dustin Pilgrim
// License: MIT

use crate::handle::Handle;
use crate::rect::{CropRect, Point};

/// Drawn handle size in display pixels.
pub const HANDLE_SIZE: f64 = 12.0;
/// Grab radius around a handle.
pub const HANDLE_HIT: f64 = 14.0;

fn dist2(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

fn corner_hit(r: &CropRect, p: Point) -> Option<Handle> {
    // Circular grab zones so corners feel round.
    let rad = HANDLE_HIT.max(HANDLE_SIZE / 2.0);
    let rad2 = rad * rad;

    [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se]
        .into_iter()
        .map(|h| (dist2(p, h.point_on(r)), h))
        .filter(|(d, _)| *d <= rad2)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, h)| h)
}

fn edge_hit(r: &CropRect, p: Point) -> Option<Handle> {
    let within_x = p.x >= r.x - HANDLE_HIT && p.x <= r.right() + HANDLE_HIT;
    let within_y = p.y >= r.y - HANDLE_HIT && p.y <= r.bottom() + HANDLE_HIT;

    let candidates = [
        (Handle::W, (p.x - r.x).abs(), within_y),
        (Handle::E, (p.x - r.right()).abs(), within_y),
        (Handle::N, (p.y - r.y).abs(), within_x),
        (Handle::S, (p.y - r.bottom()).abs(), within_x),
    ];

    candidates
        .into_iter()
        .filter(|(_, d, within)| *within && *d <= HANDLE_HIT)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _, _)| h)
}

/// Which handle a pointer-down at `p` grabs, if any.
///
/// Corners win over edges, edges over the body. Outside the rectangle and
/// its grab zones nothing is grabbed.
pub fn hit_test(rect: &CropRect, p: Point) -> Option<Handle> {
    if let Some(h) = corner_hit(rect, p) {
        return Some(h);
    }
    if let Some(h) = edge_hit(rect, p) {
        return Some(h);
    }
    if rect.contains(p) {
        return Some(Handle::Move);
    }
    None
}
