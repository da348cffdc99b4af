// Author: Dustin Pilgrim
// License: MIT

use cropit_core::geometry::{self, MIN_SIZE};
use cropit_core::{AspectRatio, CropEditor, CropRect, Handle, ImageHandle, Point, Size};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

fn assert_valid(r: &CropRect, bounds: Size) {
    assert!(r.x >= -EPS && r.y >= -EPS, "negative origin: {r:?}");
    assert!(r.right() <= bounds.w + EPS, "past right edge: {r:?} in {bounds:?}");
    assert!(r.bottom() <= bounds.h + EPS, "past bottom edge: {r:?} in {bounds:?}");
    assert!(r.w >= MIN_SIZE - EPS && r.h >= MIN_SIZE - EPS, "below min size: {r:?}");
}

fn handle_strategy() -> impl Strategy<Value = Handle> {
    (0usize..Handle::ALL.len()).prop_map(|i| Handle::ALL[i])
}

fn drags() -> impl Strategy<Value = Vec<(Handle, f64, f64)>> {
    prop::collection::vec(
        (handle_strategy(), -3000.0f64..3000.0, -3000.0f64..3000.0),
        1..24,
    )
}

proptest! {
    #[test]
    fn free_drags_keep_rect_valid(
        dw in 400.0f64..2400.0,
        dh in 400.0f64..2400.0,
        steps in drags(),
    ) {
        let bounds = Size::new(dw, dh);
        let mut rect = geometry::initialize(bounds, None);
        assert_valid(&rect, bounds);
        for (handle, dx, dy) in steps {
            rect = geometry::resize(handle, dx, dy, &rect, bounds, None);
            assert_valid(&rect, bounds);
        }
    }

    #[test]
    fn locked_drags_keep_ratio(
        dw in 400.0f64..2400.0,
        dh in 400.0f64..2400.0,
        ratio in 0.25f64..4.0,
        steps in drags(),
    ) {
        let bounds = Size::new(dw, dh);
        let mut rect = geometry::initialize(bounds, Some(ratio));
        for (handle, dx, dy) in steps {
            rect = geometry::resize(handle, dx, dy, &rect, bounds, Some(ratio));
            assert_valid(&rect, bounds);
            prop_assert!((rect.w / rect.h - ratio).abs() < 1e-9, "ratio drift: {:?}", rect);
        }
    }

    #[test]
    fn zero_delta_is_identity(
        dw in 400.0f64..2400.0,
        dh in 400.0f64..2400.0,
        handle in handle_strategy(),
        lock in prop::option::of(0.25f64..4.0),
    ) {
        let bounds = Size::new(dw, dh);
        let snapshot = geometry::initialize(bounds, lock);
        prop_assert_eq!(geometry::resize(handle, 0.0, 0.0, &snapshot, bounds, lock), snapshot);
    }

    #[test]
    fn larger_drag_never_shrinks(
        a in 0.0f64..2000.0,
        b in 0.0f64..2000.0,
        lock in prop::option::of(0.25f64..4.0),
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let bounds = Size::new(1500.0, 1500.0);
        let snapshot = CropRect::new(100.0, 100.0, 200.0, 200.0);
        for handle in [Handle::Se, Handle::E, Handle::S] {
            let r1 = geometry::resize(handle, small, small, &snapshot, bounds, lock);
            let r2 = geometry::resize(handle, large, large, &snapshot, bounds, lock);
            prop_assert!(r2.w >= r1.w - EPS && r2.h >= r1.h - EPS);
        }
        for handle in [Handle::Nw, Handle::W, Handle::N] {
            let r1 = geometry::resize(handle, -small, -small, &snapshot, bounds, lock);
            let r2 = geometry::resize(handle, -large, -large, &snapshot, bounds, lock);
            prop_assert!(r2.w >= r1.w - EPS && r2.h >= r1.h - EPS);
        }
    }

    #[test]
    fn container_resize_keeps_rect_valid(
        cw in 300.0f64..2000.0,
        ch in 300.0f64..2000.0,
        nw in 300.0f64..2000.0,
        nh in 300.0f64..2000.0,
    ) {
        let img = ImageHandle::fit(1600, 1200, Size::new(cw, ch)).unwrap();
        let mut ed = CropEditor::new(img, AspectRatio::SQUARE);
        ed.resize_container(Size::new(nw, nh)).unwrap();
        let r = ed.rect();
        assert_valid(&r, ed.bounds());
        prop_assert!((r.w / r.h - 1.0).abs() < 1e-9);
    }
}

#[test]
fn initial_rect_for_half_scale_image() {
    let img = ImageHandle::fit(1600, 1200, Size::new(800.0, 600.0)).unwrap();
    assert_eq!(img.scale, 0.5);
    assert_eq!(img.display_size(), Size::new(800.0, 600.0));

    let ed = CropEditor::new(img, AspectRatio::Free);
    let r = ed.rect();
    assert!((r.x - 120.0).abs() < EPS);
    assert!((r.y - 90.0).abs() < EPS);
    assert!((r.w - 560.0).abs() < EPS);
    assert!((r.h - 420.0).abs() < EPS);
}

#[test]
fn se_handle_drag_from_origin() {
    let snapshot = CropRect::new(0.0, 0.0, 200.0, 200.0);
    let r = geometry::resize(Handle::Se, 50.0, 50.0, &snapshot, Size::new(1000.0, 1000.0), None);
    assert_eq!(r, CropRect::new(0.0, 0.0, 250.0, 250.0));
}

#[test]
fn huge_move_pins_to_bottom_right() {
    let bounds = Size::new(1000.0, 700.0);
    for snapshot in [
        CropRect::new(0.0, 0.0, 200.0, 200.0),
        CropRect::new(333.0, 12.0, 41.0, 650.0),
    ] {
        let r = geometry::resize(Handle::Move, 9999.0, 9999.0, &snapshot, bounds, None);
        assert_eq!(r.right(), bounds.w);
        assert_eq!(r.bottom(), bounds.h);
    }
}

#[test]
fn square_east_edge_drag() {
    let snapshot = CropRect::new(0.0, 0.0, 100.0, 100.0);
    let r = geometry::resize(Handle::E, 40.0, 0.0, &snapshot, Size::new(1000.0, 1000.0), Some(1.0));
    assert_eq!((r.w, r.h), (140.0, 140.0));
}

#[test]
fn scripted_pointer_events_drive_editor() {
    let img = ImageHandle::fit(1000, 1000, Size::new(1000.0, 1000.0)).unwrap();
    let mut ed = CropEditor::new(img, AspectRatio::Free);
    let r0 = ed.rect();

    let start = Handle::Se.point_on(&r0);
    assert_eq!(ed.pointer_down(start), Some(Handle::Se));
    ed.pointer_move(Point::new(start.x + 1.0, start.y + 1.0));
    ed.pointer_move(Point::new(start.x + 50.0, start.y + 50.0));
    ed.pointer_up();

    let r = ed.rect();
    assert_eq!((r.x, r.y), (r0.x, r0.y));
    assert!((r.w - (r0.w + 50.0)).abs() < EPS);
}
