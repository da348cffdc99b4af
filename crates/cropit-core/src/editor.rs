// Author: Dustin Pilgrim
// License: MIT
//
// Crop editor: the rectangle plus the pointer state driving it.
//
// Pointer moves are always applied to the snapshot taken at pointer-down,
// using the total delta since then, so rounding never accumulates.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::coords::ImageHandle;
use crate::error::Result;
use crate::geometry;
use crate::handle::Handle;
use crate::hit;
use crate::rect::{CropRect, Point, Size};

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub handle: Handle,
    pub origin: Point,
    pub snapshot: CropRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone)]
pub struct CropEditor {
    image: ImageHandle,
    aspect: AspectRatio,
    rect: CropRect,
    pointer: PointerState,
}

impl CropEditor {
    pub fn new(image: ImageHandle, aspect: AspectRatio) -> Self {
        let ratio = aspect.resolve(image.natural_size());
        Self {
            image,
            aspect,
            rect: geometry::initialize(image.display_size(), ratio),
            pointer: PointerState::Idle,
        }
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    /// Locked width / height, `None` when free.
    pub fn ratio(&self) -> Option<f64> {
        self.aspect.resolve(self.image.natural_size())
    }

    pub fn bounds(&self) -> Size {
        self.image.display_size()
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.pointer, PointerState::Dragging(_))
    }

    /// Back to the centred starting rectangle. Drops any drag in progress.
    pub fn reset(&mut self) {
        self.pointer = PointerState::Idle;
        self.rect = geometry::initialize(self.bounds(), self.ratio());
    }

    /// Switch ratio lock. The rectangle restarts from the centre.
    pub fn set_aspect(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
        self.reset();
    }

    /// Pointer pressed at `p`. Starts a drag on whatever handle is under the
    /// pointer. Ignored while another drag is active.
    pub fn pointer_down(&mut self, p: Point) -> Option<Handle> {
        if self.is_dragging() {
            return None;
        }
        let handle = hit::hit_test(&self.rect, p)?;
        self.begin_drag(handle, p).then_some(handle)
    }

    /// Start dragging `handle` with the pointer at `p`.
    /// Returns `false` if a drag is already running.
    pub fn begin_drag(&mut self, handle: Handle, p: Point) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.pointer = PointerState::Dragging(DragSession {
            handle,
            origin: p,
            snapshot: self.rect,
        });
        true
    }

    /// Pointer moved to `p`. Returns `true` when the rectangle was updated;
    /// moves without an active drag (late or duplicate events) are ignored.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let PointerState::Dragging(session) = self.pointer else {
            return false;
        };

        let dx = p.x - session.origin.x;
        let dy = p.y - session.origin.y;
        self.rect = geometry::resize(
            session.handle,
            dx,
            dy,
            &session.snapshot,
            self.bounds(),
            self.ratio(),
        );
        true
    }

    /// Pointer released. Returns the finished session, if any.
    pub fn pointer_up(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.pointer) {
            PointerState::Dragging(session) => Some(session),
            PointerState::Idle => None,
        }
    }

    /// Pointer cancelled (focus loss, touch cancel). Same as releasing:
    /// the rectangle keeps the last applied move.
    pub fn pointer_cancel(&mut self) -> Option<DragSession> {
        self.pointer_up()
    }

    /// The available container changed size. Refit the image and scale the
    /// rectangle by the same factor instead of resetting it.
    pub fn resize_container(&mut self, container: Size) -> Result<f64> {
        let refit = self.image.refit(container)?;
        let factor = refit.scale / self.image.scale;

        self.pointer = PointerState::Idle;
        self.image = refit;
        self.rect = geometry::rescale(&self.rect, factor, self.bounds(), self.ratio());
        Ok(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(aspect: AspectRatio) -> CropEditor {
        let img = ImageHandle::fit(1600, 1200, Size::new(800.0, 600.0)).unwrap();
        CropEditor::new(img, aspect)
    }

    fn drag(ed: &mut CropEditor, handle: Handle, dx: f64, dy: f64) {
        let start = handle.point_on(&ed.rect());
        assert_eq!(ed.pointer_down(start), Some(handle));
        assert!(ed.pointer_move(Point::new(start.x + dx, start.y + dy)));
        assert!(ed.pointer_up().is_some());
    }

    #[test]
    fn starts_centred_and_idle() {
        let ed = editor(AspectRatio::Free);
        assert_eq!(ed.pointer(), PointerState::Idle);
        let r = ed.rect();
        assert!((r.x - 120.0).abs() < 1e-9 && (r.y - 90.0).abs() < 1e-9);
    }

    #[test]
    fn moves_are_relative_to_drag_start() {
        let mut ed = editor(AspectRatio::Free);
        let r0 = ed.rect();
        let start = Handle::Se.point_on(&r0);
        ed.pointer_down(start);

        // Several intermediate moves, then one final position.
        for step in 1..=5 {
            ed.pointer_move(Point::new(start.x + step as f64 * 3.0, start.y));
        }
        ed.pointer_move(Point::new(start.x + 10.0, start.y + 5.0));
        ed.pointer_up();

        let r = ed.rect();
        assert!((r.w - (r0.w + 10.0)).abs() < 1e-9);
        assert!((r.h - (r0.h + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn second_pointer_down_is_ignored() {
        let mut ed = editor(AspectRatio::Free);
        let r = ed.rect();
        assert_eq!(ed.pointer_down(Handle::Se.point_on(&r)), Some(Handle::Se));
        assert_eq!(ed.pointer_down(Handle::Nw.point_on(&r)), None);
        match ed.pointer() {
            PointerState::Dragging(s) => assert_eq!(s.handle, Handle::Se),
            PointerState::Idle => panic!("expected drag"),
        }
    }

    #[test]
    fn late_moves_after_release_are_ignored() {
        let mut ed = editor(AspectRatio::Free);
        drag(&mut ed, Handle::Move, 10.0, 10.0);
        let after = ed.rect();
        assert!(!ed.pointer_move(Point::new(0.0, 0.0)));
        assert_eq!(ed.rect(), after);
        assert!(ed.pointer_up().is_none());
    }

    #[test]
    fn cancel_ends_the_drag() {
        let mut ed = editor(AspectRatio::Free);
        let r = ed.rect();
        ed.pointer_down(r.center());
        assert!(ed.pointer_cancel().is_some());
        assert!(!ed.is_dragging());
    }

    #[test]
    fn press_outside_starts_nothing() {
        let mut ed = editor(AspectRatio::Free);
        assert_eq!(ed.pointer_down(Point::new(2.0, 2.0)), None);
        assert!(!ed.is_dragging());
    }

    #[test]
    fn square_lock_holds_through_drags() {
        let mut ed = editor(AspectRatio::SQUARE);
        drag(&mut ed, Handle::E, 40.0, 0.0);
        drag(&mut ed, Handle::Nw, -25.0, 60.0);
        drag(&mut ed, Handle::S, 0.0, -30.0);
        let r = ed.rect();
        assert!((r.w / r.h - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_initial_rect() {
        let mut ed = editor(AspectRatio::Free);
        let initial = ed.rect();
        drag(&mut ed, Handle::Sw, -50.0, 40.0);
        assert_ne!(ed.rect(), initial);
        ed.reset();
        assert_eq!(ed.rect(), initial);
    }

    #[test]
    fn container_resize_rescales_rect() {
        let mut ed = editor(AspectRatio::Free);
        drag(&mut ed, Handle::Move, -20.0, 0.0);
        let before = ed.rect();

        let factor = ed.resize_container(Size::new(400.0, 300.0)).unwrap();
        assert_eq!(factor, 0.5);
        assert_eq!(ed.bounds(), Size::new(400.0, 300.0));

        let after = ed.rect();
        assert!((after.x - before.x * 0.5).abs() < 1e-9);
        assert!((after.w - before.w * 0.5).abs() < 1e-9);
    }
}
