// Author: Dustin Pilgrim
// License: MIT

pub mod aspect;
pub mod coords;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod hit;
pub mod rect;

pub use aspect::AspectRatio;
pub use coords::ImageHandle;
pub use editor::{CropEditor, DragSession, PointerState};
pub use error::{CropError, Result};
pub use handle::Handle;
pub use rect::{CropRect, NaturalRect, Point, Size};
