// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rect::{CropRect, Point};

/// A drag point on the crop rectangle. `Move` is the rectangle body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Move,
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

/// Which sides of the rectangle a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Handle {
    pub const ALL: [Handle; 9] = [
        Handle::Move,
        Handle::N,
        Handle::S,
        Handle::E,
        Handle::W,
        Handle::Ne,
        Handle::Nw,
        Handle::Se,
        Handle::Sw,
    ];

    pub fn edges(self) -> Edges {
        let (left, right, top, bottom) = match self {
            Handle::Move => (false, false, false, false),
            Handle::N => (false, false, true, false),
            Handle::S => (false, false, false, true),
            Handle::E => (false, true, false, false),
            Handle::W => (true, false, false, false),
            Handle::Ne => (false, true, true, false),
            Handle::Nw => (true, false, true, false),
            Handle::Se => (false, true, false, true),
            Handle::Sw => (true, false, false, true),
        };
        Edges {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Where this handle is drawn for `rect`: corners sit on the corners,
    /// edges on the edge midpoints, `Move` on the centre.
    pub fn point_on(self, rect: &CropRect) -> Point {
        let e = self.edges();
        let x = if e.left {
            rect.x
        } else if e.right {
            rect.right()
        } else {
            rect.x + rect.w / 2.0
        };
        let y = if e.top {
            rect.y
        } else if e.bottom {
            rect.bottom()
        } else {
            rect.y + rect.h / 2.0
        };
        Point::new(x, y)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handle::Move => "move",
            Handle::N => "n",
            Handle::S => "s",
            Handle::E => "e",
            Handle::W => "w",
            Handle::Ne => "ne",
            Handle::Nw => "nw",
            Handle::Se => "se",
            Handle::Sw => "sw",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Handle::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| format!("unknown handle \"{s}\" (expected move|n|s|e|w|ne|nw|se|sw)"))
    }
}
