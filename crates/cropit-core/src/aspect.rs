// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rect::Size;

/// Width / height constraint applied to the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    #[default]
    Free,
    /// Follow the natural ratio of the loaded image.
    Original,
    Fixed(f64),
}

impl AspectRatio {
    pub const SQUARE: AspectRatio = AspectRatio::Fixed(1.0);

    /// Concrete ratio for an image of `natural` size, `None` when unlocked.
    pub fn resolve(self, natural: Size) -> Option<f64> {
        match self {
            AspectRatio::Free => None,
            AspectRatio::Original => {
                if natural.is_usable() {
                    Some(natural.w / natural.h)
                } else {
                    None
                }
            }
            AspectRatio::Fixed(r) => Some(r),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Free => f.write_str("free"),
            AspectRatio::Original => f.write_str("original"),
            AspectRatio::Fixed(r) => write!(f, "{r}"),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "free" | "none" => return Ok(AspectRatio::Free),
            "original" => return Ok(AspectRatio::Original),
            "square" => return Ok(AspectRatio::SQUARE),
            _ => {}
        }

        let ratio = if let Some((w, h)) = s.split_once(':') {
            let w: f64 = w
                .trim()
                .parse()
                .map_err(|_| format!("invalid aspect width in \"{s}\""))?;
            let h: f64 = h
                .trim()
                .parse()
                .map_err(|_| format!("invalid aspect height in \"{s}\""))?;
            if h == 0.0 {
                return Err(format!("aspect height must not be zero in \"{s}\""));
            }
            w / h
        } else {
            s.parse::<f64>()
                .map_err(|_| format!("expected free|original|square|W:H|number, got \"{s}\""))?
        };

        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(format!("aspect ratio must be positive, got \"{s}\""));
        }

        Ok(AspectRatio::Fixed(ratio))
    }
}
