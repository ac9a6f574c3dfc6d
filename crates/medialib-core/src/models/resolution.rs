use serde::{Deserialize, Serialize};

use super::aspect_ratio::AspectRatio;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square resolution, used for SVG files that declare no size.
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        AspectRatio::from_width_and_height(self.width, self.height)
    }

    /// Pair both optional columns of a stored row; a half-present pair is treated
    /// as unknown.
    pub fn from_columns(width: Option<u32>, height: Option<u32>) -> Option<Self> {
        match (width, height) {
            (Some(width), Some(height)) => Some(Self::new(width, height)),
            _ => None,
        }
    }
}

impl From<(u32, u32)> for Resolution {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}
