//! Pointer coordinates and window rectangles.

use serde::{Deserialize, Serialize};

/// A packed 16-bit pointer position, as carried in a message's coordinate field.
///
/// Arithmetic wraps like the platform's own 16-bit coordinate math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point16 {
    pub x: i16,
    pub y: i16,
}

impl Point16 {
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Build a point from full-width coordinates, truncating to 16 bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_i32(x: i32, y: i32) -> Self {
        Self {
            x: x as i16,
            y: y as i16,
        }
    }

    /// Component-wise wrapping difference `self - other`.
    #[must_use]
    pub const fn wrapping_sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }

    /// Pack into the low/high words of a 32-bit parameter (x low, y high).
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn to_packed(self) -> u32 {
        (self.x as u16 as u32) | ((self.y as u16 as u32) << 16)
    }

    /// Unpack from the low/high words of a 32-bit parameter.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            x: packed as u16 as i16,
            y: (packed >> 16) as u16 as i16,
        }
    }
}

impl std::fmt::Display for Point16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A window rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }
}
