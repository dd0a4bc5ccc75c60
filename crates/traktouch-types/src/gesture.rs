//! Gesture records.

use serde::{Deserialize, Serialize};

use crate::geometry::Point16;

/// Which gesture a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureId {
    /// Gesture sequence start marker.
    Begin,
    /// Gesture sequence end marker.
    End,
    Zoom,
    /// Single-finger pan.
    Pan,
    Rotate,
    TwoFingerTap,
    PressAndTap,
    /// Unrecognised gesture id.
    Other(u32),
}

impl GestureId {
    #[must_use]
    pub fn from_raw(id: u32) -> Self {
        match id {
            1 => Self::Begin,
            2 => Self::End,
            3 => Self::Zoom,
            4 => Self::Pan,
            5 => Self::Rotate,
            6 => Self::TwoFingerTap,
            7 => Self::PressAndTap,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn to_raw(self) -> u32 {
        match self {
            Self::Begin => 1,
            Self::End => 2,
            Self::Zoom => 3,
            Self::Pan => 4,
            Self::Rotate => 5,
            Self::TwoFingerTap => 6,
            Self::PressAndTap => 7,
            Self::Other(id) => id,
        }
    }
}

/// Phase flags of a gesture record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GestureFlags {
    /// First record of this gesture.
    #[serde(default)]
    pub begin: bool,
    /// Inertia phase.
    #[serde(default)]
    pub inertia: bool,
    /// Last record of this gesture.
    #[serde(default)]
    pub end: bool,
}

impl GestureFlags {
    pub const BEGIN_BIT: u32 = 0x1;
    pub const INERTIA_BIT: u32 = 0x2;
    pub const END_BIT: u32 = 0x4;

    #[must_use]
    pub fn from_raw(flags: u32) -> Self {
        Self {
            begin: flags & Self::BEGIN_BIT != 0,
            inertia: flags & Self::INERTIA_BIT != 0,
            end: flags & Self::END_BIT != 0,
        }
    }
}

/// A decoded gesture notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureInfo {
    pub id: GestureId,
    #[serde(default)]
    pub flags: GestureFlags,
    /// Reported location in screen coordinates.
    pub location: Point16,
}

impl GestureInfo {
    /// A pan record at `location`.
    #[must_use]
    pub fn pan(location: Point16, flags: GestureFlags) -> Self {
        Self {
            id: GestureId::Pan,
            flags,
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_ids_map_both_ways() {
        for raw in 1..=9 {
            assert_eq!(GestureId::from_raw(raw).to_raw(), raw);
        }
        assert_eq!(GestureId::from_raw(4), GestureId::Pan);
    }

    #[test]
    fn flags_decode_bits() {
        let flags = GestureFlags::from_raw(GestureFlags::BEGIN_BIT | GestureFlags::END_BIT);
        assert!(flags.begin);
        assert!(flags.end);
        assert!(!flags.inertia);
    }

    #[test]
    fn pan_from_toml() {
        let info: GestureInfo = toml::from_str(
            r#"
id = "Pan"
location = { x = 400, y = 300 }
flags = { begin = true }
"#,
        )
        .unwrap();
        let expected = GestureInfo::pan(
            Point16::new(400, 300),
            GestureFlags {
                begin: true,
                ..GestureFlags::default()
            },
        );
        assert_eq!(info, expected);
    }
}
