//! Window message model.
//!
//! Platform-agnostic representation of the messages pumped through the host's
//! message queue. Only the fields the engine reads or rewrites are modelled;
//! the platform adapter keeps everything else untouched.

use serde::{Deserialize, Serialize};

use crate::geometry::Point16;
use crate::window::WindowId;

/// Raw message codes for the kinds the engine distinguishes.
pub mod raw {
    pub const NULL: u32 = 0x0000;
    pub const PAINT: u32 = 0x000F;
    pub const NC_DESTROY: u32 = 0x0082;
    pub const GESTURE: u32 = 0x0119;
    pub const MOUSE_FIRST: u32 = 0x0200;
    pub const MOUSE_MOVE: u32 = 0x0200;
    pub const LEFT_BUTTON_DOWN: u32 = 0x0201;
    pub const LEFT_BUTTON_UP: u32 = 0x0202;
    pub const MOUSE_WHEEL: u32 = 0x020A;
    pub const MOUSE_LAST: u32 = 0x020E;
}

/// What a message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// No-op marker; the host ignores it.
    Null,
    /// Periodic redraw request.
    Paint,
    /// Pointer moved.
    MouseMove,
    /// Primary button pressed.
    LeftButtonDown,
    /// Primary button released.
    LeftButtonUp,
    /// Vertical wheel rotation.
    MouseWheel,
    /// Any other pointer message (right/middle/extra buttons, double clicks,
    /// horizontal wheel). The value is the raw message code.
    OtherPointer(u32),
    /// Gesture notification.
    Gesture,
    /// Window is being destroyed (final message).
    NcDestroy,
    /// Anything the engine does not care about. The value is the raw code.
    Other(u32),
}

impl MessageKind {
    /// Map a raw platform message code.
    #[must_use]
    pub fn from_raw(code: u32) -> Self {
        match code {
            raw::NULL => Self::Null,
            raw::PAINT => Self::Paint,
            raw::MOUSE_MOVE => Self::MouseMove,
            raw::LEFT_BUTTON_DOWN => Self::LeftButtonDown,
            raw::LEFT_BUTTON_UP => Self::LeftButtonUp,
            raw::MOUSE_WHEEL => Self::MouseWheel,
            raw::GESTURE => Self::Gesture,
            raw::NC_DESTROY => Self::NcDestroy,
            c if (raw::MOUSE_FIRST..=raw::MOUSE_LAST).contains(&c) => Self::OtherPointer(c),
            c => Self::Other(c),
        }
    }

    /// The raw platform message code.
    #[must_use]
    pub fn to_raw(self) -> u32 {
        match self {
            Self::Null => raw::NULL,
            Self::Paint => raw::PAINT,
            Self::MouseMove => raw::MOUSE_MOVE,
            Self::LeftButtonDown => raw::LEFT_BUTTON_DOWN,
            Self::LeftButtonUp => raw::LEFT_BUTTON_UP,
            Self::MouseWheel => raw::MOUSE_WHEEL,
            Self::Gesture => raw::GESTURE,
            Self::NcDestroy => raw::NC_DESTROY,
            Self::OtherPointer(c) | Self::Other(c) => c,
        }
    }

    /// Whether this is a pointer message carrying client coordinates.
    #[must_use]
    pub fn is_pointer(self) -> bool {
        (raw::MOUSE_FIRST..=raw::MOUSE_LAST).contains(&self.to_raw())
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OtherPointer(c) => write!(f, "OtherPointer({c:#06x})"),
            Self::Other(c) => write!(f, "Other({c:#06x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Button and modifier key state carried in the low word of a pointer message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonMask(pub u16);

impl ButtonMask {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(0x0001);
    pub const RIGHT: Self = Self(0x0002);
    pub const SHIFT: Self = Self(0x0004);
    pub const CONTROL: Self = Self(0x0008);
    pub const MIDDLE: Self = Self(0x0010);

    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Auxiliary 32-bit signature the platform attaches to each input message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtraInfo(pub u32);

/// A single message as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMessage {
    /// Target window.
    pub window: WindowId,
    /// Message kind; the engine may rewrite it.
    pub kind: MessageKind,
    /// Button mask (low word of the first parameter).
    #[serde(default)]
    pub buttons: ButtonMask,
    /// Wheel delta (high word of the first parameter, wheel messages only).
    #[serde(default)]
    pub wheel_delta: i16,
    /// Client coordinates (second parameter).
    #[serde(default)]
    pub position: Point16,
    /// Signature reported by the platform for this message.
    #[serde(default)]
    pub extra: ExtraInfo,
}

impl InputMessage {
    /// A message with empty parameters.
    #[must_use]
    pub fn new(window: WindowId, kind: MessageKind) -> Self {
        Self {
            window,
            kind,
            buttons: ButtonMask::NONE,
            wheel_delta: 0,
            position: Point16::default(),
            extra: ExtraInfo::default(),
        }
    }

    #[must_use]
    pub fn at(mut self, position: Point16) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_buttons(mut self, buttons: ButtonMask) -> Self {
        self.buttons = buttons;
        self
    }

    #[must_use]
    pub fn with_wheel_delta(mut self, delta: i16) -> Self {
        self.wheel_delta = delta;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: ExtraInfo) -> Self {
        self.extra = extra;
        self
    }

    /// Replace the message with a no-op marker.
    pub fn suppress(&mut self) {
        self.kind = MessageKind::Null;
    }

    /// The first message parameter: button mask low, wheel delta high.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn first_param(&self) -> u32 {
        u32::from(self.buttons.0) | (u32::from(self.wheel_delta as u16) << 16)
    }

    /// Split a raw first parameter into button mask and wheel delta.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn split_first_param(param: u32) -> (ButtonMask, i16) {
        (ButtonMask(param as u16), (param >> 16) as u16 as i16)
    }
}
