//! Touch classifier.
//!
//! The platform's touch-to-mouse promotion layer stamps every pointer message
//! it synthesizes with a signature in the message's extra info. The upper 24
//! bits identify pen/touch promotion; bit 7 tells touch from pen.

use traktouch_types::ExtraInfo;

/// Bits of the extra info that carry the promotion signature.
pub const SIGNATURE_MASK: u32 = 0xFFFF_FF00;
/// Signature of pen- or touch-promoted pointer messages.
pub const PROMOTED_SIGNATURE: u32 = 0xFF51_5700;
/// Set for touch, clear for pen.
const TOUCH_BIT: u32 = 0x80;

/// Where a pointer message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOrigin {
    Mouse,
    Pen,
    Touch,
}

/// Classify a message by its extra info.
pub fn classify(extra: ExtraInfo) -> PointerOrigin {
    if extra.0 & SIGNATURE_MASK != PROMOTED_SIGNATURE {
        PointerOrigin::Mouse
    } else if extra.0 & TOUCH_BIT != 0 {
        PointerOrigin::Touch
    } else {
        PointerOrigin::Pen
    }
}

/// Whether a message was synthesized from a digitizer contact (touch or pen).
pub fn is_touch_originated(extra: ExtraInfo) -> bool {
    extra.0 & SIGNATURE_MASK == PROMOTED_SIGNATURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mouse_is_not_touch() {
        assert!(!is_touch_originated(ExtraInfo(0)));
        assert_eq!(classify(ExtraInfo(0)), PointerOrigin::Mouse);
    }

    #[test]
    fn low_byte_is_ignored() {
        assert!(is_touch_originated(ExtraInfo(0xFF51_5700)));
        assert!(is_touch_originated(ExtraInfo(0xFF51_57FF)));
    }

    #[test]
    fn near_miss_signature_is_mouse() {
        assert!(!is_touch_originated(ExtraInfo(0xFF51_5600)));
        assert!(!is_touch_originated(ExtraInfo(0x0051_5780)));
    }

    #[test]
    fn touch_and_pen_are_distinguished() {
        assert_eq!(classify(ExtraInfo(0xFF51_5780)), PointerOrigin::Touch);
        assert_eq!(classify(ExtraInfo(0xFF51_5701)), PointerOrigin::Pen);
    }
}
