//! Button-press deferral scheduler.
//!
//! The host only lets a control be dragged if the pointer hovered over it
//! before the button went down. Touch gives it no chance to, so the
//! synthetic button-down is held back for a few clock ticks after the
//! pointer has moved into place.

use traktouch_types::{ButtonMask, InputMessage, MessageKind};

/// Messages released by an expired deferral, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredClick {
    pub down: InputMessage,
    pub up: Option<InputMessage>,
}

/// At most one withheld button-down and its countdown.
#[derive(Debug, Clone, Default)]
pub struct DeferralScheduler {
    remaining_ticks: u32,
    pending_up: bool,
    saved_down: Option<InputMessage>,
}

impl DeferralScheduler {
    /// Withhold `down` for `ticks` ticks, replacing any unexpired deferral.
    pub fn arm(&mut self, ticks: u32, down: InputMessage) {
        debug_assert!(ticks > 0, "a zero-tick deferral would never fire");
        self.remaining_ticks = ticks.max(1);
        self.pending_up = false;
        self.saved_down = Some(down);
    }

    /// Whether a button-down is being withheld.
    pub fn is_pending(&self) -> bool {
        self.remaining_ticks > 0
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    pub fn has_pending_up(&self) -> bool {
        self.pending_up
    }

    /// Replay a button-up right after the withheld down.
    ///
    /// Returns `false` (and does nothing) when no down is withheld.
    pub fn defer_up(&mut self) -> bool {
        if self.is_pending() {
            self.pending_up = true;
            true
        } else {
            false
        }
    }

    /// Advance the clock by one tick.
    pub fn tick(&mut self) -> Option<DeferredClick> {
        if self.remaining_ticks == 0 {
            return None;
        }
        self.remaining_ticks -= 1;
        if self.remaining_ticks > 0 {
            return None;
        }

        let down = self.saved_down.take()?;
        let up = std::mem::take(&mut self.pending_up).then(|| {
            InputMessage::new(down.window, MessageKind::LeftButtonUp)
                .with_buttons(ButtonMask::NONE)
                .at(down.position)
        });
        Some(DeferredClick { down, up })
    }

    /// Drop leftovers of a deferral that has already fired.
    pub fn cancel_if_expired(&mut self) {
        if self.remaining_ticks == 0 {
            self.pending_up = false;
            self.saved_down = None;
        }
    }

    /// Forget any deferral, fired or not.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use traktouch_types::{Point16, WindowId};

    use super::*;

    fn down_at(x: i16, y: i16) -> InputMessage {
        InputMessage::new(WindowId(1), MessageKind::LeftButtonDown)
            .with_buttons(ButtonMask::LEFT)
            .at(Point16::new(x, y))
    }

    #[test]
    fn fires_exactly_at_zero() {
        let mut scheduler = DeferralScheduler::default();
        scheduler.arm(2, down_at(10, 20));
        assert!(scheduler.is_pending());
        assert_eq!(scheduler.tick(), None);

        let click = scheduler.tick().unwrap();
        assert_eq!(click.down, down_at(10, 20));
        assert_eq!(click.up, None);
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.tick(), None);
    }

    #[test]
    fn deferred_up_follows_down() {
        let mut scheduler = DeferralScheduler::default();
        scheduler.arm(1, down_at(10, 20));
        assert!(scheduler.defer_up());

        let click = scheduler.tick().unwrap();
        let up = click.up.unwrap();
        assert_eq!(up.kind, MessageKind::LeftButtonUp);
        assert_eq!(up.position, Point16::new(10, 20));
        assert!(up.buttons.is_empty());
        assert!(!scheduler.has_pending_up());
    }

    #[test]
    fn defer_up_without_pending_down_is_refused() {
        let mut scheduler = DeferralScheduler::default();
        assert!(!scheduler.defer_up());
        assert!(!scheduler.has_pending_up());
    }

    #[test]
    fn rearm_overwrites_unexpired_deferral() {
        let mut scheduler = DeferralScheduler::default();
        scheduler.arm(3, down_at(1, 1));
        scheduler.defer_up();
        scheduler.tick();
        scheduler.arm(2, down_at(5, 5));
        assert!(!scheduler.has_pending_up());
        assert_eq!(scheduler.remaining_ticks(), 2);

        assert_eq!(scheduler.tick(), None);
        assert_eq!(scheduler.tick().unwrap().down, down_at(5, 5));
    }

    #[test]
    fn cancel_if_expired_keeps_live_deferral() {
        let mut scheduler = DeferralScheduler::default();
        scheduler.arm(2, down_at(1, 1));
        scheduler.cancel_if_expired();
        assert!(scheduler.is_pending());
        scheduler.cancel();
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.tick(), None);
    }
}
