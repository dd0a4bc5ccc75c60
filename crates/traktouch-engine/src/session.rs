//! Touch session: touching flag, initial-jerk latch and correction offset.

use traktouch_types::Point16;

use crate::state::TouchPhase;

/// State of the current single-finger touch.
///
/// `correction` is only meaningful while touching. Right after touch-down
/// it holds the raw down position as a provisional origin until the first
/// pointer event or a cursor reposition call finalizes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchSession {
    touching: bool,
    initial_jerk_pending: bool,
    correction: Point16,
}

impl TouchSession {
    pub fn phase(&self) -> TouchPhase {
        match (self.touching, self.initial_jerk_pending) {
            (false, _) => TouchPhase::Idle,
            (true, true) => TouchPhase::PendingCorrection,
            (true, false) => TouchPhase::Corrected,
        }
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// The finalized correction offset, once there is one.
    pub fn correction(&self) -> Option<Point16> {
        (self.phase() == TouchPhase::Corrected).then_some(self.correction)
    }

    /// Start a session at the raw touch-down position.
    pub fn begin(&mut self, down_at: Point16) {
        self.touching = true;
        self.initial_jerk_pending = true;
        self.correction = down_at;
    }

    /// The host asked for the pointer at `requested` while it really is at
    /// `pointer`: remember the difference instead of moving it.
    pub fn redirect(&mut self, pointer: (i32, i32), requested: (i32, i32)) {
        self.correction = Point16::from_i32(
            pointer.0.wrapping_sub(requested.0),
            pointer.1.wrapping_sub(requested.1),
        );
        self.initial_jerk_pending = false;
    }

    /// Correct a touch-derived pointer position.
    ///
    /// The first call after [`TouchSession::begin`] (unless a redirect came
    /// first) turns the jump from the down position into the offset, so that
    /// position maps back onto the down position.
    pub fn correct(&mut self, position: Point16) -> Point16 {
        if self.initial_jerk_pending {
            self.correction = position.wrapping_sub(self.correction);
            self.initial_jerk_pending = false;
        }
        position.wrapping_sub(self.correction)
    }

    /// The finger left the screen.
    pub fn end(&mut self) {
        self.touching = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let session = TouchSession::default();
        assert_eq!(session.phase(), TouchPhase::Idle);
        assert_eq!(session.correction(), None);
    }

    #[test]
    fn first_move_maps_back_to_down_position() {
        let mut session = TouchSession::default();
        session.begin(Point16::new(100, 200));
        assert_eq!(session.phase(), TouchPhase::PendingCorrection);

        let first = session.correct(Point16::new(120, 190));
        assert_eq!(first, Point16::new(100, 200));
        assert_eq!(session.correction(), Some(Point16::new(20, -10)));

        let later = session.correct(Point16::new(130, 180));
        assert_eq!(later, Point16::new(110, 190));
    }

    #[test]
    fn redirect_finalizes_offset() {
        let mut session = TouchSession::default();
        session.begin(Point16::new(100, 200));
        session.redirect((500, 400), (450, 420));
        assert_eq!(session.phase(), TouchPhase::Corrected);
        assert_eq!(session.correction(), Some(Point16::new(50, -20)));
        assert_eq!(session.correct(Point16::new(500, 400)), Point16::new(450, 420));
    }

    #[test]
    fn later_redirect_overwrites_first_move_offset() {
        let mut session = TouchSession::default();
        session.begin(Point16::new(0, 0));
        session.correct(Point16::new(10, 10));
        session.redirect((300, 300), (200, 250));
        assert_eq!(session.correction(), Some(Point16::new(100, 50)));
    }

    #[test]
    fn end_returns_to_idle() {
        let mut session = TouchSession::default();
        session.begin(Point16::new(1, 1));
        session.end();
        assert_eq!(session.phase(), TouchPhase::Idle);
        assert!(!session.is_touching());
    }

    #[test]
    fn begin_resets_stale_offset() {
        let mut session = TouchSession::default();
        session.begin(Point16::new(0, 0));
        session.redirect((90, 90), (0, 0));
        session.end();

        session.begin(Point16::new(40, 40));
        assert_eq!(session.phase(), TouchPhase::PendingCorrection);
        assert_eq!(session.correct(Point16::new(60, 40)), Point16::new(40, 40));
    }
}
