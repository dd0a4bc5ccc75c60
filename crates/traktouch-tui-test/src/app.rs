//! Application state for the TUI test harness.

use std::collections::VecDeque;
use std::time::Duration;

use traktouch_engine::{Config, Engine, EngineStatus, GestureOutcome, WindowMatcher};
use traktouch_platform::mock::{MockCursor, MockCursorHandle, MockHost, MockHostHandle};
use traktouch_types::{
    ButtonMask, ExtraInfo, GestureFlags, GestureInfo, InputMessage, MessageKind, Point16, Rect,
    WindowId,
};

/// Maximum number of log lines to keep.
const MAX_LOG_LINES: usize = 100;

pub const HOST: WindowId = WindowId(0x0001_0042);
pub const SCREEN_W: i32 = 1280;
pub const SCREEN_H: i32 = 800;

/// Signature of touch-promoted pointer messages.
const TOUCH: ExtraInfo = ExtraInfo(0xFF51_5780);

/// Application state shared between the event loop and rendering.
pub struct AppState {
    pub engine: Engine,
    cursor: MockCursorHandle,
    host: MockHostHandle,
    /// Where the simulated finger (or mouse) is.
    pub finger: Point16,
    pub finger_down: bool,
    /// Last pointer position the host saw.
    pub seen: Point16,
    pub pan_y: Option<i16>,
    pub auto_tick: bool,
    pub log_lines: VecDeque<String>,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cursor = MockCursor::new();
        let host = MockHost::new().with_window(HOST, "Traktor", Rect::new(0, 0, SCREEN_W, SCREEN_H));
        let cursor_handle = cursor.handle();
        let host_handle = host.handle();
        let title = config.host.window_title.clone();

        let mut app = Self {
            engine: Engine::new(config, Box::new(cursor), Box::new(host)),
            cursor: cursor_handle,
            host: host_handle,
            finger: Point16::new(640, 400),
            finger_down: false,
            seen: Point16::new(640, 400),
            pan_y: None,
            auto_tick: false,
            log_lines: VecDeque::new(),
            quit: false,
        };
        if let Err(e) = app.engine.initialize(WindowMatcher::title(title)) {
            app.log(format!("initialize failed: {e}"));
        }
        app.cursor.set_position(640, 400);
        // The first message for the window resolves it.
        app.deliver(InputMessage::new(HOST, MessageKind::Other(0x0113)));
        app
    }

    pub fn log(&mut self, msg: String) {
        self.log_lines.push_back(msg);
        if self.log_lines.len() > MAX_LOG_LINES {
            self.log_lines.pop_front();
        }
    }

    pub fn status(&self) -> EngineStatus {
        self.engine.status()
    }

    /// Pass a message through the engine as the host's pump would.
    fn deliver(&mut self, before: InputMessage) {
        let mut after = before;
        self.engine.process(&mut after);

        if after.kind.is_pointer() {
            self.seen = after.position;
        }
        if after == before {
            if before.kind != MessageKind::Paint {
                self.log(format!("host <- {} @ {}", after.kind, after.position));
            }
        } else {
            self.log(format!(
                "host <- {} @ {}  (was {} @ {})",
                after.kind, after.position, before.kind, before.position
            ));
        }
    }

    /// Deliver whatever the engine posted to the host's queue.
    pub fn pump_posted(&mut self) {
        for msg in self.host.take_posted() {
            self.log(format!("posted  {} @ {}", msg.kind, msg.position));
            self.deliver(msg);
        }
    }

    fn pointer_message(&self, kind: MessageKind, buttons: ButtonMask) -> InputMessage {
        let msg = InputMessage::new(HOST, kind)
            .with_buttons(buttons)
            .at(self.finger);
        if self.finger_down {
            msg.with_extra(TOUCH)
        } else {
            msg
        }
    }

    /// Move the finger (touching) or the mouse (not touching).
    pub fn move_by(&mut self, dx: i16, dy: i16) {
        self.finger = Point16::new(
            self.finger.x.saturating_add(dx).clamp(0, 1279),
            self.finger.y.saturating_add(dy).clamp(0, 799),
        );
        self.cursor
            .set_position(i32::from(self.finger.x), i32::from(self.finger.y));
        let buttons = if self.finger_down {
            ButtonMask::LEFT
        } else {
            ButtonMask::NONE
        };
        self.deliver(self.pointer_message(MessageKind::MouseMove, buttons));
        self.pump_posted();
    }

    /// Put the finger on the screen, or lift it.
    pub fn toggle_finger(&mut self) {
        if self.finger_down {
            self.deliver(self.pointer_message(MessageKind::LeftButtonUp, ButtonMask::NONE));
            self.finger_down = false;
        } else {
            self.finger_down = true;
            self.deliver(self.pointer_message(MessageKind::LeftButtonDown, ButtonMask::LEFT));
        }
        self.pump_posted();
    }

    /// A plain mouse click at the current position.
    pub fn mouse_click(&mut self) {
        if self.finger_down {
            self.log("lift the finger first".to_string());
            return;
        }
        self.deliver(self.pointer_message(MessageKind::LeftButtonDown, ButtonMask::LEFT));
        self.deliver(self.pointer_message(MessageKind::LeftButtonUp, ButtonMask::NONE));
    }

    /// The host warps the cursor back to where it last saw it, like a knob
    /// being dragged does.
    pub fn host_reposition(&mut self) {
        let (x, y) = (i32::from(self.seen.x), i32::from(self.seen.y));
        let result = self.engine.set_cursor_pos(x, y);
        let pointer = self.cursor.position();
        self.log(format!("SetCursorPos({x}, {y}) -> {result}, pointer at {pointer:?}"));
        if !self.finger_down {
            self.finger = Point16::from_i32(pointer.0, pointer.1);
        }
    }

    /// One redraw of the host window.
    pub fn paint(&mut self) {
        self.deliver(InputMessage::new(HOST, MessageKind::Paint));
        self.pump_posted();
    }

    pub fn pan_begin(&mut self) {
        let y = self.finger.y;
        let flags = GestureFlags::from_raw(GestureFlags::BEGIN_BIT);
        self.gesture(GestureInfo::pan(Point16::new(self.finger.x, y), flags));
        self.pan_y = Some(y);
    }

    pub fn pan_by(&mut self, dy: i16) {
        let Some(y) = self.pan_y else {
            self.log("no pan in progress".to_string());
            return;
        };
        let y = y.saturating_add(dy);
        self.pan_y = Some(y);
        self.gesture(GestureInfo::pan(
            Point16::new(self.finger.x, y),
            GestureFlags::default(),
        ));
    }

    pub fn pan_end(&mut self) {
        let Some(y) = self.pan_y.take() else {
            return;
        };
        let flags = GestureFlags::from_raw(GestureFlags::END_BIT);
        self.gesture(GestureInfo::pan(Point16::new(self.finger.x, y), flags));
    }

    fn gesture(&mut self, gesture: GestureInfo) {
        match self.engine.handle_gesture(HOST, &gesture) {
            GestureOutcome::Wheel(m) => {
                self.log(format!("wheel   {} @ {}", m.wheel_delta, m.position));
            }
            GestureOutcome::Consumed => self.log(format!("pan y={} consumed", gesture.location.y)),
            GestureOutcome::Default => self.log("pan left to host".to_string()),
        }
    }

    pub fn teardown(&mut self) {
        self.engine.teardown();
        self.log(format!("teardown -> {}", self.engine.lifecycle()));
    }

    /// Called once per loop iteration.
    pub fn on_tick(&mut self) {
        if self.auto_tick {
            self.paint();
        }
    }

    /// Tick interval for the TUI refresh.
    pub fn tick_rate() -> Duration {
        Duration::from_millis(100)
    }
}

#[cfg(test)]
mod tests {
    use traktouch_engine::{Lifecycle, TouchPhase};

    use super::*;

    #[test]
    fn starts_attached() {
        let app = AppState::new(Config::default());
        assert_eq!(app.status().lifecycle, Lifecycle::Active(HOST));
    }

    #[test]
    fn drag_keeps_host_pointer_at_touch_down() {
        let mut app = AppState::new(Config::default());
        app.toggle_finger();
        app.move_by(20, 0);
        assert_eq!(app.seen, Point16::new(640, 400));
        assert_eq!(app.status().phase, TouchPhase::Corrected);
        app.move_by(20, 0);
        assert_eq!(app.seen, Point16::new(660, 400));
    }

    #[test]
    fn tap_then_paints_delivers_click() {
        let mut app = AppState::new(Config::default());
        app.toggle_finger();
        app.toggle_finger();
        assert!(app.status().pending_up);
        app.paint();
        app.paint();
        assert!(!app.status().pending_up);
        assert_eq!(app.status().deferral_ticks, 0);
        assert!(app.log_lines.iter().any(|l| l.starts_with("posted  LeftButtonUp")));
    }

    #[test]
    fn pan_emits_wheel() {
        let mut app = AppState::new(Config::default());
        app.pan_begin();
        app.pan_by(-10);
        app.pan_by(-1);
        assert!(app.log_lines.back().unwrap().starts_with("wheel   -6"));
        app.pan_end();
        assert!(!app.status().pan_active);
    }
}
