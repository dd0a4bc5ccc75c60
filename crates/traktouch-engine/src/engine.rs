//! The input correction engine.
//!
//! One [`Engine`] sits between the host's message pump and its window
//! procedure. It is fed every inbound message in arrival order, every cursor
//! reposition call the host makes, every redraw tick and every gesture
//! notification, all on the host's UI thread.

use tracing::{debug, info, trace, warn};
use traktouch_platform::{CursorDevice, HostWindow};
use traktouch_types::{ButtonMask, GestureId, GestureInfo, InputMessage, MessageKind, Point16, WindowId};

use crate::classify::{classify, is_touch_originated};
use crate::config::Config;
use crate::deferral::DeferralScheduler;
use crate::error::EngineError;
use crate::gesture::PanTranslator;
use crate::install::{Installer, Observation, WindowMatcher};
use crate::session::TouchSession;
use crate::state::{Lifecycle, TouchPhase};

/// Answer to a system gesture status query that turns off press-and-hold
/// right-click emulation.
pub const DISABLE_PRESS_AND_HOLD: u32 = 0x0000_0001;

/// What the window procedure should do with a gesture notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Hand this wheel message to the host's default processing in place of
    /// the gesture.
    Wheel(InputMessage),
    /// Swallow the gesture.
    Consumed,
    /// Not ours; let the host handle the gesture.
    Default,
}

/// Snapshot of the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    pub lifecycle: Lifecycle,
    pub phase: TouchPhase,
    pub correction: Option<Point16>,
    pub deferral_ticks: u32,
    pub pending_up: bool,
    pub pan_active: bool,
}

pub struct Engine {
    config: Config,
    cursor: Box<dyn CursorDevice>,
    host: Box<dyn HostWindow>,
    installer: Installer,
    session: TouchSession,
    deferral: DeferralScheduler,
    pan: PanTranslator,
}

impl Engine {
    /// Create an engine. It passes everything through until
    /// [`Engine::initialize`] is called.
    pub fn new(config: Config, cursor: Box<dyn CursorDevice>, host: Box<dyn HostWindow>) -> Self {
        Self {
            config,
            cursor,
            host,
            installer: Installer::default(),
            session: TouchSession::default(),
            deferral: DeferralScheduler::default(),
            pan: PanTranslator::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.installer.lifecycle()
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            lifecycle: self.installer.lifecycle(),
            phase: self.session.phase(),
            correction: self.session.correction(),
            deferral_ticks: self.deferral.remaining_ticks(),
            pending_up: self.deferral.has_pending_up(),
            pan_active: self.pan.is_active(),
        }
    }

    /// Start looking for the host window. Can only be called once.
    pub fn initialize(&mut self, matcher: WindowMatcher) -> Result<(), EngineError> {
        self.installer.arm(matcher)?;
        info!(
            defer_buttons = self.config.touch.defer_buttons,
            scale = self.config.scroll.scale,
            "engine initialized"
        );
        Ok(())
    }

    /// Detach from the host window and drop all touch state.
    ///
    /// Idempotent. Afterwards every call passes through.
    pub fn teardown(&mut self) {
        if self.installer.teardown(self.host.as_mut()) {
            self.session.end();
            self.deferral.cancel();
            self.pan.end();
        }
    }

    /// Replacement for the host's cursor reposition call.
    ///
    /// Outside a touch session the pointer is moved for real. During one the
    /// pointer stays under the finger and the request only updates the
    /// correction offset.
    pub fn set_cursor_pos(&mut self, x: i32, y: i32) -> bool {
        if !self.session.is_touching() {
            return match self.cursor.move_to(x, y) {
                Ok(()) => true,
                Err(e) => {
                    debug!(x, y, error = %e, "cursor move failed");
                    false
                }
            };
        }

        match self.cursor.position() {
            Ok(pointer) => {
                self.session.redirect(pointer, (x, y));
                debug!(x, y, ?pointer, correction = ?self.session.correction(), "cursor reposition redirected");
            }
            Err(e) => warn!(x, y, error = %e, "cannot read pointer, keeping correction offset"),
        }
        true
    }

    /// Inspect and possibly rewrite an inbound message before the host sees it.
    pub fn process(&mut self, msg: &mut InputMessage) {
        match self.installer.observe(msg.window, self.host.as_mut()) {
            Observation::PassThrough | Observation::Resolved => return,
            Observation::Host => {}
        }

        match msg.kind {
            MessageKind::Paint => {
                self.tick();
                return;
            }
            MessageKind::NcDestroy => {
                self.on_window_destroyed(msg.window);
                return;
            }
            _ => {}
        }

        if !msg.kind.is_pointer() || !is_touch_originated(msg.extra) {
            return;
        }

        if self.session.is_touching() {
            let raw = msg.position;
            msg.position = self.session.correct(raw);
            trace!(
                kind = %msg.kind,
                origin = ?classify(msg.extra),
                %raw,
                corrected = %msg.position,
                "corrected touch position"
            );
        }

        match msg.kind {
            MessageKind::LeftButtonDown => self.touch_down(msg),
            MessageKind::LeftButtonUp => self.touch_up(msg),
            _ => {}
        }
    }

    fn touch_down(&mut self, msg: &mut InputMessage) {
        self.session.begin(msg.position);
        self.deferral.cancel_if_expired();

        let down = InputMessage::new(msg.window, MessageKind::LeftButtonDown)
            .with_buttons(msg.buttons)
            .at(msg.position);
        let ticks = self.config.touch.defer_buttons;
        if ticks == 0 {
            self.post(down);
        } else {
            self.deferral.arm(ticks, down);
        }
        debug!(at = %msg.position, origin = ?classify(msg.extra), ticks, "touch down");

        msg.kind = MessageKind::MouseMove;
        msg.buttons = ButtonMask::NONE;
        msg.wheel_delta = 0;
    }

    fn touch_up(&mut self, msg: &mut InputMessage) {
        self.session.end();
        if self.deferral.defer_up() {
            msg.suppress();
            debug!(at = %msg.position, "touch up held back behind deferred down");
        } else {
            debug!(at = %msg.position, "touch up");
        }
    }

    /// Advance the deferral clock by one redraw.
    pub fn tick(&mut self) {
        if let Some(click) = self.deferral.tick() {
            debug!(at = %click.down.position, with_up = click.up.is_some(), "releasing deferred click");
            self.post(click.down);
            if let Some(up) = click.up {
                self.post(up);
            }
        }
    }

    fn post(&mut self, message: InputMessage) {
        if let Err(e) = self.host.post(message) {
            warn!(kind = %message.kind, error = %e, "failed to post synthetic message");
        }
    }

    /// Translate a gesture notification for `window`.
    pub fn handle_gesture(&mut self, window: WindowId, gesture: &GestureInfo) -> GestureOutcome {
        if !self.installer.lifecycle().is_active_for(window) || gesture.id != GestureId::Pan {
            return GestureOutcome::Default;
        }

        if gesture.flags.begin {
            let rect = match self.host.rect(window) {
                Ok(rect) => rect,
                Err(e) => {
                    warn!(%window, error = %e, "cannot place scroll origin, leaving pan to host");
                    return GestureOutcome::Default;
                }
            };
            let scroll = &self.config.scroll;
            let origin = Point16::from_i32(
                rect.right - scroll.track_list_offset_x,
                rect.bottom - scroll.track_list_offset_y,
            );
            self.pan.begin(origin, gesture.location.y);
            debug!(%origin, y = gesture.location.y, "pan begin");
            return GestureOutcome::Consumed;
        }

        let outcome = match self.pan.update(gesture.location.y, &self.config.scroll) {
            Some(delta) => GestureOutcome::Wheel(
                InputMessage::new(window, MessageKind::MouseWheel)
                    .with_wheel_delta(delta)
                    .at(self.pan.origin()),
            ),
            None => GestureOutcome::Consumed,
        };
        if gesture.flags.end {
            self.pan.end();
            debug!("pan end");
        }
        outcome
    }

    /// The platform is destroying `window`.
    pub fn on_window_destroyed(&mut self, window: WindowId) {
        if self.installer.lifecycle().host_window() == Some(window) {
            info!(%window, "host window destroyed");
            self.teardown();
        }
    }

    /// Answer the platform's system gesture status query for `window`.
    pub fn system_gesture_status(&self, window: WindowId) -> u32 {
        if self.installer.lifecycle().is_active_for(window) {
            DISABLE_PRESS_AND_HOLD
        } else {
            0
        }
    }
}
