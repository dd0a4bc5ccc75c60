//! Offline replay of recorded event traces through the engine.

use std::fmt;

use serde::Deserialize;
use traktouch_engine::{Config, Engine, GestureOutcome, WindowMatcher};
use traktouch_platform::mock::{MockCursor, MockHost};
use traktouch_types::{GestureInfo, InputMessage, Rect, WindowId};

/// A recorded session: the windows that exist and what happened to them.
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    /// Where the real pointer rests initially.
    #[serde(default)]
    pub pointer: (i32, i32),
    #[serde(default, rename = "window")]
    pub windows: Vec<TraceWindow>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraceWindow {
    pub id: WindowId,
    pub title: String,
    #[serde(default)]
    pub rect: Rect,
}

/// One recorded input.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// A message retrieved by the host's pump.
    Message(InputMessage),
    /// The host asked to move the cursor.
    SetCursorPos { x: i32, y: i32 },
    /// The real pointer moved under the finger.
    Pointer { x: i32, y: i32 },
    /// A gesture notification reached the window procedure.
    Gesture {
        window: WindowId,
        gesture: GestureInfo,
    },
    /// The window is being destroyed.
    Destroy { window: WindowId },
}

/// What the engine did in response to one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The message was handed on to the host, possibly rewritten.
    Forwarded {
        before: InputMessage,
        after: InputMessage,
    },
    /// A synthetic message was queued.
    Posted(InputMessage),
    /// A cursor reposition call returned.
    Reposition { x: i32, y: i32, result: bool },
    /// The real pointer was moved.
    CursorMoved(i32, i32),
    /// A gesture became a wheel message.
    Wheel(InputMessage),
    GestureConsumed,
    GestureDefault,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forwarded { before, after } if before == after => {
                write!(f, "pass     {} {} @ {}", after.window, after.kind, after.position)
            }
            Self::Forwarded { before, after } => write!(
                f,
                "rewrite  {} {} @ {} -> {} @ {} buttons={:#x}",
                after.window,
                before.kind,
                before.position,
                after.kind,
                after.position,
                after.buttons.0
            ),
            Self::Posted(m) => write!(
                f,
                "post     {} {} @ {} buttons={:#x}",
                m.window, m.kind, m.position, m.buttons.0
            ),
            Self::Reposition { x, y, result } => write!(f, "setpos   ({x}, {y}) -> {result}"),
            Self::CursorMoved(x, y) => write!(f, "cursor   ({x}, {y})"),
            Self::Wheel(m) => write!(f, "wheel    {} {} @ {}", m.window, m.wheel_delta, m.position),
            Self::GestureConsumed => write!(f, "gesture  consumed"),
            Self::GestureDefault => write!(f, "gesture  default"),
        }
    }
}

/// Run `trace` through a fresh engine and collect the effects of each step.
pub fn replay(trace: &Trace, config: Config) -> anyhow::Result<Vec<Vec<Effect>>> {
    let cursor = MockCursor::new();
    let cursor_handle = cursor.handle();
    cursor_handle.set_position(trace.pointer.0, trace.pointer.1);

    let host = trace.windows.iter().fold(MockHost::new(), |host, w| {
        host.with_window(w.id, &w.title, w.rect)
    });
    let host_handle = host.handle();

    let matcher = WindowMatcher::title(config.host.window_title.clone());
    let mut engine = Engine::new(config, Box::new(cursor), Box::new(host));
    engine.initialize(matcher)?;

    let mut effects = Vec::with_capacity(trace.steps.len());
    for step in &trace.steps {
        let moves_before = cursor_handle.moves().len();
        let mut out = Vec::new();
        match *step {
            Step::Message(before) => {
                let mut after = before;
                engine.process(&mut after);
                out.push(Effect::Forwarded { before, after });
            }
            Step::SetCursorPos { x, y } => {
                let result = engine.set_cursor_pos(x, y);
                out.push(Effect::Reposition { x, y, result });
            }
            Step::Pointer { x, y } => cursor_handle.set_position(x, y),
            Step::Gesture { window, gesture } => {
                out.push(match engine.handle_gesture(window, &gesture) {
                    GestureOutcome::Wheel(m) => Effect::Wheel(m),
                    GestureOutcome::Consumed => Effect::GestureConsumed,
                    GestureOutcome::Default => Effect::GestureDefault,
                });
            }
            Step::Destroy { window } => engine.on_window_destroyed(window),
        }
        out.extend(
            cursor_handle.moves()[moves_before..]
                .iter()
                .map(|&(x, y)| Effect::CursorMoved(x, y)),
        );
        out.extend(host_handle.take_posted().into_iter().map(Effect::Posted));
        effects.push(out);
    }

    tracing::debug!(status = ?engine.status(), "replay finished");
    Ok(effects)
}
