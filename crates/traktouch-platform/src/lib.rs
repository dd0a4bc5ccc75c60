//! Platform-abstracted cursor and host window access for traktouch.
//!
//! This crate defines the [`CursorDevice`] and [`HostWindow`] traits the
//! engine is built against. The real pointer mover/reader and the host window
//! services are injected at construction time, so the engine never calls the
//! platform directly. A Win32 backend is available behind the `windows`
//! feature and an in-memory backend behind `mock`.

use traktouch_types::{InputMessage, Rect, WindowId};

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
#[cfg(all(windows, feature = "windows"))]
pub mod win32;

pub use error::PlatformError;

/// The real system pointer.
///
/// Implementations must bypass any interception installed on the host's own
/// cursor-reposition call, otherwise the engine would recurse into itself.
pub trait CursorDevice {
    /// Current pointer position in screen coordinates.
    fn position(&self) -> Result<(i32, i32), PlatformError>;

    /// Move the pointer to `(x, y)` in screen coordinates.
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), PlatformError>;
}

/// Services the engine needs from the host window system.
pub trait HostWindow {
    /// Title of `window`, or `None` if it cannot be queried.
    fn title(&self, window: WindowId) -> Option<String>;

    /// Outer rectangle of `window` in screen coordinates.
    fn rect(&self, window: WindowId) -> Result<Rect, PlatformError>;

    /// Queue a synthetic message for normal processing by the host's pump.
    fn post(&mut self, message: InputMessage) -> Result<(), PlatformError>;

    /// Subclass `window`, disable press-and-hold right-click emulation and
    /// restrict gesture recognition to panning.
    fn apply_touch_policy(&mut self, window: WindowId) -> Result<(), PlatformError>;

    /// Undo [`HostWindow::apply_touch_policy`].
    fn revert_touch_policy(&mut self, window: WindowId) -> Result<(), PlatformError>;
}
