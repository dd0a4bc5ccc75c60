//! Engine and touch session state enums.

use traktouch_types::WindowId;

/// Phase of the touch-to-mouse correction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// No finger on the screen.
    Idle,
    /// Touch down seen; correction offset still provisional.
    PendingCorrection,
    /// Correction offset established.
    Corrected,
}

impl TouchPhase {
    /// Whether a touch session is active.
    pub fn is_touching(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl std::fmt::Display for TouchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::PendingCorrection => write!(f, "PendingCorrection"),
            Self::Corrected => write!(f, "Corrected"),
        }
    }
}

/// Installation lifecycle of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// `initialize` not yet called; everything passes through.
    Uninitialized,
    /// Waiting for the host window to show up.
    Dormant,
    /// Attached to the host window.
    Active(WindowId),
    /// Host window found but the touch policy could not be installed.
    Degraded(WindowId),
    /// Detached for good.
    TornDown,
}

impl Lifecycle {
    /// The resolved host window, if any.
    pub fn host_window(self) -> Option<WindowId> {
        match self {
            Self::Active(w) | Self::Degraded(w) => Some(w),
            _ => None,
        }
    }

    /// Whether events for `window` are processed.
    pub fn is_active_for(self, window: WindowId) -> bool {
        self == Self::Active(window)
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Dormant => write!(f, "Dormant"),
            Self::Active(w) => write!(f, "Active({w})"),
            Self::Degraded(w) => write!(f, "Degraded({w})"),
            Self::TornDown => write!(f, "TornDown"),
        }
    }
}
