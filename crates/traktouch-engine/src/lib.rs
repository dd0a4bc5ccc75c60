//! Input correction engine for touch screens.
//!
//! Turns the touch-to-mouse stream the platform synthesizes for a legacy
//! desktop host into something the host's controls can use: the pointer
//! stays under the finger even when the host warps the cursor, button-down
//! is held back until the host has seen the pointer hover, and pan gestures
//! become mouse wheel scrolling.

pub mod classify;
pub mod config;
pub mod deferral;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod install;
pub mod session;
pub mod setup;
pub mod state;

pub use classify::{classify, is_touch_originated, PointerOrigin};
pub use config::Config;
pub use engine::{Engine, EngineStatus, GestureOutcome, DISABLE_PRESS_AND_HOLD};
pub use error::EngineError;
pub use gesture::scroll_amount;
pub use install::WindowMatcher;
pub use state::{Lifecycle, TouchPhase};
