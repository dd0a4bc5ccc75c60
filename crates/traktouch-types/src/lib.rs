//! Shared types for traktouch.
//!
//! This crate contains the types shared across the traktouch workspace:
//! the inbound window-message model, pointer geometry, host window identity
//! and gesture records.

pub mod geometry;
pub mod gesture;
pub mod message;
pub mod window;

pub use geometry::{Point16, Rect};
pub use gesture::{GestureFlags, GestureId, GestureInfo};
pub use message::{ButtonMask, ExtraInfo, InputMessage, MessageKind};
pub use window::WindowId;
