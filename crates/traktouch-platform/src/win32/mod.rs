//! Win32 backend: real pointer, host window services and hook plumbing.
//!
//! Everything in here runs on the host's UI thread inside the host process.
#![allow(unsafe_code)]

mod cursor;
mod gesture;
mod hook;
mod host;
mod message;

pub use cursor::{call_original_set_cursor_pos, CursorDetour, SetCursorPosFn, Win32Cursor};
pub use gesture::{close_gesture, read_gesture, GestureHandle};
pub use hook::MessageHook;
pub use host::{hwnd, window_id, Win32Host, TOUCH_SUBCLASS_ID};
pub use message::{message_extra_info, to_input_message, write_back};
