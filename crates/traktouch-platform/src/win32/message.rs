//! Conversion between `MSG` and [`InputMessage`].

use traktouch_types::{ExtraInfo, InputMessage, MessageKind, Point16};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{GetMessageExtraInfo, MSG};

use super::host::window_id;

/// Signature of the message most recently retrieved by this thread.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn message_extra_info() -> ExtraInfo {
    ExtraInfo(unsafe { GetMessageExtraInfo() }.0 as u32)
}

/// Decode a retrieved message.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_input_message(msg: &MSG, extra: ExtraInfo) -> InputMessage {
    let (buttons, wheel_delta) = InputMessage::split_first_param(msg.wParam.0 as u32);
    InputMessage {
        window: window_id(msg.hwnd),
        kind: MessageKind::from_raw(msg.message),
        buttons,
        wheel_delta,
        position: Point16::from_packed(msg.lParam.0 as u32),
        extra,
    }
}

/// Store the engine's changes back into `msg`.
///
/// Only fields that differ from `before` are written, so parameters the
/// message model does not carry survive untouched.
pub fn write_back(msg: &mut MSG, before: &InputMessage, after: &InputMessage) {
    if after.kind != before.kind {
        msg.message = after.kind.to_raw();
    }
    if after.buttons != before.buttons || after.wheel_delta != before.wheel_delta {
        msg.wParam = WPARAM(after.first_param() as usize);
    }
    if after.position != before.position {
        msg.lParam = LPARAM(after.position.to_packed() as isize);
    }
}
