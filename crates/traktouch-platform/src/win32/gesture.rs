//! Gesture notification decoding.

use tracing::debug;
use traktouch_types::{GestureFlags, GestureId, GestureInfo, Point16};
use windows::Win32::Foundation::LPARAM;
use windows::Win32::UI::Input::Touch::{
    CloseGestureInfoHandle, GetGestureInfo, GESTUREINFO, HGESTUREINFO,
};

/// Handle to a gesture record; must be closed once the gesture is consumed.
#[derive(Debug, Clone, Copy)]
pub struct GestureHandle(HGESTUREINFO);

/// Read the gesture record referenced by a gesture message's `lParam`.
pub fn read_gesture(lparam: LPARAM) -> Option<(GestureInfo, GestureHandle)> {
    let handle = HGESTUREINFO(lparam.0 as *mut core::ffi::c_void);
    #[allow(clippy::cast_possible_truncation)]
    let mut info = GESTUREINFO {
        cbSize: std::mem::size_of::<GESTUREINFO>() as u32,
        ..GESTUREINFO::default()
    };
    if let Err(e) = unsafe { GetGestureInfo(handle, &mut info) } {
        debug!(error = %e, "failed to read gesture info");
        return None;
    }
    let gesture = GestureInfo {
        id: GestureId::from_raw(info.dwID),
        flags: GestureFlags::from_raw(info.dwFlags),
        location: Point16::new(info.ptsLocation.x, info.ptsLocation.y),
    };
    Some((gesture, GestureHandle(handle)))
}

/// Release a gesture record the host will not see.
pub fn close_gesture(handle: GestureHandle) {
    if let Err(e) = unsafe { CloseGestureInfoHandle(handle.0) } {
        debug!(error = %e, "failed to close gesture handle");
    }
}
