//! Host window services.

use tracing::{debug, info};
use traktouch_types::{InputMessage, Rect, WindowId};
use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::UI::Input::Touch::{SetGestureConfig, GESTURECONFIG, GESTURECONFIG_ID};
use windows::Win32::UI::Shell::{RemoveWindowSubclass, SetWindowSubclass, SUBCLASSPROC};
use windows::Win32::UI::WindowsAndMessaging::{GetWindowRect, GetWindowTextW, PostMessageW};

use crate::error::PlatformError;
use crate::HostWindow;

/// Subclass id used for the touch policy subclass.
pub const TOUCH_SUBCLASS_ID: usize = 1;

const GID_PAN: u32 = 4;
const GC_ALLGESTURES: u32 = 0x1;
const GC_PAN: u32 = 0x1;

/// Longest title compared when resolving the host window.
const MAX_TITLE: usize = 256;

pub fn hwnd(window: WindowId) -> HWND {
    HWND(window.0 as *mut core::ffi::c_void)
}

pub fn window_id(hwnd: HWND) -> WindowId {
    WindowId(hwnd.0 as usize)
}

/// Host window services backed by user32 and comctl32.
///
/// `subclass` is the window procedure installed by
/// [`HostWindow::apply_touch_policy`]; it belongs to the hook adapter.
pub struct Win32Host {
    subclass: SUBCLASSPROC,
}

impl Win32Host {
    pub fn new(subclass: SUBCLASSPROC) -> Self {
        Self { subclass }
    }

    fn configure_gestures(window: WindowId, config: &[GESTURECONFIG]) -> Result<(), PlatformError> {
        #[allow(clippy::cast_possible_truncation)]
        let size = std::mem::size_of::<GESTURECONFIG>() as u32;
        unsafe { SetGestureConfig(hwnd(window), 0, config, size) }
            .map_err(|e| PlatformError::GestureConfig(e.to_string()))
    }
}

impl HostWindow for Win32Host {
    fn title(&self, window: WindowId) -> Option<String> {
        let mut buf = [0u16; MAX_TITLE];
        let len = unsafe { GetWindowTextW(hwnd(window), &mut buf) };
        if len <= 0 {
            return None;
        }
        #[allow(clippy::cast_sign_loss)]
        let len = (len as usize).min(buf.len());
        Some(String::from_utf16_lossy(&buf[..len]))
    }

    fn rect(&self, window: WindowId) -> Result<Rect, PlatformError> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd(window), &mut rect) }
            .map_err(|e| PlatformError::WindowQuery(window, e.to_string()))?;
        Ok(Rect::new(rect.left, rect.top, rect.right, rect.bottom))
    }

    fn post(&mut self, message: InputMessage) -> Result<(), PlatformError> {
        let wparam = WPARAM(message.first_param() as usize);
        let lparam = LPARAM(message.position.to_packed() as isize);
        unsafe { PostMessageW(Some(hwnd(message.window)), message.kind.to_raw(), wparam, lparam) }
            .map_err(|e| PlatformError::Post(e.to_string()))?;
        debug!(window = %message.window, kind = %message.kind, "posted message");
        Ok(())
    }

    fn apply_touch_policy(&mut self, window: WindowId) -> Result<(), PlatformError> {
        let ok = unsafe { SetWindowSubclass(hwnd(window), self.subclass, TOUCH_SUBCLASS_ID, 0) };
        if !ok.as_bool() {
            return Err(PlatformError::Subclass(
                windows::core::Error::from_win32().to_string(),
            ));
        }

        // All gestures off, then pan back on.
        let config = [
            GESTURECONFIG {
                dwID: GESTURECONFIG_ID(0),
                dwWant: 0,
                dwBlock: GC_ALLGESTURES,
            },
            GESTURECONFIG {
                dwID: GESTURECONFIG_ID(GID_PAN),
                dwWant: GC_PAN,
                dwBlock: 0,
            },
        ];
        if let Err(e) = Self::configure_gestures(window, &config) {
            unsafe {
                let _ = RemoveWindowSubclass(hwnd(window), self.subclass, TOUCH_SUBCLASS_ID);
            }
            return Err(e);
        }

        info!(window = %window, "touch policy applied");
        Ok(())
    }

    fn revert_touch_policy(&mut self, window: WindowId) -> Result<(), PlatformError> {
        let removed =
            unsafe { RemoveWindowSubclass(hwnd(window), self.subclass, TOUCH_SUBCLASS_ID) };
        let defaults = [GESTURECONFIG {
            dwID: GESTURECONFIG_ID(0),
            dwWant: GC_ALLGESTURES,
            dwBlock: 0,
        }];
        // The window may already be gone; gesture config dies with it.
        let _ = Self::configure_gestures(window, &defaults);

        if removed.as_bool() {
            info!(window = %window, "touch policy reverted");
            Ok(())
        } else {
            Err(PlatformError::Subclass(
                windows::core::Error::from_win32().to_string(),
            ))
        }
    }
}
