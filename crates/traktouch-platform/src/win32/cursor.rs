//! Real pointer access and the `SetCursorPos` detour.

use std::sync::atomic::{AtomicUsize, Ordering};

use retour::GenericDetour;
use tracing::{info, warn};
use windows::core::{s, w, BOOL};
use windows::Win32::Foundation::POINT;
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

use crate::error::PlatformError;
use crate::CursorDevice;

/// Signature of `user32!SetCursorPos`.
pub type SetCursorPosFn = unsafe extern "system" fn(i32, i32) -> BOOL;

/// Trampoline to the original `SetCursorPos` while the detour is enabled, else 0.
static TRAMPOLINE: AtomicUsize = AtomicUsize::new(0);

/// Inline detour redirecting the process-wide `SetCursorPos` to a replacement.
///
/// Disabled again on drop.
pub struct CursorDetour {
    detour: GenericDetour<SetCursorPosFn>,
}

impl CursorDetour {
    /// Redirect `SetCursorPos` to `replacement`.
    pub fn install(replacement: SetCursorPosFn) -> Result<Self, PlatformError> {
        let user32 = unsafe { GetModuleHandleW(w!("user32.dll")) }
            .map_err(|e| PlatformError::Hook(format!("user32 not loaded: {e}")))?;
        let export = unsafe { GetProcAddress(user32, s!("SetCursorPos")) }
            .ok_or_else(|| PlatformError::Hook("SetCursorPos not exported".to_string()))?;
        let target: SetCursorPosFn = unsafe { std::mem::transmute(export) };

        let detour = unsafe { GenericDetour::new(target, replacement) }
            .map_err(|e| PlatformError::Hook(e.to_string()))?;
        unsafe { detour.enable() }.map_err(|e| PlatformError::Hook(e.to_string()))?;

        TRAMPOLINE.store(
            std::ptr::from_ref(detour.trampoline()) as usize,
            Ordering::SeqCst,
        );
        info!("SetCursorPos detour enabled");
        Ok(Self { detour })
    }
}

impl Drop for CursorDetour {
    fn drop(&mut self) {
        TRAMPOLINE.store(0, Ordering::SeqCst);
        match unsafe { self.detour.disable() } {
            Ok(()) => info!("SetCursorPos detour disabled"),
            Err(e) => warn!(error = %e, "failed to disable SetCursorPos detour"),
        }
    }
}

/// Call the real `SetCursorPos`, bypassing the detour if one is installed.
pub fn call_original_set_cursor_pos(x: i32, y: i32) -> bool {
    let raw = TRAMPOLINE.load(Ordering::SeqCst);
    if raw == 0 {
        unsafe { SetCursorPos(x, y) }.is_ok()
    } else {
        let original: SetCursorPosFn = unsafe { std::mem::transmute(raw) };
        unsafe { original(x, y) }.as_bool()
    }
}

/// The system pointer.
#[derive(Debug, Default)]
pub struct Win32Cursor;

impl CursorDevice for Win32Cursor {
    fn position(&self) -> Result<(i32, i32), PlatformError> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }
            .map_err(|e| PlatformError::CursorQuery(e.to_string()))?;
        Ok((point.x, point.y))
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<(), PlatformError> {
        if call_original_set_cursor_pos(x, y) {
            Ok(())
        } else {
            Err(PlatformError::CursorMove(
                windows::core::Error::from_win32().to_string(),
            ))
        }
    }
}
