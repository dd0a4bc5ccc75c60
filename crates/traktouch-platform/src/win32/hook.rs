//! Thread message hook.

use tracing::{info, warn};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    SetWindowsHookExW, UnhookWindowsHookEx, HHOOK, HOOKPROC, WH_GETMESSAGE,
};

use crate::error::PlatformError;

/// A `WH_GETMESSAGE` hook on the calling thread. Unhooked on drop.
pub struct MessageHook {
    handle: HHOOK,
}

impl MessageHook {
    /// Hook every message retrieved by the calling thread's pump.
    pub fn install(proc: HOOKPROC) -> Result<Self, PlatformError> {
        let thread = unsafe { GetCurrentThreadId() };
        let handle = unsafe { SetWindowsHookExW(WH_GETMESSAGE, proc, None, thread) }
            .map_err(|e| PlatformError::Hook(e.to_string()))?;
        info!(thread, "message hook installed");
        Ok(Self { handle })
    }
}

impl Drop for MessageHook {
    fn drop(&mut self) {
        match unsafe { UnhookWindowsHookEx(self.handle) } {
            Ok(()) => info!("message hook removed"),
            Err(e) => warn!(error = %e, "failed to remove message hook"),
        }
    }
}
