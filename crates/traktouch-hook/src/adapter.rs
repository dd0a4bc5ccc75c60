//! Glue between the host's UI thread and the engine.
//!
//! A loader installs [`EntryHook`] as a window procedure hook on the host's
//! UI thread and nudges it with a message. The first call sets up logging,
//! builds the engine and installs the real hooks; everything after that runs
//! on the same thread, so the engine lives in a thread local.
#![allow(unsafe_code)]

use std::cell::RefCell;
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::Context;
use tracing::{error, info, warn};
use traktouch_engine::setup::{config_path_for_module, load_config, log_path_for_module};
use traktouch_engine::{Config, Engine, GestureOutcome, WindowMatcher};
use traktouch_platform::win32::{
    call_original_set_cursor_pos, close_gesture, message_extra_info, read_gesture,
    to_input_message, window_id, write_back, CursorDetour, MessageHook, Win32Cursor, Win32Host,
};
use windows::core::BOOL;
use windows::Win32::Foundation::{HMODULE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleFileNameW;
use windows::Win32::UI::Shell::DefSubclassProc;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, MSG, WM_GESTURE, WM_MOUSEWHEEL, WM_NCDESTROY,
};

use crate::logging::init_logging;

const DLL_PROCESS_ATTACH: u32 = 1;
const WM_TABLET_QUERYSYSTEMGESTURESTATUS: u32 = 0x02CC;

static MODULE: AtomicUsize = AtomicUsize::new(0);
static STARTED: AtomicBool = AtomicBool::new(false);

/// Installed hooks, released on uninstall. The message hook goes first.
struct Hooks {
    _message: MessageHook,
    _cursor: Option<CursorDetour>,
}

thread_local! {
    static ENGINE: RefCell<Option<Engine>> = const { RefCell::new(None) };
    static HOOKS: RefCell<Option<Hooks>> = const { RefCell::new(None) };
}

/// Run `f` on this thread's engine, unless there is none or it is busy.
fn with_engine<R>(f: impl FnOnce(&mut Engine) -> R) -> Option<R> {
    ENGINE
        .try_with(|slot| {
            let mut slot = slot.try_borrow_mut().ok()?;
            slot.as_mut().map(f)
        })
        .ok()
        .flatten()
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn DllMain(
    module: HMODULE,
    reason: u32,
    _reserved: *mut core::ffi::c_void,
) -> BOOL {
    if reason == DLL_PROCESS_ATTACH {
        MODULE.store(module.0 as usize, Ordering::SeqCst);
    }
    BOOL(1)
}

/// Bootstrap hook procedure. Only the first call does anything.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn EntryHook(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if !STARTED.swap(true, Ordering::SeqCst) {
        if let Err(e) = start() {
            error!(error = %e, "failed to attach");
        }
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

fn module_path() -> Option<PathBuf> {
    let module = HMODULE(MODULE.load(Ordering::SeqCst) as *mut core::ffi::c_void);
    let mut buf = [0u16; 2048];
    let len = unsafe { GetModuleFileNameW(Some(module), &mut buf) } as usize;
    (len > 0 && len < buf.len()).then(|| PathBuf::from(OsString::from_wide(&buf[..len])))
}

fn start() -> anyhow::Result<()> {
    let module = module_path().context("cannot determine module path")?;
    let loaded = load_config(Some(&config_path_for_module(&module)));
    let config = loaded.as_ref().cloned().unwrap_or_else(|_| Config::default());

    let log_error = init_logging(&log_path_for_module(&module), &config.logging.level);
    info!(version = env!("CARGO_PKG_VERSION"), module = %module.display(), "attaching");
    if let Some(e) = &log_error {
        warn!(error = %e, "log file unavailable, logging to stderr");
    }
    if let Err(e) = &loaded {
        warn!(error = %e, "bad config file, using defaults");
    }

    let matcher = WindowMatcher::title(config.host.window_title.clone());
    let mut engine = Engine::new(
        config,
        Box::new(Win32Cursor),
        Box::new(Win32Host::new(Some(subclass_proc))),
    );
    engine.initialize(matcher)?;
    ENGINE.with(|slot| *slot.borrow_mut() = Some(engine));

    let message = MessageHook::install(Some(message_hook))?;
    let cursor = match CursorDetour::install(set_cursor_pos_detour) {
        Ok(detour) => Some(detour),
        Err(e) => {
            warn!(error = %e, "cursor repositioning will not be corrected");
            None
        }
    };
    HOOKS.with(|slot| {
        *slot.borrow_mut() = Some(Hooks {
            _message: message,
            _cursor: cursor,
        });
    });

    #[cfg(not(debug_assertions))]
    pin_module(&module);
    Ok(())
}

/// Keep the module loaded after the loader removes its bootstrap hook.
#[cfg(not(debug_assertions))]
fn pin_module(module: &std::path::Path) {
    use windows::core::HSTRING;
    use windows::Win32::System::LibraryLoader::LoadLibraryW;

    match unsafe { LoadLibraryW(&HSTRING::from(module.as_os_str())) } {
        Ok(_) => info!("module pinned"),
        Err(e) => warn!(error = %e, "failed to pin module"),
    }
}

/// Detach from the host and release all hooks.
#[cfg(debug_assertions)]
fn uninstall() {
    with_engine(Engine::teardown);
    HOOKS.with(|slot| slot.borrow_mut().take());
    ENGINE.with(|slot| {
        if let Ok(mut slot) = slot.try_borrow_mut() {
            slot.take();
        }
    });
    info!("uninstalled");
}

unsafe extern "system" fn message_hook(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 && lparam.0 != 0 {
        let msg = &mut *(lparam.0 as *mut MSG);
        let before = to_input_message(msg, message_extra_info());
        let mut after = before;
        with_engine(|engine| engine.process(&mut after));
        write_back(msg, &before, &after);
    }
    CallNextHookEx(None, code, wparam, lparam)
}

unsafe extern "system" fn set_cursor_pos_detour(x: i32, y: i32) -> BOOL {
    let done = with_engine(|engine| engine.set_cursor_pos(x, y))
        .unwrap_or_else(|| call_original_set_cursor_pos(x, y));
    BOOL::from(done)
}

unsafe extern "system" fn subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _id: usize,
    _data: usize,
) -> LRESULT {
    let window = window_id(hwnd);

    // Hijacks a message code that may be in use: debug builds only.
    #[cfg(debug_assertions)]
    {
        if msg == windows::Win32::UI::WindowsAndMessaging::WM_APP
            && wparam.0 == 0xCAFE
            && lparam.0 as usize == 0xDEAD_BEEF
        {
            info!(%window, "uninstall requested");
            uninstall();
            return LRESULT(0xBABE);
        }
    }

    match msg {
        WM_TABLET_QUERYSYSTEMGESTURESTATUS => {
            if let Some(status) = with_engine(|engine| engine.system_gesture_status(window)) {
                if status != 0 {
                    return LRESULT(status as isize);
                }
            }
        }
        WM_GESTURE => {
            if let Some((gesture, handle)) = read_gesture(lparam) {
                let outcome = with_engine(|engine| engine.handle_gesture(window, &gesture))
                    .unwrap_or(GestureOutcome::Default);
                match outcome {
                    GestureOutcome::Wheel(wheel) => {
                        close_gesture(handle);
                        return DefSubclassProc(
                            hwnd,
                            WM_MOUSEWHEEL,
                            WPARAM(wheel.first_param() as usize),
                            LPARAM(wheel.position.to_packed() as isize),
                        );
                    }
                    GestureOutcome::Consumed => {
                        close_gesture(handle);
                        return LRESULT(0);
                    }
                    GestureOutcome::Default => {}
                }
            }
        }
        WM_NCDESTROY => {
            with_engine(|engine| engine.on_window_destroyed(window));
        }
        _ => {}
    }
    DefSubclassProc(hwnd, msg, wparam, lparam)
}
