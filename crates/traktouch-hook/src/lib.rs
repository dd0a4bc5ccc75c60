//! Injectable module that runs the traktouch engine inside the host process.
//!
//! Builds to `traktouch.dll`. Configuration is read from `traktouch.toml`
//! and logs are written to `traktouch.log`, both next to the DLL.

pub mod logging;

#[cfg(windows)]
mod adapter;

#[cfg(windows)]
pub use adapter::{DllMain, EntryHook};
