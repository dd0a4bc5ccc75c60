//! Host window identity.

use serde::{Deserialize, Serialize};

/// Opaque identity of a native window.
///
/// Wraps the raw handle value so the engine never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub usize);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_id_display_is_hex() {
        assert_eq!(WindowId(0x1234).to_string(), "0x1234");
    }
}
