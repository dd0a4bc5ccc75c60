//! Mock platform backends for testing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use traktouch_types::{InputMessage, Rect, WindowId};

use crate::error::PlatformError;
use crate::{CursorDevice, HostWindow};

// ---------------------------------------------------------------------------
// MockCursor
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MockCursorState {
    position: (i32, i32),
    moves: Vec<(i32, i32)>,
    fail_moves: bool,
}

/// Mock system pointer.
///
/// Successful moves update the reported position, like a real pointer.
pub struct MockCursor {
    state: Arc<Mutex<MockCursorState>>,
}

impl Default for MockCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCursor {
    /// Create a mock pointer resting at the origin.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockCursorState::default())),
        }
    }

    /// Get a clonable handle for steering and observing the pointer from tests.
    pub fn handle(&self) -> MockCursorHandle {
        MockCursorHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for `MockCursor`.
#[derive(Clone)]
pub struct MockCursorHandle {
    state: Arc<Mutex<MockCursorState>>,
}

impl MockCursorHandle {
    /// Place the pointer, as if the user or the platform had moved it.
    pub fn set_position(&self, x: i32, y: i32) {
        self.state.lock().unwrap().position = (x, y);
    }

    /// Current pointer position.
    pub fn position(&self) -> (i32, i32) {
        self.state.lock().unwrap().position
    }

    /// All real moves performed so far.
    pub fn moves(&self) -> Vec<(i32, i32)> {
        self.state.lock().unwrap().moves.clone()
    }

    /// Make subsequent moves fail.
    pub fn fail_moves(&self, fail: bool) {
        self.state.lock().unwrap().fail_moves = fail;
    }
}

impl CursorDevice for MockCursor {
    fn position(&self) -> Result<(i32, i32), PlatformError> {
        Ok(self.state.lock().unwrap().position)
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_moves {
            return Err(PlatformError::CursorMove("mock move rejected".to_string()));
        }
        state.position = (x, y);
        state.moves.push((x, y));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockHost
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MockHostState {
    titles: HashMap<WindowId, String>,
    rects: HashMap<WindowId, Rect>,
    posted: Vec<InputMessage>,
    policy: HashSet<WindowId>,
    policy_applied: u32,
    policy_reverted: u32,
    fail_policy: bool,
}

/// Mock host window system.
pub struct MockHost {
    state: Arc<Mutex<MockHostState>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Create an empty mock host.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockHostState::default())),
        }
    }

    /// Register a window with a title and rectangle.
    #[must_use]
    pub fn with_window(self, window: WindowId, title: &str, rect: Rect) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.titles.insert(window, title.to_string());
            state.rects.insert(window, rect);
        }
        self
    }

    /// Get a clonable handle for observing the host state from tests.
    pub fn handle(&self) -> MockHostHandle {
        MockHostHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for `MockHost`.
#[derive(Clone)]
pub struct MockHostHandle {
    state: Arc<Mutex<MockHostState>>,
}

impl MockHostHandle {
    /// Get a snapshot of all posted messages.
    pub fn posted(&self) -> Vec<InputMessage> {
        self.state.lock().unwrap().posted.clone()
    }

    /// Drain the posted messages, as the host pump would.
    pub fn take_posted(&self) -> Vec<InputMessage> {
        std::mem::take(&mut self.state.lock().unwrap().posted)
    }

    /// Whether the touch policy is currently applied to `window`.
    pub fn has_policy(&self, window: WindowId) -> bool {
        self.state.lock().unwrap().policy.contains(&window)
    }

    /// How many times the policy was applied and reverted.
    pub fn policy_counts(&self) -> (u32, u32) {
        let state = self.state.lock().unwrap();
        (state.policy_applied, state.policy_reverted)
    }

    /// Make subsequent policy installation fail.
    pub fn fail_policy(&self, fail: bool) {
        self.state.lock().unwrap().fail_policy = fail;
    }

    /// Move or resize a window.
    pub fn set_rect(&self, window: WindowId, rect: Rect) {
        self.state.lock().unwrap().rects.insert(window, rect);
    }
}

impl HostWindow for MockHost {
    fn title(&self, window: WindowId) -> Option<String> {
        self.state.lock().unwrap().titles.get(&window).cloned()
    }

    fn rect(&self, window: WindowId) -> Result<Rect, PlatformError> {
        self.state
            .lock()
            .unwrap()
            .rects
            .get(&window)
            .copied()
            .ok_or_else(|| PlatformError::WindowQuery(window, "unknown window".to_string()))
    }

    fn post(&mut self, message: InputMessage) -> Result<(), PlatformError> {
        self.state.lock().unwrap().posted.push(message);
        Ok(())
    }

    fn apply_touch_policy(&mut self, window: WindowId) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_policy {
            return Err(PlatformError::Subclass("mock subclass rejected".to_string()));
        }
        state.policy.insert(window);
        state.policy_applied += 1;
        Ok(())
    }

    fn revert_touch_policy(&mut self, window: WindowId) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.policy.remove(&window) {
            state.policy_reverted += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use traktouch_types::MessageKind;

    use super::*;

    #[test]
    fn cursor_moves_are_recorded() {
        let mut cursor = MockCursor::new();
        let handle = cursor.handle();
        cursor.move_to(10, 20).unwrap();
        assert_eq!(handle.position(), (10, 20));
        assert_eq!(handle.moves(), vec![(10, 20)]);
    }

    #[test]
    fn failed_move_leaves_position() {
        let mut cursor = MockCursor::new();
        let handle = cursor.handle();
        handle.set_position(5, 5);
        handle.fail_moves(true);
        assert!(cursor.move_to(10, 20).is_err());
        assert_eq!(handle.position(), (5, 5));
        assert!(handle.moves().is_empty());
    }

    #[test]
    fn host_reports_registered_windows() {
        let host = MockHost::new().with_window(WindowId(1), "Traktor", Rect::new(0, 0, 800, 600));
        assert_eq!(host.title(WindowId(1)).as_deref(), Some("Traktor"));
        assert!(host.title(WindowId(2)).is_none());
        assert!(host.rect(WindowId(2)).is_err());
    }

    #[test]
    fn policy_revert_counts_once() {
        let mut host = MockHost::new();
        let handle = host.handle();
        host.apply_touch_policy(WindowId(1)).unwrap();
        host.revert_touch_policy(WindowId(1)).unwrap();
        host.revert_touch_policy(WindowId(1)).unwrap();
        assert_eq!(handle.policy_counts(), (1, 1));
        assert!(!handle.has_policy(WindowId(1)));
    }

    #[test]
    fn take_posted_drains() {
        let mut host = MockHost::new();
        let handle = host.handle();
        host.post(InputMessage::new(WindowId(1), MessageKind::LeftButtonDown))
            .unwrap();
        assert_eq!(handle.take_posted().len(), 1);
        assert!(handle.posted().is_empty());
    }
}
