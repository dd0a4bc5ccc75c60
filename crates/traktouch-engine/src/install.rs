//! Host window identity and touch policy installation.

use tracing::{debug, info, warn};
use traktouch_platform::HostWindow;
use traktouch_types::WindowId;

use crate::error::EngineError;
use crate::state::Lifecycle;

/// Decides which window is the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowMatcher {
    title: String,
}

impl WindowMatcher {
    /// Match windows whose title is exactly `title`.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn matches(&self, title: &str) -> bool {
        self.title == title
    }

    pub fn expected_title(&self) -> &str {
        &self.title
    }
}

/// What the engine should do with an event after identity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Not ours to touch.
    PassThrough,
    /// This event just resolved the host window; it is forwarded unmodified.
    Resolved,
    /// An event for the resolved, fully installed host window.
    Host,
}

/// Resolves the host window once and owns the installation lifecycle.
#[derive(Debug)]
pub struct Installer {
    lifecycle: Lifecycle,
    matcher: Option<WindowMatcher>,
}

impl Default for Installer {
    fn default() -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            matcher: None,
        }
    }
}

impl Installer {
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Start waiting for the host window.
    pub fn arm(&mut self, matcher: WindowMatcher) -> Result<(), EngineError> {
        if self.lifecycle != Lifecycle::Uninitialized {
            return Err(EngineError::AlreadyInitialized);
        }
        info!(title = matcher.expected_title(), "waiting for host window");
        self.matcher = Some(matcher);
        self.lifecycle = Lifecycle::Dormant;
        Ok(())
    }

    /// Classify an event's target window, resolving the host on first sight.
    pub fn observe(&mut self, window: WindowId, host: &mut dyn HostWindow) -> Observation {
        match self.lifecycle {
            Lifecycle::Active(w) if w == window => Observation::Host,
            Lifecycle::Dormant => self.try_resolve(window, host),
            _ => Observation::PassThrough,
        }
    }

    fn try_resolve(&mut self, window: WindowId, host: &mut dyn HostWindow) -> Observation {
        let Some(matcher) = &self.matcher else {
            return Observation::PassThrough;
        };
        let Some(title) = host.title(window) else {
            return Observation::PassThrough;
        };
        if !matcher.matches(&title) {
            return Observation::PassThrough;
        }

        info!(%window, title = %title, "host window resolved");
        match host.apply_touch_policy(window) {
            Ok(()) => {
                info!(%window, "touch policy installed");
                self.lifecycle = Lifecycle::Active(window);
            }
            Err(e) => {
                warn!(%window, error = %e, "touch policy installation failed, passing input through");
                self.lifecycle = Lifecycle::Degraded(window);
            }
        }
        Observation::Resolved
    }

    /// Detach from the host window. Safe to call any number of times.
    ///
    /// Returns `true` if this call did the detaching.
    pub fn teardown(&mut self, host: &mut dyn HostWindow) -> bool {
        match self.lifecycle {
            Lifecycle::TornDown => {
                debug!("teardown: already torn down");
                false
            }
            Lifecycle::Active(window) => {
                if let Err(e) = host.revert_touch_policy(window) {
                    warn!(%window, error = %e, "failed to revert touch policy");
                }
                info!(%window, "detached from host window");
                self.lifecycle = Lifecycle::TornDown;
                true
            }
            previous => {
                info!(%previous, "teardown");
                self.lifecycle = Lifecycle::TornDown;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use traktouch_platform::mock::MockHost;
    use traktouch_types::Rect;

    use super::*;

    const HOST: WindowId = WindowId(0x100);
    const OTHER: WindowId = WindowId(0x200);

    fn host() -> MockHost {
        MockHost::new()
            .with_window(HOST, "Traktor", Rect::new(0, 0, 1920, 1080))
            .with_window(OTHER, "Preferences", Rect::new(10, 10, 400, 300))
    }

    #[test]
    fn uninitialized_passes_everything() {
        let mut host = host();
        let mut installer = Installer::default();
        assert_eq!(installer.observe(HOST, &mut host), Observation::PassThrough);
        assert_eq!(installer.lifecycle(), Lifecycle::Uninitialized);
    }

    #[test]
    fn resolves_on_exact_title_only() {
        let mut host = host();
        let handle = host.handle();
        let mut installer = Installer::default();
        installer.arm(WindowMatcher::title("Traktor")).unwrap();

        assert_eq!(installer.observe(OTHER, &mut host), Observation::PassThrough);
        assert_eq!(installer.lifecycle(), Lifecycle::Dormant);

        assert_eq!(installer.observe(HOST, &mut host), Observation::Resolved);
        assert_eq!(installer.lifecycle(), Lifecycle::Active(HOST));
        assert!(handle.has_policy(HOST));

        assert_eq!(installer.observe(HOST, &mut host), Observation::Host);
        assert_eq!(installer.observe(OTHER, &mut host), Observation::PassThrough);
        assert_eq!(handle.policy_counts(), (1, 0));
    }

    #[test]
    fn title_prefix_does_not_match() {
        assert!(!WindowMatcher::title("Traktor").matches("Traktor Pro"));
        assert!(WindowMatcher::title("Traktor").matches("Traktor"));
    }

    #[test]
    fn second_arm_is_rejected() {
        let mut installer = Installer::default();
        installer.arm(WindowMatcher::title("Traktor")).unwrap();
        assert!(matches!(
            installer.arm(WindowMatcher::title("Traktor")),
            Err(EngineError::AlreadyInitialized)
        ));
    }

    #[test]
    fn failed_policy_degrades() {
        let mut host = host();
        host.handle().fail_policy(true);
        let mut installer = Installer::default();
        installer.arm(WindowMatcher::title("Traktor")).unwrap();

        assert_eq!(installer.observe(HOST, &mut host), Observation::Resolved);
        assert_eq!(installer.lifecycle(), Lifecycle::Degraded(HOST));
        assert_eq!(installer.observe(HOST, &mut host), Observation::PassThrough);
    }

    #[test]
    fn teardown_reverts_once() {
        let mut host = host();
        let handle = host.handle();
        let mut installer = Installer::default();
        installer.arm(WindowMatcher::title("Traktor")).unwrap();
        installer.observe(HOST, &mut host);

        assert!(installer.teardown(&mut host));
        assert!(!installer.teardown(&mut host));
        assert!(!handle.has_policy(HOST));
        assert_eq!(handle.policy_counts(), (1, 1));
        assert_eq!(installer.observe(HOST, &mut host), Observation::PassThrough);
    }
}
