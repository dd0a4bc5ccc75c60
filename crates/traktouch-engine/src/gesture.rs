//! Pan-to-scroll gesture translator.

use tracing::trace;
use traktouch_types::Point16;

use crate::config::ScrollConfig;

/// Wheel units for a vertical pan delta.
///
/// Linear inside the dead zone, power-law beyond it, clamped to the 16-bit
/// wheel delta range.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn scroll_amount(delta: i32, config: &ScrollConfig) -> i16 {
    let delta = i64::from(delta);
    let scale = i64::from(config.scale);
    let dead_zone = i64::from(config.accel_dead_zone);

    let scroll = if delta.abs() < dead_zone {
        delta * scale
    } else {
        let excess = (delta.abs() - dead_zone) as f64;
        // Float-to-int `as` saturates, so huge values cannot wrap here.
        let accelerated = (excess.powf(f64::from(config.accel_exponent)) * scale as f64) as i64;
        delta.signum() * accelerated.saturating_add(dead_zone * scale)
    };

    scroll.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

/// State of the pan gesture in progress.
///
/// The platform only reports a pan after the finger left a dead zone, and
/// the first update then carries the whole accumulated distance; that
/// update is swallowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanTranslator {
    origin: Point16,
    previous_y: i32,
    ignore_next_delta: bool,
    active: bool,
}

impl PanTranslator {
    /// A pan started at `y`; wheel events will be reported at `origin`.
    pub fn begin(&mut self, origin: Point16, y: i16) {
        self.origin = origin;
        self.previous_y = i32::from(y);
        self.ignore_next_delta = true;
        self.active = true;
    }

    /// Next pan position. Returns the wheel delta to emit, if any.
    pub fn update(&mut self, y: i16, config: &ScrollConfig) -> Option<i16> {
        if !self.active {
            return None;
        }
        let y = i32::from(y);
        if self.ignore_next_delta {
            self.previous_y = y;
            self.ignore_next_delta = false;
            trace!(y, "swallowed first pan delta");
            return None;
        }

        let delta = y - self.previous_y;
        self.previous_y = y;
        let scroll = scroll_amount(delta, config);
        trace!(delta, scroll, "pan update");
        Some(scroll)
    }

    /// The pan is over.
    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Where wheel events for this pan are reported.
    pub fn origin(&self) -> Point16 {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScrollConfig {
        ScrollConfig {
            scale: 6,
            accel_dead_zone: 3,
            accel_exponent: 2.0,
            ..ScrollConfig::default()
        }
    }

    #[test]
    fn dead_zone_is_linear() {
        let config = config();
        for d in -2..=2 {
            assert_eq!(i32::from(scroll_amount(d, &config)), d * 6);
        }
    }

    #[test]
    fn acceleration_beyond_dead_zone() {
        let config = config();
        // (50 - 3)^2 * 6 + 3 * 6
        assert_eq!(scroll_amount(50, &config), 13272);
        assert_eq!(scroll_amount(-50, &config), -13272);
        // Dead zone boundary: no excess, only the linear part.
        assert_eq!(scroll_amount(3, &config), 18);
    }

    #[test]
    fn clamps_to_wheel_range() {
        let config = config();
        assert_eq!(scroll_amount(200, &config), i16::MAX);
        assert_eq!(scroll_amount(-200, &config), i16::MIN);
        assert_eq!(scroll_amount(i32::MAX, &config), i16::MAX);
        assert_eq!(scroll_amount(i32::MIN + 1, &config), i16::MIN);
    }

    #[test]
    fn fractional_exponent_truncates() {
        let config = ScrollConfig {
            scale: 1,
            accel_dead_zone: 0,
            accel_exponent: 0.5,
            ..ScrollConfig::default()
        };
        // sqrt(10) = 3.16..
        assert_eq!(scroll_amount(10, &config), 3);
        assert_eq!(scroll_amount(-10, &config), -3);
    }

    #[test]
    fn first_update_after_begin_is_swallowed() {
        let config = config();
        let mut pan = PanTranslator::default();
        pan.begin(Point16::new(1000, 700), 300);
        assert_eq!(pan.update(200, &config), None);
        assert_eq!(pan.update(199, &config), Some(-6));
        assert_eq!(pan.update(201, &config), Some(12));
    }

    #[test]
    fn updates_without_begin_are_ignored() {
        let mut pan = PanTranslator::default();
        assert_eq!(pan.update(50, &config()), None);
    }

    #[test]
    fn end_deactivates() {
        let config = config();
        let mut pan = PanTranslator::default();
        pan.begin(Point16::new(0, 0), 0);
        pan.end();
        assert!(!pan.is_active());
        assert_eq!(pan.update(10, &config), None);
    }
}
