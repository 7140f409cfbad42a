//! Pointer follower
//!
//! A shape that trails the pointer with first-order easing: each frame it
//! covers a fixed fraction of the remaining distance, so it lags more the
//! faster the pointer moves and never overshoots.

use drift_core::{Event, EventData, Point, Size};

use crate::config::MotionConfig;

/// A shape easing toward the latest pointer position
#[derive(Clone, Debug, PartialEq)]
pub struct PointerFollower {
    size: f32,
    current: Point,
    target: Point,
    ease: f32,
    center_on_pointer: bool,
}

impl PointerFollower {
    /// Start at rest in the middle of the viewport
    pub fn initialize(config: &MotionConfig, bounding_width: f32, viewport: Size) -> Self {
        let center = viewport.center();
        Self {
            size: bounding_width,
            current: center,
            target: center,
            ease: config.follow_ease,
            center_on_pointer: config.center_on_pointer,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Point::new(x, y);
    }

    /// Retarget from a pointer or touch event.
    ///
    /// Touch follows the first active touch point; a touch event without one
    /// is ignored. Returns whether the target changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match &event.data {
            EventData::Pointer { x, y } => {
                self.set_target(*x, *y);
                true
            }
            EventData::Touch { .. } => match event.primary_touch() {
                Some(touch) => {
                    self.set_target(touch.x, touch.y);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// The element was re-measured after a viewport resize
    pub fn on_resize(&mut self, bounding_width: f32) {
        self.size = bounding_width;
    }

    /// Ease one frame toward the target and return the render position
    pub fn advance(&mut self) -> Point {
        self.current.x += (self.target.x - self.current.x) * self.ease;
        self.current.y += (self.target.y - self.current.y) * self.ease;

        let offset = if self.center_on_pointer {
            self.size / 2.0
        } else {
            0.0
        };
        Point::new(self.current.x - offset, self.current.y - offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::TouchPoint;

    fn follower() -> PointerFollower {
        PointerFollower::initialize(&MotionConfig::default(), 40.0, Size::new(800.0, 600.0))
    }

    #[test]
    fn test_starts_centered_at_rest() {
        let mut f = follower();
        assert_eq!(f.current(), Point::new(400.0, 300.0));
        assert_eq!(f.target(), f.current());
        assert_eq!(f.advance(), Point::new(380.0, 280.0));
    }

    #[test]
    fn test_geometric_convergence() {
        let mut f = follower();
        f.set_target(0.0, 600.0);
        let mut gap = (f.target().x - f.current().x).abs();
        for _ in 0..200 {
            f.advance();
            let next = (f.target().x - f.current().x).abs();
            assert!(next < gap);
            assert!((next - gap * (1.0 - 0.02)).abs() < 1e-3);
            gap = next;
        }
        // Never crosses the target
        assert!(f.current().x > 0.0);
        assert!(f.current().y < 600.0);
    }

    #[test]
    fn test_uncentered_render_position() {
        let config = MotionConfig {
            center_on_pointer: false,
            ..Default::default()
        };
        let mut f = PointerFollower::initialize(&config, 40.0, Size::new(800.0, 600.0));
        assert_eq!(f.advance(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_touch_uses_first_point() {
        let mut f = follower();
        let event = Event::touch_move([TouchPoint::new(10.0, 20.0), TouchPoint::new(99.0, 99.0)]);
        assert!(f.handle_event(&event));
        assert_eq!(f.target(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_empty_touch_is_ignored() {
        let mut f = follower();
        f.set_target(5.0, 5.0);
        assert!(!f.handle_event(&Event::touch_move(std::iter::empty())));
        assert_eq!(f.target(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_resize_updates_center_offset() {
        let mut f = follower();
        f.on_resize(100.0);
        assert_eq!(f.size(), 100.0);
        assert_eq!(f.advance(), Point::new(350.0, 250.0));
    }
}
