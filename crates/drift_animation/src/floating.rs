//! Floating bodies
//!
//! A square that drifts at constant speed and bounces elastically off the
//! viewport edges. Position is tracked in viewport space; what the caller
//! renders is the displacement from the initial placement, so the element's
//! static layout is written once and never re-read.

use drift_core::{Point, Size};
use fastrand::Rng;

use crate::config::MotionConfig;
use crate::random::{random_range, random_sign};

/// A single bouncing shape
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingBody {
    size: f32,
    initial: Point,
    position: Point,
    velocity: Point,
}

impl FloatingBody {
    /// Place a body of `bounding_width` at a random spot inside the viewport
    /// and launch it at a random speed on each axis.
    pub fn initialize(rng: &mut Rng, config: &MotionConfig, bounding_width: f32, viewport: Size) -> Self {
        let size = bounding_width;
        let initial = Point::new(
            random_range(rng, 0.0, (viewport.width - size).max(0.0)),
            random_range(rng, 0.0, (viewport.height - size).max(0.0)),
        );
        let velocity = Point::new(
            random_range(rng, config.min_speed, config.max_speed) * random_sign(rng),
            random_range(rng, config.min_speed, config.max_speed) * random_sign(rng),
        );
        Self::from_parts(size, initial, velocity)
    }

    /// A body at a known position and velocity
    pub fn from_parts(size: f32, position: Point, velocity: Point) -> Self {
        Self {
            size,
            initial: position,
            position,
            velocity,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn initial(&self) -> Point {
        self.initial
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Step one frame and return the offset from the initial placement.
    ///
    /// Reaching an edge clamps onto it and reverses that axis' velocity.
    pub fn advance(&mut self, viewport: Size) -> Point {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;

        bounce(
            &mut self.position.x,
            &mut self.velocity.x,
            viewport.width - self.size,
        );
        bounce(
            &mut self.position.y,
            &mut self.velocity.y,
            viewport.height - self.size,
        );

        Point::new(
            self.position.x - self.initial.x,
            self.position.y - self.initial.y,
        )
    }
}

/// Far edge first, then the origin: a body larger than the viewport settles at 0.
fn bounce(position: &mut f32, velocity: &mut f32, limit: f32) {
    if *position >= limit {
        *position = limit;
        *velocity = -*velocity;
    }
    if *position <= 0.0 {
        *position = 0.0;
        *velocity = -*velocity;
    }
}
