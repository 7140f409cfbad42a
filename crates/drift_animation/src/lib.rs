//! Drift Motion
//!
//! Per-frame motion for decorative page shapes.
//!
//! # Features
//!
//! - **Floating bodies**: squares bouncing elastically inside the viewport
//! - **Pointer follower**: a shape easing toward the latest pointer position
//! - **Driver**: a self-rescheduling frame loop advancing both in page order
//!
//! Randomness flows through a caller-owned [`fastrand::Rng`], so seeded runs
//! place and launch every body identically.

pub mod config;
pub mod driver;
pub mod floating;
pub mod follower;
pub mod random;

pub use config::MotionConfig;
pub use driver::{AnimationDriver, DriverState, Tracked};
pub use floating::FloatingBody;
pub use follower::PointerFollower;
pub use random::random_range;
