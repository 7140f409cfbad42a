//! Motion tuning

use serde::{Deserialize, Serialize};

/// Class marking blob elements; the first becomes the pointer follower
pub const BLOB_MARKER: &str = "blob";
/// Slowest per-axis speed of a floating body, in pixels per frame
pub const MIN_SPEED: f32 = 0.5;
/// Fastest per-axis speed of a floating body, in pixels per frame
pub const MAX_SPEED: f32 = 2.0;
/// Fraction of the remaining distance the follower covers each frame
pub const FOLLOW_EASE: f32 = 0.02;

/// Motion settings, defaulting to the page's tuned values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub blob_marker: String,
    pub min_speed: f32,
    pub max_speed: f32,
    pub follow_ease: f32,
    /// Centre the follower on the pointer instead of hanging it off its corner
    pub center_on_pointer: bool,
    /// Seed for placement and launch randomness; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl MotionConfig {
    /// Random source honouring [`MotionConfig::seed`]
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            blob_marker: BLOB_MARKER.to_string(),
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            follow_ease: FOLLOW_EASE,
            center_on_pointer: true,
            seed: None,
        }
    }
}
