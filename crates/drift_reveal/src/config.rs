//! Reveal tuning
//!
//! Defaults reproduce the page's presentation values.

use drift_platform::{Length, ObserverOptions, RootMargin};
use serde::{Deserialize, Serialize};

pub const REVEAL_MARKER: &str = "reveal";
pub const IN_VIEW_CLASS: &str = "in-view";
pub const REVEAL_THRESHOLD: f32 = 0.1;
/// Trigger once the element clears the bottom tenth of the viewport
pub const REVEAL_ROOT_MARGIN: RootMargin = RootMargin::bottom(Length::Percent(-10.0));

pub const CARD_MARKER: &str = "project-card";
pub const VISIBLE_CLASS: &str = "visible";
pub const CARD_THRESHOLD: f32 = 0.2;
pub const STAGGER_STEP_MS: u32 = 100;

/// Settings for [`crate::RevealController`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub marker: String,
    pub in_view_class: String,
    pub root_margin: RootMargin,
    pub threshold: f32,
    /// Arm only when a scroll-intent event shows the page moved down or away
    /// from the top, instead of on any scroll-intent event. The hand-written
    /// page script always gated this way; set it to `true` to match it.
    pub arm_on_scroll_progress: bool,
}

impl RevealConfig {
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions::new(self.root_margin, self.threshold)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            marker: REVEAL_MARKER.to_string(),
            in_view_class: IN_VIEW_CLASS.to_string(),
            root_margin: REVEAL_ROOT_MARGIN,
            threshold: REVEAL_THRESHOLD,
            arm_on_scroll_progress: false,
        }
    }
}

/// Settings for [`crate::StaggeredRevealController`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    pub marker: String,
    pub visible_class: String,
    pub threshold: f32,
    /// Delay between consecutive cards' transitions (ms)
    pub delay_step_ms: u32,
}

impl StaggerConfig {
    /// Transition delay for the card at `index` in page order
    pub fn delay_for_index(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.delay_step_ms.saturating_mul(index)
    }
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            marker: CARD_MARKER.to_string(),
            visible_class: VISIBLE_CLASS.to_string(),
            threshold: CARD_THRESHOLD,
            delay_step_ms: STAGGER_STEP_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_for_index() {
        let config = StaggerConfig::default();
        let delays: Vec<u32> = (0..5).map(|i| config.delay_for_index(i)).collect();
        assert_eq!(delays, vec![0, 100, 200, 300, 400]);
        assert_eq!(config.delay_for_index(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_default_reveal_options() {
        let options = RevealConfig::default().observer_options();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin.to_string(), "0px 0px -10% 0px");
    }
}
