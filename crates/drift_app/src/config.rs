//! Application configuration
//!
//! ```toml
//! [motion]
//! min_speed = 0.5
//! max_speed = 2.0
//! seed = 42
//!
//! [reveal]
//! root_margin = "0px 0px -10% 0px"
//! threshold = 0.1
//!
//! [stagger]
//! delay_step_ms = 100
//! ```

use std::path::Path;

use drift_animation::MotionConfig;
use drift_reveal::{RevealConfig, StaggerConfig};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for every Drift component. Missing sections and fields fall
/// back to the page defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub motion: MotionConfig,
    pub reveal: RevealConfig,
    pub stagger: StaggerConfig,
}

impl DriftConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let motion = &self.motion;
        if !(motion.min_speed > 0.0 && motion.min_speed <= motion.max_speed) {
            return Err(ConfigError::SpeedRange {
                min: motion.min_speed,
                max: motion.max_speed,
            });
        }
        if !(motion.follow_ease > 0.0 && motion.follow_ease <= 1.0) {
            return Err(ConfigError::FollowEase(motion.follow_ease));
        }
        check_threshold("reveal", self.reveal.threshold)?;
        check_threshold("stagger", self.stagger.threshold)?;

        for (name, value) in [
            ("motion.blob_marker", &motion.blob_marker),
            ("reveal.marker", &self.reveal.marker),
            ("reveal.in_view_class", &self.reveal.in_view_class),
            ("stagger.marker", &self.stagger.marker),
            ("stagger.visible_class", &self.stagger.visible_class),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
        }
        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Threshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_platform::{Length, RootMargin};

    #[test]
    fn test_empty_document_is_default() {
        let config = DriftConfig::from_toml_str("").unwrap();
        assert_eq!(config, DriftConfig::default());
        assert_eq!(config.reveal.root_margin.to_string(), "0px 0px -10% 0px");
        assert_eq!(config.stagger.delay_step_ms, 100);
    }

    #[test]
    fn test_partial_sections() {
        let config = DriftConfig::from_toml_str(
            r#"
            [motion]
            seed = 7
            max_speed = 3.0

            [reveal]
            root_margin = "20px 5%"
            arm_on_scroll_progress = true
            "#,
        )
        .unwrap();
        assert_eq!(config.motion.seed, Some(7));
        assert_eq!(config.motion.max_speed, 3.0);
        assert_eq!(config.motion.min_speed, 0.5);
        assert_eq!(
            config.reveal.root_margin,
            RootMargin {
                top: Length::Px(20.0),
                right: Length::Percent(5.0),
                bottom: Length::Px(20.0),
                left: Length::Percent(5.0),
            }
        );
        assert!(config.reveal.arm_on_scroll_progress);
        assert_eq!(config.stagger, StaggerConfig::default());
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = DriftConfig::from_toml_str("[motion]\nmin_speed = 3.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::SpeedRange { .. }));
    }

    #[test]
    fn test_rejects_bad_threshold_and_ease() {
        let err = DriftConfig::from_toml_str("[stagger]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Threshold { name: "stagger", .. }));

        let err = DriftConfig::from_toml_str("[motion]\nfollow_ease = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::FollowEase(_)));
    }

    #[test]
    fn test_rejects_bad_margin() {
        let err = DriftConfig::from_toml_str("[reveal]\nroot_margin = \"10em\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_marker() {
        let err = DriftConfig::from_toml_str("[reveal]\nmarker = \" \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Empty("reveal.marker")));
    }
}
