//! Intersection root margins
//!
//! Parsed from the CSS margin shorthand accepted by `IntersectionObserver`
//! (`"0px 0px -10% 0px"`). Percentages resolve against the root's height for
//! the top and bottom edges and against its width for the left and right edges.

use std::fmt;
use std::str::FromStr;

use drift_core::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single margin edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    pub const ZERO: Length = Length::Px(0.0);

    /// Resolve against the root extent along this edge's axis
    pub fn resolve(&self, extent: f32) -> f32 {
        match *self {
            Length::Px(px) => px,
            Length::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{px}px"),
            Length::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Root margin parse failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarginParseError {
    #[error("root margin must have 1 to 4 values, got {0}")]
    Arity(usize),

    #[error("invalid root margin value '{0}': expected a px or % length")]
    Value(String),
}

impl FromStr for Length {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MarginParseError::Value(s.to_string());
        if let Some(pct) = s.strip_suffix('%') {
            return pct.parse().map(Length::Percent).map_err(|_| invalid());
        }
        if let Some(px) = s.strip_suffix("px") {
            return px.parse().map(Length::Px).map_err(|_| invalid());
        }
        // Unitless zero is the only bare number CSS accepts here
        match s.parse::<f32>() {
            Ok(v) if v == 0.0 => Ok(Length::ZERO),
            _ => Err(invalid()),
        }
    }
}

/// Margin applied to the intersection root before testing elements
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: Length::ZERO,
        right: Length::ZERO,
        bottom: Length::ZERO,
        left: Length::ZERO,
    };

    /// Shrink (negative) or grow (positive) only the bottom edge
    pub const fn bottom(bottom: Length) -> Self {
        Self {
            bottom,
            ..Self::ZERO
        }
    }

    /// Apply the margin to a root rect
    pub fn apply(&self, root: &Rect) -> Rect {
        root.expand(
            self.top.resolve(root.height()),
            self.right.resolve(root.width()),
            self.bottom.resolve(root.height()),
            self.left.resolve(root.width()),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for RootMargin {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(Length::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        match values.as_slice() {
            [all] => Ok(Self {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            }),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            other => Err(MarginParseError::Arity(other.len())),
        }
    }
}

impl TryFrom<String> for RootMargin {
    type Error = MarginParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}
