//! Drift Reveal Effects
//!
//! Viewport-driven class toggling for page content:
//!
//! - [`RevealController`]: replayable "in view" toggling for `reveal` elements,
//!   armed on the first sign of scrolling and skipped entirely under reduced motion
//! - [`StaggeredRevealController`]: one-shot fade-in for `project-card`
//!   elements, delayed in page order

pub mod config;
pub mod reveal;
pub mod stagger;

pub use config::{RevealConfig, StaggerConfig};
pub use reveal::{RevealController, RevealPhase};
pub use stagger::{CardState, StaggeredRevealController};
