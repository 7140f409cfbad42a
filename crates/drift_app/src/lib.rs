//! Drift Application
//!
//! Wires the motion driver and both reveal controllers onto a page and routes
//! host events between them.
//!
//! # Example
//!
//! ```
//! use drift_app::prelude::*;
//!
//! let mut host = HeadlessHost::new(Size::new(800.0, 600.0));
//! host.add_element(&["blob"], Rect::new(0.0, 0.0, 80.0, 80.0));
//! host.add_element(&["blob"], Rect::new(0.0, 0.0, 120.0, 120.0));
//!
//! let mut app = DriftApp::new().unwrap();
//! app.start(&mut host);
//! for _ in 0..60 {
//!     host.advance_frame();
//!     app.pump(&mut host);
//! }
//! assert_eq!(app.driver().frame_count(), 60);
//! ```
//!
//! Scenario files drive the same loop from JSON; see [`run_scenario`].

mod app;
mod config;
mod error;

pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;


pub use app::DriftApp;
pub use config::DriftConfig;
pub use error::{ConfigError, DriftError, Result};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{run_loaded_scenario, run_scenario, run_scenario_with_config, RunOutcome};
pub use headless_runtime::{HeadlessContext, HeadlessRunConfig, HeadlessRuntime};
pub use headless_scenario::{HeadlessScenario, ScenarioElement, ScenarioStep};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::DriftApp;
    pub use crate::config::DriftConfig;
    pub use crate::error::{ConfigError, DriftError, Result};

    pub use drift_animation::{AnimationDriver, MotionConfig};
    pub use drift_platform::{HeadlessHost, Host, HostEvent, RootMargin};
    pub use drift_reveal::{RevealConfig, StaggerConfig};

    // Core types
    pub use drift_core::{ElementId, Point, Rect, Size};
}
