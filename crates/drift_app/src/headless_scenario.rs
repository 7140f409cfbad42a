//! Scenario definition for headless page runs.

use anyhow::Result;
use drift_core::{Rect, Size};
use serde::Deserialize;
use std::path::Path;

/// A page layout plus the steps to play against it.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    #[serde(default)]
    pub reduced_motion: bool,
    #[serde(default)]
    pub fragment: Option<String>,
    #[serde(default)]
    pub scroll_y: f32,
    #[serde(default)]
    pub elements: Vec<ScenarioElement>,
    pub steps: Vec<ScenarioStep>,
}

fn default_viewport() -> Size {
    Size::new(1280.0, 720.0)
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

/// One element on the scenario page, in document coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioElement {
    pub classes: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScenarioElement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Steps are played in order; elements are referenced by their index in
/// [`HeadlessScenario::elements`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Tick { frames: u32 },
    PointerMove { x: f32, y: f32 },
    TouchMove { touches: Vec<[f32; 2]> },
    Scroll { y: f32 },
    Wheel { delta_y: f32 },
    Resize { width: f32, height: f32 },
    AssertClass {
        element: usize,
        class: String,
        #[serde(default = "default_present")]
        present: bool,
    },
    AssertWithinViewport,
}

fn default_present() -> bool {
    true
}

impl ScenarioStep {
    /// Snake-case step name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::PointerMove { .. } => "pointer_move",
            ScenarioStep::TouchMove { .. } => "touch_move",
            ScenarioStep::Scroll { .. } => "scroll",
            ScenarioStep::Wheel { .. } => "wheel",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::AssertClass { .. } => "assert_class",
            ScenarioStep::AssertWithinViewport => "assert_within_viewport",
        }
    }
}
