//! Scenario runner: builds a headless page, starts the app on it and plays
//! the scenario steps.

use anyhow::{bail, Result};
use drift_core::{ElementId, TouchPoint};
use drift_platform::{HeadlessHost, Host};

use crate::app::DriftApp;
use crate::config::DriftConfig;
use crate::headless_report::HeadlessReport;
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON with default configuration.
pub fn run_scenario(input: &str) -> Result<RunOutcome> {
    run_scenario_with_config(input, DriftConfig::default())
}

/// Execute scenario JSON with custom configuration.
pub fn run_scenario_with_config(input: &str, config: DriftConfig) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, config)
}

/// Build the scenario page in a fresh [`HeadlessHost`].
pub fn build_host(scenario: &HeadlessScenario) -> (HeadlessHost, Vec<ElementId>) {
    let mut host = HeadlessHost::new(scenario.viewport)
        .with_reduced_motion(scenario.reduced_motion)
        .with_scroll_y(scenario.scroll_y);
    if let Some(fragment) = &scenario.fragment {
        host = host.with_fragment(fragment.clone());
    }
    let ids = scenario
        .elements
        .iter()
        .map(|el| host.add_element(&el.classes, el.rect()))
        .collect();
    (host, ids)
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(scenario: &HeadlessScenario, config: DriftConfig) -> Result<RunOutcome> {
    let (mut host, ids) = build_host(scenario);
    let mut app = DriftApp::with_config(config)?;
    app.start(&mut host);
    app.pump(&mut host);

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step_index, step = step.name(), "scenario step");
        match step {
            ScenarioStep::Tick { frames } => {
                if *frames == 0 {
                    continue;
                }
                // A collapsed viewport is a valid page state; the runtime only
                // rejects zero dimensions configured by hand
                let viewport = host.viewport();
                let cfg = HeadlessRunConfig {
                    width: (viewport.width.round() as u32).max(1),
                    height: (viewport.height.round() as u32).max(1),
                    max_frames: *frames,
                };
                HeadlessRuntime::run(cfg, &mut app, &mut host, |_, _, _| {})?;
            }
            ScenarioStep::PointerMove { x, y } => {
                host.pointer_move(*x, *y);
                app.pump(&mut host);
            }
            ScenarioStep::TouchMove { touches } => {
                let touches: Vec<_> = touches.iter().map(|[x, y]| TouchPoint::new(*x, *y)).collect();
                host.touch_move(&touches);
                app.pump(&mut host);
            }
            ScenarioStep::Scroll { y } => {
                host.scroll_to(*y);
                app.pump(&mut host);
            }
            ScenarioStep::Wheel { delta_y } => {
                host.wheel(*delta_y);
                app.pump(&mut host);
            }
            ScenarioStep::Resize { width, height } => {
                host.resize(*width, *height);
                app.pump(&mut host);
            }
            ScenarioStep::AssertClass {
                element,
                class,
                present,
            } => {
                let Some(&id) = ids.get(*element) else {
                    bail!(
                        "step {step_index}: element index {element} out of range ({} elements)",
                        ids.len()
                    );
                };
                if host.has_class(id, class) != *present {
                    let expectation = if *present { "to have" } else { "not to have" };
                    let report = HeadlessReport::failed(
                        step.name(),
                        step_index,
                        format!("element {element}: expected {expectation} class '{class}'"),
                        &host,
                    );
                    return Ok(RunOutcome::Failed { report });
                }
            }
            ScenarioStep::AssertWithinViewport => {
                if let Some(message) = bodies_outside_viewport(&app, &host) {
                    let report = HeadlessReport::failed(step.name(), step_index, message, &host);
                    return Ok(RunOutcome::Failed { report });
                }
            }
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(&host),
    })
}

/// Describe the first floating body outside `[0, viewport - size]`
fn bodies_outside_viewport(app: &DriftApp, host: &HeadlessHost) -> Option<String> {
    let viewport = host.viewport();
    app.driver()
        .bodies()
        .iter()
        .enumerate()
        .find_map(|(index, tracked)| {
            let body = &tracked.body;
            let p = body.position();
            let max_x = (viewport.width - body.size()).max(0.0);
            let max_y = (viewport.height - body.size()).max(0.0);
            let inside = (0.0..=max_x).contains(&p.x) && (0.0..=max_y).contains(&p.y);
            (!inside).then(|| {
                format!(
                    "floating body {index} at ({}, {}) outside [0, {max_x}] x [0, {max_y}]",
                    p.x, p.y
                )
            })
        })
}
