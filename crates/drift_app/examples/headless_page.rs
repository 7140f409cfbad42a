//! Headless Page Example
//!
//! Plays a short visit against an in-memory portfolio page and prints the
//! run report as JSON.
//!
//! Run with: cargo run -p drift_app --example headless_page
//! Set `RUST_LOG=drift=debug` (or `trace`) to watch the components work.

use anyhow::Result;
use drift_app::{run_scenario_with_config, DriftConfig};
use tracing_subscriber::EnvFilter;

const SCENARIO: &str = r#"{
    "viewport": { "width": 1280, "height": 800 },
    "elements": [
        { "classes": ["blob"], "x": 0, "y": 0, "width": 40, "height": 40 },
        { "classes": ["blob"], "x": 0, "y": 0, "width": 220, "height": 220 },
        { "classes": ["blob"], "x": 0, "y": 0, "width": 160, "height": 160 },
        { "classes": ["reveal"], "x": 160, "y": 140, "width": 960, "height": 320 },
        { "classes": ["reveal"], "x": 160, "y": 1100, "width": 960, "height": 400 },
        { "classes": ["project-card"], "x": 160, "y": 1800, "width": 300, "height": 360 },
        { "classes": ["project-card"], "x": 490, "y": 1800, "width": 300, "height": 360 },
        { "classes": ["project-card"], "x": 820, "y": 1800, "width": 300, "height": 360 }
    ],
    "steps": [
        { "type": "tick", "frames": 60 },
        { "type": "pointer_move", "x": 640, "y": 200 },
        { "type": "tick", "frames": 30 },
        { "type": "wheel", "delta_y": 120 },
        { "type": "assert_class", "element": 3, "class": "in-view" },
        { "type": "scroll", "y": 900 },
        { "type": "assert_class", "element": 4, "class": "in-view" },
        { "type": "scroll", "y": 1700 },
        { "type": "assert_class", "element": 7, "class": "visible" },
        { "type": "tick", "frames": 120 },
        { "type": "assert_within_viewport" }
    ]
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DriftConfig::from_toml_str(
        r#"
        [motion]
        seed = 7
        "#,
    )?;

    let outcome = run_scenario_with_config(SCENARIO, config)?;
    outcome.report().write_to_writer(&mut std::io::stdout())?;

    if outcome.is_failed() {
        anyhow::bail!("scenario failed");
    }
    Ok(())
}
