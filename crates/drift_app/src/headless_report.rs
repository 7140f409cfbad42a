//! Report output model for headless page runs.

use anyhow::Result;
use drift_platform::HeadlessHost;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Whether every scenario assertion held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// JSON summary of a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    /// Class additions and removals the page saw during the run
    pub class_changes: usize,
}

impl HeadlessReport {
    pub fn passed(host: &HeadlessHost) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            elapsed_frames: host.frames_delivered(),
            elapsed_ms: host.elapsed_ms().round() as u64,
            class_changes: host.class_history().len(),
        }
    }

    pub fn failed(assertion: &str, failed_step_index: usize, message: String, host: &HeadlessHost) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            ..Self::passed(host)
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = std::fs::File::create(path)?;
        self.write_to_writer(&mut file)
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
