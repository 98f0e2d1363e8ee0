//! Report output model for headless site runs.

use crate::headless_assert::SiteSnapshot;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    /// Site state when the run stopped
    pub snapshot: SiteSnapshot,
}

impl ScenarioReport {
    pub fn passed(elapsed_frames: u64, elapsed_ms: u64, snapshot: SiteSnapshot) -> Self {
        Self {
            scenario: None,
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            code: None,
            message: None,
            elapsed_frames,
            elapsed_ms,
            snapshot,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        code: String,
        message: String,
        elapsed_frames: u64,
        elapsed_ms: u64,
        snapshot: SiteSnapshot,
    ) -> Self {
        Self {
            scenario: None,
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            code: Some(code),
            message: Some(message),
            elapsed_frames,
            elapsed_ms,
            snapshot,
        }
    }

    pub fn with_scenario(mut self, name: Option<String>) -> Self {
        self.scenario = name;
        self
    }

    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    /// Write the report as pretty JSON to `path`, relative to the working
    /// directory or absolute. Missing parent directories are created.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() || path.is_dir() {
            bail!("report path {} is not a file path", path.display());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create {}", parent.display()))?;
            }
        }
        let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_absolute_path_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/nested/out.json");
        assert!(path.is_absolute());

        let report = ScenarioReport::passed(12, 200, SiteSnapshot::default());
        report.write_to_path(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["status"], "passed");
        assert_eq!(value["elapsed_frames"], 12);
    }

    #[test]
    fn test_rejects_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        let report = ScenarioReport::passed(0, 0, SiteSnapshot::default());
        assert!(report.write_to_path(dir.path()).is_err());
        assert!(report.write_to_path(Path::new("")).is_err());
    }

    #[test]
    fn test_json_shape() {
        let report = ScenarioReport::failed(
            "assert_mode",
            3,
            "mode_mismatch".to_string(),
            "expected theme kawaii, got portfolio".to_string(),
            10,
            160,
            SiteSnapshot::default(),
        );
        let mut out = Vec::new();
        report.write_to_writer(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["failed_step_index"], 3);
        assert_eq!(value["code"], "mode_mismatch");
        assert!(value.get("scenario").is_none());
    }
}
