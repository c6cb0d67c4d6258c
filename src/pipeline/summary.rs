//! Run summary reported once every selected phase has finished

use super::selection::Phase;
use crate::quality::QaReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub status: PhaseStatus,
    /// Zero, not absent, when the phase produced nothing
    pub items: usize,
    pub artifacts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl PhaseReport {
    pub fn is_success(&self) -> bool {
        self.status == PhaseStatus::Succeeded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub search_backend: String,
    pub phases: Vec<PhaseReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qa: Option<QaReport>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.phases.iter().filter(|p| p.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.phases.len() - self.succeeded()
    }

    /// True when phases ran and none of them produced output
    pub fn all_failed(&self) -> bool {
        !self.phases.is_empty() && self.succeeded() == 0
    }

    pub fn report(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &str> {
        self.phases
            .iter()
            .flat_map(|p| p.artifacts.iter().map(String::as_str))
    }
}
