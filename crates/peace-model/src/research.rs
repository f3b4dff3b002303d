//! Research project lifecycle.
//!
//! A project starts `Active` with zero progress, advances once per round and
//! ends in exactly one terminal state: `Completed` when progress reaches 1.0,
//! or `Cancelled` by its owner. Terminal projects are never mutated again.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AssetBalance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ProjectStatus::Active)
    }
}

/// A research project owned by one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchProject {
    /// Unique among the owner's active projects
    pub name: String,
    pub description: String,
    pub target_completion_date: NaiveDate,
    /// Annual budget drawn each round while active
    pub committed_budget: f64,
    /// Assets reserved for the project's lifetime
    pub committed_assets: AssetBalance,
    pub status: ProjectStatus,
    /// Fraction complete, always within [0.0, 1.0]
    pub progress: f64,
    /// Advisory note attached by the realism check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realistic_goals: Option<String>,
    pub started_round: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_round: Option<u32>,
}

impl ResearchProject {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        target_completion_date: NaiveDate,
        committed_budget: f64,
        committed_assets: AssetBalance,
        started_round: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            target_completion_date,
            committed_budget,
            committed_assets,
            status: ProjectStatus::Active,
            progress: 0.0,
            realistic_goals: None,
            started_round,
            completed_round: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Adds `rate` to progress, capped at 1.0. Returns true if the project
    /// completed on this call. No-op for terminal projects.
    pub fn advance(&mut self, rate: f64, round_number: u32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.progress = (self.progress + rate).min(1.0);
        if self.progress >= 1.0 {
            self.status = ProjectStatus::Completed;
            self.completed_round = Some(round_number);
            return true;
        }
        false
    }

    /// Marks the project cancelled and returns the refunded share of its
    /// committed assets. Returns `None` if the project is already terminal.
    pub fn cancel(&mut self, refund_fraction: f64) -> Option<AssetBalance> {
        if !self.is_active() {
            return None;
        }
        self.status = ProjectStatus::Cancelled;
        Some(self.committed_assets.scaled(refund_fraction))
    }
}
