//! Round history records.
//!
//! One record per resolved round, capturing what was submitted and what every
//! party was told. Used for auditing runs and for the JSONL history log.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Action;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    /// Simulated date after the round's time step
    pub date: NaiveDate,
    pub actions: Vec<Action>,
    pub global_summary: String,
    pub private_summaries: BTreeMap<String, String>,
}

impl RoundRecord {
    /// Serializes to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub fn private_summary(&self, character: &str) -> Option<&str> {
        self.private_summaries.get(character).map(String::as_str)
    }
}
