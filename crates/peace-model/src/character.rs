//! Character state: ground truth, public self-image, and per-round buffers.

use std::collections::{BTreeMap, VecDeque};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{year_key, AssetBalance, Message, ResearchProject};

/// Number of action summaries kept in `recent_actions`.
pub const RECENT_ACTIONS_LIMIT: usize = 5;

/// Ground-truth state visible only to its owner (and to successful spies).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrivateInfo {
    pub true_asset_balance: AssetBalance,
    /// Budget per year, keyed by year string ("2024")
    #[serde(default)]
    pub budget: BTreeMap<String, f64>,
    #[serde(default)]
    pub projects: Vec<ResearchProject>,
    #[serde(default)]
    pub objectives: String,
    #[serde(default)]
    pub strategy: String,
}

impl PrivateInfo {
    pub fn new(true_asset_balance: AssetBalance) -> Self {
        Self {
            true_asset_balance,
            ..Self::default()
        }
    }

    pub fn with_budget(mut self, year: impl Into<String>, amount: f64) -> Self {
        self.budget.insert(year.into(), amount);
        self
    }

    pub fn with_objectives(mut self, objectives: impl Into<String>) -> Self {
        self.objectives = objectives.into();
        self
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// Budget for the year containing `date`, 0.0 if none was allocated.
    pub fn get_current_budget(&self, date: NaiveDate) -> f64 {
        self.budget.get(&year_key(date)).copied().unwrap_or(0.0)
    }

    /// Overwrites the budget for the year containing `date`.
    pub fn set_current_budget(&mut self, date: NaiveDate, amount: f64) {
        self.budget.insert(year_key(date), amount);
    }

    /// Adds `amount` to the budget for the year containing `date`.
    pub fn credit_budget(&mut self, date: NaiveDate, amount: f64) {
        let current = self.get_current_budget(date);
        self.set_current_budget(date, current + amount);
    }

    /// Removes `amount` from the current-year budget. Callers check
    /// sufficiency first.
    pub fn debit_budget(&mut self, date: NaiveDate, amount: f64) {
        let current = self.get_current_budget(date);
        self.set_current_budget(date, current - amount);
    }

    pub fn has_active_project(&self, name: &str) -> bool {
        self.projects.iter().any(|p| p.is_active() && p.name == name)
    }

    pub fn active_project_mut(&mut self, name: &str) -> Option<&mut ResearchProject> {
        self.projects
            .iter_mut()
            .find(|p| p.is_active() && p.name == name)
    }
}

/// The character's self-reported mirror of its private info. May diverge
/// from the truth; nothing ever reconciles the two.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicView {
    pub asset_balance: AssetBalance,
    #[serde(default)]
    pub stated_objectives: String,
    #[serde(default)]
    pub stated_strategy: String,
    #[serde(default)]
    pub public_artifacts: Vec<String>,
}

/// An espionage attempt awaiting disclosure at the end of the round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EspionageAttempt {
    pub target: String,
    pub focus: String,
    pub budget: f64,
    pub success: bool,
    pub round_number: u32,
}

/// A participant in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub name: String,
    pub private_info: PrivateInfo,
    pub public_view: PublicView,
    /// Last few resolved action summaries, oldest first
    #[serde(default)]
    pub recent_actions: VecDeque<String>,
    #[serde(default)]
    pub inbox: Vec<Message>,
    #[serde(default)]
    pub pending_espionage: Vec<EspionageAttempt>,
    #[serde(default)]
    pub pending_private_updates: Vec<String>,
}

impl CharacterState {
    pub fn new(name: impl Into<String>, private_info: PrivateInfo, public_view: PublicView) -> Self {
        Self {
            name: name.into(),
            private_info,
            public_view,
            recent_actions: VecDeque::with_capacity(RECENT_ACTIONS_LIMIT),
            inbox: Vec::new(),
            pending_espionage: Vec::new(),
            pending_private_updates: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.inbox.push(message);
    }

    /// Messages delivered during `round_number`.
    pub fn messages_for_round(&self, round_number: u32) -> impl Iterator<Item = &Message> {
        self.inbox
            .iter()
            .filter(move |m| m.round_number == round_number)
    }

    /// Appends an action summary, evicting the oldest beyond the limit.
    pub fn record_action(&mut self, summary: impl Into<String>) {
        self.recent_actions.push_back(summary.into());
        while self.recent_actions.len() > RECENT_ACTIONS_LIMIT {
            self.recent_actions.pop_front();
        }
    }

    pub fn queue_espionage(&mut self, attempt: EspionageAttempt) {
        self.pending_espionage.push(attempt);
    }

    pub fn drain_espionage(&mut self) -> Vec<EspionageAttempt> {
        std::mem::take(&mut self.pending_espionage)
    }

    pub fn queue_private_update(&mut self, update: impl Into<String>) {
        self.pending_private_updates.push(update.into());
    }

    pub fn drain_private_updates(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_private_updates)
    }
}
