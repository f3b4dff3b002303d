//! Scenarios
//!
//! A scenario supplies the initial cast, the shared context text agents are
//! briefed with, the research topics on offer and the world-event catalog.
//! Scenarios are looked up by id in an explicit registry.

mod ai_race;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use peace_model::{GameState, ModelError};

pub use ai_race::BasicAiRace;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unknown scenario '{id}' (known: {known})")]
    UnknownScenario { id: String, known: String },

    #[error("scenario setup failed: {0}")]
    Setup(#[from] ModelError),
}

/// Relative difficulty of a research topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Medium,
    High,
    VeryHigh,
    ExtremelyHigh,
}

/// A research direction characters may open projects in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchTopic {
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub base_cost: f64,
}

/// A game setup.
pub trait Scenario: Send + Sync {
    /// Registry id, e.g. `basic_ai_race`.
    fn id(&self) -> &'static str;

    /// Builds the round-0 state with every character in place.
    fn create_game_state(&self, start_date: NaiveDate) -> Result<GameState, ScenarioError>;

    /// Shared briefing text given to every agent.
    fn game_context(&self) -> String;

    fn research_topics(&self) -> Vec<ResearchTopic>;

    /// Catalog for the world-event phase.
    fn random_events(&self) -> Vec<String>;
}

type Constructor = fn() -> Box<dyn Scenario>;

/// Maps scenario ids to constructors.
#[derive(Clone, Default)]
pub struct ScenarioRegistry {
    constructors: BTreeMap<&'static str, Constructor>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in scenario.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ai_race::ID, ai_race::boxed);
        registry
    }

    pub fn register(&mut self, id: &'static str, constructor: Constructor) {
        self.constructors.insert(id, constructor);
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.constructors.keys().copied().collect()
    }

    pub fn create(&self, id: &str) -> Result<Box<dyn Scenario>, ScenarioError> {
        match self.constructors.get(id) {
            Some(constructor) => Ok(constructor()),
            None => Err(ScenarioError::UnknownScenario {
                id: id.to_string(),
                known: self.ids().join(", "),
            }),
        }
    }
}

impl std::fmt::Debug for ScenarioRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
