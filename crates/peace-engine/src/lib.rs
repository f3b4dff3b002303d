//! Negotiation simulation engine.
//!
//! Runs a turn-based simulation in which autonomous characters (frontier AI
//! labs in the built-in scenario) fundraise, research, spy, poach talent,
//! lobby and message each other. A deterministic GameMaster resolves each
//! round against the shared [`peace_model::GameState`].
//!
//! # Architecture
//!
//! ```text
//! ┌────────┐  actions   ┌────────────┐  process_round  ┌────────────┐
//! │ agents │ ─────────▶ │ simulation │ ──────────────▶ │ gamemaster │
//! └────────┘            └────────────┘ ◀────────────── └────────────┘
//!      ▲                      │            summaries
//!      └──── briefings ───────┘
//! ```
//!
//! # Modules
//!
//! - [`gamemaster`]: Round resolution in a fixed phase order
//! - [`simulation`]: The outer round loop and history recording
//! - [`agent`]: The agent contract and built-in agents
//! - [`parse`]: Agent response parsing into typed actions
//! - [`scenario`]: Scenario trait, registry and the basic AI race
//! - [`config`]: TOML configuration
//! - [`output`]: JSONL round history log

pub mod agent;
pub mod config;
pub mod error;
pub mod gamemaster;
pub mod output;
pub mod parse;
pub mod scenario;
pub mod simulation;

pub use agent::{Agent, AgentError, DecisionRequest, IdleAgent, ScriptError, ScriptedAgent};
pub use config::{default_config_toml, ConfigError, GameMasterConfig, LoopConfig, SimConfig};
pub use error::SimError;
pub use gamemaster::{describe_action, GameMaster, PrivateSummaries};
pub use output::HistoryLog;
pub use parse::{parse_agent_response, parse_agent_value, ParseError};
pub use scenario::{BasicAiRace, Difficulty, ResearchTopic, Scenario, ScenarioError, ScenarioRegistry};
pub use simulation::{
    AgentRoster, Simulation, SimulationReport, SimulationStatus, FIRST_ROUND_SUMMARY,
    NO_PRIVATE_UPDATES_YET,
};
