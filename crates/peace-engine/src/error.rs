//! Errors that abort a simulation run.
//!
//! Game-level failures (bad fields, unknown targets, insufficient funds) are
//! never errors: the GameMaster resolves them to no-op outcomes. Agent
//! failures are absorbed by the loop. Only setup and I/O problems surface
//! here.

use thiserror::Error;

use crate::agent::ScriptError;
use crate::config::ConfigError;
use crate::scenario::ScenarioError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid game state: {0}")]
    Model(#[from] peace_model::ModelError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid agent script: {0}")]
    Script(#[from] ScriptError),

    #[error("no agent registered for character '{0}'")]
    MissingAgent(String),

    #[error("simulation already completed {0} rounds")]
    AlreadyComplete(u32),

    #[error("history log I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
