//! Simulation Loop
//!
//! Drives the round cycle: query every agent, hand the collected actions to
//! the GameMaster, record the round. Agents are queried concurrently but
//! every decision is collected before any action resolves.

use std::collections::BTreeMap;
use std::time::Duration;

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use peace_model::{Action, GameState, RoundRecord};

use crate::agent::{Agent, AgentError, DecisionRequest};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::gamemaster::{GameMaster, PrivateSummaries};
use crate::output::HistoryLog;
use crate::scenario::Scenario;

pub const FIRST_ROUND_SUMMARY: &str = "This is the first round. No previous actions to summarize.";
pub const NO_PRIVATE_UPDATES_YET: &str = "No private updates available yet.";

/// Global summaries shown to agents each round.
const SUMMARY_WINDOW: usize = 3;

const DEFAULT_AGENT_TIMEOUT: Duration = Duration::from_secs(120);

/// Agents keyed by the character they play.
pub type AgentRoster = BTreeMap<String, Box<dyn Agent>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    NotStarted,
    /// `round` is the last completed round
    Running { round: u32 },
    Complete,
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub rounds_completed: u32,
    pub history: Vec<RoundRecord>,
    pub final_state: GameState,
}

pub struct Simulation {
    run_id: Uuid,
    state: GameState,
    gamemaster: GameMaster,
    agents: AgentRoster,
    game_context: String,
    max_rounds: u32,
    agent_timeout: Duration,
    history: Vec<RoundRecord>,
    /// Private summaries from the last resolved round
    last_private: PrivateSummaries,
    history_log: HistoryLog,
}

impl Simulation {
    /// Fails with `MissingAgent` unless every character has an agent.
    pub fn new(
        state: GameState,
        gamemaster: GameMaster,
        agents: AgentRoster,
        max_rounds: u32,
    ) -> Result<Self, SimError> {
        for name in state.character_names() {
            if !agents.contains_key(&name) {
                return Err(SimError::MissingAgent(name));
            }
        }
        for name in agents.keys() {
            if state.get_character(name).is_none() {
                warn!(character = %name, "Agent registered for unknown character");
            }
        }

        Ok(Self {
            run_id: Uuid::new_v4(),
            state,
            gamemaster,
            agents,
            game_context: String::new(),
            max_rounds,
            agent_timeout: DEFAULT_AGENT_TIMEOUT,
            history: Vec::new(),
            last_private: PrivateSummaries::new(),
            history_log: HistoryLog::null(),
        })
    }

    /// Builds a run from configuration and a scenario.
    pub fn from_config(
        config: &SimConfig,
        scenario: &dyn Scenario,
        agents: AgentRoster,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let loop_config = &config.simulation;
        let state = scenario
            .create_game_state(loop_config.start_date)?
            .with_round_step_days(loop_config.round_step_days);
        let gamemaster = GameMaster::new(config.gamemaster.clone(), loop_config.seed)
            .with_random_events(scenario.random_events());

        Ok(Self::new(state, gamemaster, agents, loop_config.max_rounds)?
            .with_game_context(scenario.game_context())
            .with_agent_timeout(Duration::from_secs(loop_config.agent_timeout_secs)))
    }

    pub fn with_game_context(mut self, context: impl Into<String>) -> Self {
        self.game_context = context.into();
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    pub fn with_history_log(mut self, log: HistoryLog) -> Self {
        self.history_log = log;
        self
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn status(&self) -> SimulationStatus {
        let round = self.state.round_number;
        if round >= self.max_rounds {
            SimulationStatus::Complete
        } else if round == 0 {
            SimulationStatus::NotStarted
        } else {
            SimulationStatus::Running { round }
        }
    }

    /// Runs one round and returns its record.
    pub async fn run_round(&mut self) -> Result<&RoundRecord, SimError> {
        if self.status() == SimulationStatus::Complete {
            return Err(SimError::AlreadyComplete(self.max_rounds));
        }

        // 1. Collect every decision before resolving anything
        let action_summary = self.action_summary();
        let mut actions = self.collect_actions(&action_summary).await;

        // 2. Resolve
        let private_summaries = self.gamemaster.process_round(&mut self.state, &mut actions);

        // 3. Record
        let record = RoundRecord {
            round: self.state.round_number,
            date: self.state.current_date,
            actions,
            global_summary: self.state.game_history.last().cloned().unwrap_or_default(),
            private_summaries: private_summaries.clone(),
        };
        self.history_log.log(&record)?;
        self.last_private = private_summaries;

        info!(
            run_id = %self.run_id,
            round = record.round,
            date = %record.date,
            actions = record.actions.len(),
            "Round complete"
        );
        self.history.push(record);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Runs the remaining rounds.
    pub async fn run(mut self) -> Result<SimulationReport, SimError> {
        info!(
            run_id = %self.run_id,
            characters = self.state.characters().len(),
            max_rounds = self.max_rounds,
            "Starting simulation"
        );
        while self.status() != SimulationStatus::Complete {
            self.run_round().await?;
        }
        self.history_log.flush()?;

        Ok(SimulationReport {
            run_id: self.run_id,
            rounds_completed: self.state.round_number,
            history: std::mem::take(&mut self.history),
            final_state: self.state.clone(),
        })
    }

    /// Last few global summaries, or the first-round placeholder.
    fn action_summary(&self) -> String {
        let history = &self.state.game_history;
        if history.is_empty() {
            return FIRST_ROUND_SUMMARY.to_string();
        }
        let start = history.len().saturating_sub(SUMMARY_WINDOW);
        history[start..].join("\n\n")
    }

    /// Queries every agent concurrently, in character order. Failures and
    /// timeouts become a single no-op for that character.
    async fn collect_actions(&self, action_summary: &str) -> Vec<Action> {
        let requests: Vec<DecisionRequest<'_>> = self
            .state
            .characters()
            .iter()
            .map(|character| DecisionRequest {
                character: &character.name,
                state: &self.state,
                game_context: &self.game_context,
                action_summary,
                private_updates: self
                    .last_private
                    .get(&character.name)
                    .map(String::as_str)
                    .unwrap_or(NO_PRIVATE_UPDATES_YET),
            })
            .collect();

        let decisions = join_all(requests.iter().map(|request| self.decide(request))).await;

        let mut actions = Vec::new();
        for (request, decision) in requests.iter().zip(decisions) {
            match decision {
                Ok(decided) => {
                    debug!(
                        character = %request.character,
                        count = decided.len(),
                        "Agent decided"
                    );
                    for mut action in decided {
                        if action.character_name != request.character {
                            warn!(
                                character = %request.character,
                                claimed = %action.character_name,
                                "Agent submitted action for another character"
                            );
                            action.character_name = request.character.to_string();
                        }
                        actions.push(action);
                    }
                }
                Err(e) => {
                    warn!(character = %request.character, error = %e, "Agent failed; substituting no-op");
                    actions.push(Action::no_op(request.character));
                }
            }
        }
        actions
    }

    async fn decide(&self, request: &DecisionRequest<'_>) -> Result<Vec<Action>, AgentError> {
        let agent = self
            .agents
            .get(request.character)
            .ok_or_else(|| AgentError::Failed(format!("no agent for {}", request.character)))?;

        match tokio::time::timeout(self.agent_timeout, agent.decide(request)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout(self.agent_timeout.as_secs())),
        }
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("run_id", &self.run_id)
            .field("round", &self.state.round_number)
            .field("max_rounds", &self.max_rounds)
            .field("agents", &self.agents.keys().collect::<Vec<_>>())
            .finish()
    }
}
