//! GameMaster: the round resolution engine.
//!
//! Consumes the actions submitted for a round, applies them to the game state
//! in a fixed phase order, and produces per-character private summaries.
//!
//! # Phases
//!
//! 1. Advance time
//! 2. Deliver messages
//! 3. Resolve primary actions, in submission order
//! 4. Advance research projects
//! 5. Disclose espionage outcomes
//! 6. Information leaks
//! 7. Random world events
//! 8. Summarize
//!
//! Every stochastic decision draws a uniform `f64` from the single random
//! stream owned by the GameMaster, in phase order. Two GameMasters with the
//! same seed fed the same actions produce identical state and summaries.

mod phases;
mod resolve;
mod summary;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use peace_model::{Action, GameState};

use crate::config::GameMasterConfig;

pub use summary::describe_action;

/// Private summaries keyed by character name.
pub type PrivateSummaries = BTreeMap<String, String>;

/// The deterministic arbiter of a simulation run.
#[derive(Debug)]
pub struct GameMaster<R = SmallRng> {
    config: GameMasterConfig,
    rng: R,
    /// Catalog drawn from by the world-event phase
    random_events: Vec<String>,
}

impl GameMaster<SmallRng> {
    /// Creates a GameMaster seeded with `seed`, or from entropy if `None`.
    pub fn new(config: GameMasterConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameMaster<R> {
    /// Creates a GameMaster drawing from the given random source.
    pub fn with_rng(config: GameMasterConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            random_events: Vec::new(),
        }
    }

    /// Sets the world-event catalog (usually supplied by the scenario).
    pub fn with_random_events(mut self, events: Vec<String>) -> Self {
        self.random_events = events;
        self
    }

    pub fn config(&self) -> &GameMasterConfig {
        &self.config
    }

    pub fn random_events(&self) -> &[String] {
        &self.random_events
    }

    /// Resolves one round.
    ///
    /// Mutates `state`, stamps every action with the new round number, appends
    /// the global summary to `state.game_history`, and returns each
    /// character's private summary. Game-level failures (missing fields,
    /// unknown targets, insufficient funds) resolve to no-op outcomes and
    /// never abort the round.
    pub fn process_round(
        &mut self,
        state: &mut GameState,
        actions: &mut [Action],
    ) -> PrivateSummaries {
        // 1. Advance time
        state.increment_round();
        info!(
            round = state.round_number,
            date = %state.current_date,
            actions = actions.len(),
            "Resolving round"
        );

        // 2. Deliver messages
        self.deliver_messages(state, actions);

        // 3. Resolve primary actions one at a time against the mutated state
        for action in actions.iter_mut() {
            action.round_number = state.round_number;
            self.resolve_action(state, action);
        }

        // 4. Advance research projects
        self.advance_research(state);

        // 5. Disclose espionage outcomes
        self.disclose_espionage(state);

        // 6. Information leaks
        self.simulate_information_leak(state);

        // 7. Random world events
        self.introduce_world_event(state);

        // 8. Summarize
        let global = self.global_summary(state, actions);
        state.game_history.push(global);
        let summaries = self.private_summaries(state);
        debug!(round = state.round_number, "Round resolved");
        summaries
    }

    /// Draws a uniform value in [0, 1).
    fn draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Bernoulli trial consuming one draw.
    fn chance(&mut self, probability: f64) -> bool {
        self.draw() < probability
    }

    /// Uniform index into a collection of `len` items, consuming one draw.
    /// Returns `None` without drawing when `len` is zero.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.draw() * len as f64) as usize;
        Some(index.min(len - 1))
    }

    #[cfg(test)]
    pub(crate) fn rng(&self) -> &R {
        &self.rng
    }
}
