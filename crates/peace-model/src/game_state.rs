//! The shared world state mutated once per round.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CharacterState, DEFAULT_ROUND_STEP_DAYS};

/// Errors raised by invariant-preserving mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("character '{0}' is already registered")]
    DuplicateCharacter(String),
}

/// Complete simulation state.
///
/// `round_number` grows by exactly one per `increment_round`, and
/// `current_date` by exactly `round_step_days`. Characters keep their
/// insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub current_date: NaiveDate,
    pub round_number: u32,
    characters: Vec<CharacterState>,
    /// Globally visible events, append-only
    #[serde(default)]
    pub public_events: Vec<String>,
    /// One global summary per resolved round, append-only
    #[serde(default)]
    pub game_history: Vec<String>,
    #[serde(default = "default_round_step_days")]
    pub round_step_days: i64,
}

fn default_round_step_days() -> i64 {
    DEFAULT_ROUND_STEP_DAYS
}

impl GameState {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            current_date: start_date,
            round_number: 0,
            characters: Vec::new(),
            public_events: Vec::new(),
            game_history: Vec::new(),
            round_step_days: DEFAULT_ROUND_STEP_DAYS,
        }
    }

    pub fn with_round_step_days(mut self, days: i64) -> Self {
        self.round_step_days = days;
        self
    }

    /// Registers a character. Names are unique keys.
    pub fn add_character(&mut self, character: CharacterState) -> Result<(), ModelError> {
        if self.get_character(&character.name).is_some() {
            return Err(ModelError::DuplicateCharacter(character.name));
        }
        self.characters.push(character);
        Ok(())
    }

    /// Looks up a character by name. Absence is an ordinary outcome.
    pub fn get_character(&self, name: &str) -> Option<&CharacterState> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn get_character_mut(&mut self, name: &str) -> Option<&mut CharacterState> {
        self.characters.iter_mut().find(|c| c.name == name)
    }

    /// Mutable access to two distinct characters at once.
    ///
    /// Returns `None` if either is missing or both names are the same.
    pub fn get_pair_mut(
        &mut self,
        first: &str,
        second: &str,
    ) -> Option<(&mut CharacterState, &mut CharacterState)> {
        let i = self.characters.iter().position(|c| c.name == first)?;
        let j = self.characters.iter().position(|c| c.name == second)?;
        if i == j {
            return None;
        }
        if i < j {
            let (head, tail) = self.characters.split_at_mut(j);
            Some((&mut head[i], &mut tail[0]))
        } else {
            let (head, tail) = self.characters.split_at_mut(i);
            Some((&mut tail[0], &mut head[j]))
        }
    }

    /// Characters in insertion order.
    pub fn characters(&self) -> &[CharacterState] {
        &self.characters
    }

    pub fn characters_mut(&mut self) -> impl Iterator<Item = &mut CharacterState> {
        self.characters.iter_mut()
    }

    pub fn character_names(&self) -> Vec<String> {
        self.characters.iter().map(|c| c.name.clone()).collect()
    }

    /// Advances to the next round and moves the calendar forward one step.
    pub fn increment_round(&mut self) {
        self.round_number += 1;
        self.current_date += Duration::days(self.round_step_days);
    }

    /// Year key for budget lookups in the current round.
    pub fn current_year(&self) -> String {
        crate::year_key(self.current_date)
    }
}
