//! Test double for the GameMaster's random stream.

use std::collections::VecDeque;

use rand::RngCore;

use peace_model::GameState;

use super::GameMaster;
use crate::config::GameMasterConfig;

/// Value returned once the script runs out; above every default probability.
const EXHAUSTED: f64 = 0.999;

/// Replays a fixed sequence of uniform draws.
///
/// `gen::<f64>()` keeps the top 53 bits of `next_u64`, so each scripted
/// value is encoded back into those bits.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRng {
    draws: VecDeque<f64>,
    consumed: usize,
}

impl ScriptedRng {
    pub(crate) fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            consumed: 0,
        }
    }

    /// Number of draws taken so far, scripted or not.
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.consumed += 1;
        let value = self.draws.pop_front().unwrap_or(EXHAUSTED);
        ((value * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// A GameMaster with default rules and the given scripted draws.
pub(crate) fn scripted(draws: &[f64]) -> GameMaster<ScriptedRng> {
    GameMaster::with_rng(GameMasterConfig::default(), ScriptedRng::new(draws))
}

/// Draws consumed by the GameMaster so far.
pub(crate) fn consumed(gm: &GameMaster<ScriptedRng>) -> usize {
    gm.rng().consumed()
}

/// Looks up a character that the fixture is known to contain.
pub(crate) fn character<'a>(state: &'a GameState, name: &str) -> &'a peace_model::CharacterState {
    match state.get_character(name) {
        Some(character) => character,
        None => panic!("no character named {}", name),
    }
}
