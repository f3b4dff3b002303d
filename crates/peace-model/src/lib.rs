//! Shared state types for the negotiation simulation.
//!
//! This crate contains pure data structures with no resolution logic and no
//! randomness. It is a dependency for the engine crate, which owns all rules
//! for mutating these types.

pub mod action;
pub mod assets;
pub mod calendar;
pub mod character;
pub mod game_state;
pub mod history;
pub mod message;
pub mod research;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use action::{Action, ActionKind, ActionType, ResearchProposal};
pub use assets::AssetBalance;
pub use calendar::{format_money, parse_iso_date, year_key, DEFAULT_ROUND_STEP_DAYS};
pub use character::{CharacterState, EspionageAttempt, PrivateInfo, PublicView, RECENT_ACTIONS_LIMIT};
pub use game_state::{GameState, ModelError};
pub use history::RoundRecord;
pub use message::{Message, OutgoingMessage};
pub use research::{ProjectStatus, ResearchProject};
