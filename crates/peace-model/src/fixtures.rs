//! Sample state for tests in other crates.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! ```ignore
//! // [dev-dependencies]
//! // peace-model = { path = "../peace-model", features = ["test-fixtures"] }
//!
//! use peace_model::fixtures;
//!
//! let state = fixtures::two_lab_state();
//! ```

use chrono::NaiveDate;

use crate::{AssetBalance, CharacterState, GameState, PrivateInfo, PublicView};

pub const ALPHA: &str = "Alpha Lab";
pub const BETA: &str = "Beta Lab";

/// 2024-01-01, the usual start date.
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// A character with the given true assets and a budget for 2024 and 2025.
pub fn lab(name: &str, assets: AssetBalance, budget: f64) -> CharacterState {
    let private_info = PrivateInfo::new(assets)
        .with_budget("2024", budget)
        .with_budget("2025", budget)
        .with_objectives(format!("{} wants to lead the field.", name))
        .with_strategy("Move carefully.");
    let public_view = PublicView {
        asset_balance: assets.scaled(1.2),
        stated_objectives: "Build beneficial systems.".into(),
        stated_strategy: "Responsible scaling.".into(),
        public_artifacts: vec![format!("{} Assistant", name)],
    };
    CharacterState::new(name, private_info, public_view)
}

/// Two labs with generous budgets.
///
/// - Alpha: tech 80, capital 1,000,000, human 100, budget 5,000,000
/// - Beta: tech 60, capital 500,000, human 40, budget 2,000,000
pub fn two_lab_state() -> GameState {
    let mut state = GameState::new(start_date());
    let labs = [
        lab(ALPHA, AssetBalance::new(80.0, 1_000_000.0, 100.0), 5_000_000.0),
        lab(BETA, AssetBalance::new(60.0, 500_000.0, 40.0), 2_000_000.0),
    ];
    for character in labs {
        if let Err(e) = state.add_character(character) {
            panic!("fixture characters must be unique: {}", e);
        }
    }
    state
}
