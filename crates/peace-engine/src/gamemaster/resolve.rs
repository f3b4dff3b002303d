//! Primary action resolution.
//!
//! Each handler validates its fields, checks resources against the state as
//! already mutated by earlier actions this round, applies its effect, and
//! returns a one-line outcome. Validation and resource failures consume no
//! randomness and leave state untouched.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use tracing::{debug, warn};

use peace_model::{
    format_money, Action, ActionKind, AssetBalance, CharacterState, EspionageAttempt, GameState,
    ResearchProject, ResearchProposal,
};

use super::GameMaster;

/// Treats absent, zero, negative and non-finite amounts as missing.
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Treats absent and blank strings as missing.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

impl<R: Rng> GameMaster<R> {
    /// Resolves one action and records its outcome on the acting character.
    pub(super) fn resolve_action(&mut self, state: &mut GameState, action: &Action) {
        if state.get_character(&action.character_name).is_none() {
            warn!(
                character = %action.character_name,
                "Dropping action from unknown character"
            );
            return;
        }

        let outcome = match &action.kind {
            ActionKind::Fundraise { amount, .. } => self.fundraise(state, action, *amount),
            ActionKind::CreateResearchProject { project } => {
                self.create_research(state, action, project.as_ref())
            }
            ActionKind::CancelResearchProject { project_name } => {
                self.cancel_research(state, action, project_name)
            }
            ActionKind::InvestCapital { amount } => self.invest_capital(state, action, *amount),
            ActionKind::SellCapital { amount } => self.sell_capital(state, action, *amount),
            ActionKind::Espionage {
                target,
                budget,
                focus,
            } => self.espionage(state, action, target, *budget, focus),
            ActionKind::PoachTalent { target, budget } => {
                self.poach_talent(state, action, target, *budget)
            }
            ActionKind::Lobby { message, budget } => self.lobby(state, action, message, *budget),
            ActionKind::Marketing { message, budget } => {
                self.marketing(state, action, message, *budget)
            }
            ActionKind::Message => match &action.message {
                Some(message) => format!("Sent private message to {}", message.to_character),
                None => "No primary action".to_string(),
            },
        };

        debug!(
            character = %action.character_name,
            action = %action.action_type(),
            outcome = %outcome,
            "Resolved action"
        );

        let round = state.round_number;
        if let Some(character) = state.get_character_mut(&action.character_name) {
            character.record_action(format!("Round {}: {}", round, outcome));
        }
    }

    fn fundraise(&mut self, state: &mut GameState, action: &Action, amount: Option<f64>) -> String {
        let Some(amount) = positive(amount) else {
            return "Fundraising action with no amount specified".to_string();
        };

        if !self.chance(self.config.fundraise_success_probability) {
            return format!(
                "Fundraising attempt for ${} was unsuccessful",
                format_money(amount)
            );
        }

        let raised = amount * self.config.fundraise_yield;
        let date = state.current_date;
        actor(state, action).private_info.credit_budget(date, raised);
        format!("Successfully raised ${}", format_money(raised))
    }

    fn create_research(
        &mut self,
        state: &mut GameState,
        action: &Action,
        proposal: Option<&ResearchProposal>,
    ) -> String {
        let Some(proposal) = proposal.filter(|p| !p.name.trim().is_empty()) else {
            return "Research project creation with no project details".to_string();
        };
        let date = state.current_date;
        let round = state.round_number;
        let config = &self.config;
        let character = actor(state, action);
        let private = &mut character.private_info;

        if private.has_active_project(&proposal.name) {
            return format!("Research project '{}' is already active", proposal.name);
        }

        let required = proposal.required_assets;
        if !required.is_non_negative() || !private.true_asset_balance.covers(&required) {
            return format!(
                "Insufficient resources to start research project '{}'",
                proposal.name
            );
        }

        let annual_budget = proposal.annual_budget.max(0.0);
        if private.get_current_budget(date) < annual_budget {
            return format!("Insufficient budget for research project '{}'", proposal.name);
        }

        let target_date = proposal
            .target_completion_date
            .unwrap_or(date + Duration::days(config.realism_extension_days));
        let mut project = ResearchProject::new(
            proposal.name.clone(),
            proposal.description.clone(),
            target_date,
            annual_budget,
            required,
            round,
        );

        private.true_asset_balance = private.true_asset_balance.subtract(&required);
        private.debit_budget(date, annual_budget);

        let extended = assess_realism(&mut project, date, config.realism_resources_per_day, config.realism_extension_days);
        private.projects.push(project);

        match extended {
            Some(new_date) => format!(
                "Created research project '{}' (timeline extended to {})",
                proposal.name, new_date
            ),
            None => format!("Created research project '{}'", proposal.name),
        }
    }

    fn cancel_research(
        &mut self,
        state: &mut GameState,
        action: &Action,
        project_name: &Option<String>,
    ) -> String {
        let Some(name) = non_blank(project_name) else {
            return "Cancel action with no project name".to_string();
        };
        let refund_fraction = self.config.cancel_refund_fraction;
        let private = &mut actor(state, action).private_info;

        let refund = private
            .active_project_mut(name)
            .and_then(|project| project.cancel(refund_fraction));
        match refund {
            Some(refund) => {
                private.true_asset_balance = private.true_asset_balance.add(&refund);
                format!("Cancelled research project '{}'", name)
            }
            None => format!("Could not find active research project '{}'", name),
        }
    }

    fn invest_capital(&mut self, state: &mut GameState, action: &Action, amount: Option<f64>) -> String {
        let Some(amount) = positive(amount) else {
            return "Capital investment with no amount".to_string();
        };
        let date = state.current_date;
        let rate = self.config.invest_conversion_rate;
        let private = &mut actor(state, action).private_info;

        if private.get_current_budget(date) < amount {
            return format!(
                "Insufficient budget for capital investment of ${}",
                format_money(amount)
            );
        }

        private.debit_budget(date, amount);
        private.true_asset_balance.capital += amount * rate;
        format!("Invested ${} in capital improvements", format_money(amount))
    }

    fn sell_capital(&mut self, state: &mut GameState, action: &Action, amount: Option<f64>) -> String {
        let Some(amount) = positive(amount) else {
            return "Sell capital with no amount".to_string();
        };
        let date = state.current_date;
        let rate = self.config.sell_conversion_rate;
        let private = &mut actor(state, action).private_info;

        if private.true_asset_balance.capital < amount {
            return format!("Insufficient capital to sell ${}", format_money(amount));
        }

        private.true_asset_balance.capital -= amount;
        private.credit_budget(date, amount * rate);
        format!("Sold ${} in capital assets", format_money(amount))
    }

    fn espionage(
        &mut self,
        state: &mut GameState,
        action: &Action,
        target: &Option<String>,
        budget: Option<f64>,
        focus: &Option<String>,
    ) -> String {
        let (Some(target), Some(budget), Some(focus)) =
            (non_blank(target), positive(budget), non_blank(focus))
        else {
            return "Espionage action with no details".to_string();
        };
        if target == action.character_name {
            return "Espionage cannot target yourself".to_string();
        }
        if state.get_character(target).is_none() {
            return format!("Target character '{}' not found", target);
        }

        let date = state.current_date;
        let round = state.round_number;
        if actor(state, action).private_info.get_current_budget(date) < budget {
            return "Insufficient budget for espionage".to_string();
        }
        actor(state, action).private_info.debit_budget(date, budget);

        let probability = (self.config.espionage_base_probability
            + budget / self.config.espionage_budget_scale)
            .min(self.config.espionage_max_probability);
        let success = self.chance(probability);

        actor(state, action).queue_espionage(EspionageAttempt {
            target: target.to_string(),
            focus: focus.to_string(),
            budget,
            success,
            round_number: round,
        });

        format!(
            "Conducted espionage on {} ({})",
            target,
            if success { "success" } else { "failed" }
        )
    }

    fn poach_talent(
        &mut self,
        state: &mut GameState,
        action: &Action,
        target: &Option<String>,
        budget: Option<f64>,
    ) -> String {
        let (Some(target), Some(budget)) = (non_blank(target), positive(budget)) else {
            return "Poaching action with no target or budget".to_string();
        };
        if target == action.character_name {
            return "Poaching cannot target yourself".to_string();
        }
        let date = state.current_date;
        let Some((poacher, victim)) = state.get_pair_mut(&action.character_name, target) else {
            return format!("Target character '{}' not found", target);
        };

        if poacher.private_info.get_current_budget(date) < budget {
            return "Insufficient budget for poaching".to_string();
        }
        poacher.private_info.debit_budget(date, budget);

        let probability = (self.config.poach_base_probability
            + budget / self.config.poach_budget_scale)
            .min(self.config.poach_max_probability);
        if !self.chance(probability) {
            return format!("Poaching attempt on {} failed", target);
        }

        let transfer = (victim.private_info.true_asset_balance.human
            * self.config.poach_transfer_fraction)
            .min(self.config.poach_transfer_cap)
            .max(0.0);
        victim.private_info.true_asset_balance.human -= transfer;
        poacher.private_info.true_asset_balance.human += transfer;
        format!(
            "Successfully poached talent from {} (gained {:.1} human resources)",
            target, transfer
        )
    }

    fn lobby(
        &mut self,
        state: &mut GameState,
        action: &Action,
        message: &Option<String>,
        budget: Option<f64>,
    ) -> String {
        let (Some(message), Some(budget)) = (non_blank(message), positive(budget)) else {
            return "Lobbying action with no message or budget".to_string();
        };
        let date = state.current_date;
        let private = &mut actor(state, action).private_info;
        if private.get_current_budget(date) < budget {
            return "Insufficient budget for lobbying".to_string();
        }
        private.debit_budget(date, budget);

        let text = excerpt(message, self.config.campaign_excerpt_chars);
        if self.chance(self.config.lobby_backfire_probability) {
            format!("Lobbying campaign backfired: {}...", text)
        } else {
            format!("Launched lobbying campaign: {}...", text)
        }
    }

    fn marketing(
        &mut self,
        state: &mut GameState,
        action: &Action,
        message: &Option<String>,
        budget: Option<f64>,
    ) -> String {
        let (Some(message), Some(budget)) = (non_blank(message), positive(budget)) else {
            return "Marketing action with no message or budget".to_string();
        };
        let date = state.current_date;
        let private = &mut actor(state, action).private_info;
        if private.get_current_budget(date) < budget {
            return "Insufficient budget for marketing".to_string();
        }
        private.debit_budget(date, budget);

        format!(
            "Launched marketing campaign: {}...",
            excerpt(message, self.config.campaign_excerpt_chars)
        )
    }
}

/// The acting character. `resolve_action` has already checked it exists.
fn actor<'a>(state: &'a mut GameState, action: &Action) -> &'a mut CharacterState {
    match state.get_character_mut(&action.character_name) {
        Some(character) => character,
        None => unreachable!("acting character '{}' vanished mid-round", action.character_name),
    }
}

/// Extends unrealistic timelines to `extension_days` past `today`.
///
/// Heuristic: weighted resources (human + 0.5 tech + 0.3 capital) times the
/// requested days must reach `per_day` units per day of timeline. Returns the
/// new target date when the timeline was extended.
pub(crate) fn assess_realism(
    project: &mut ResearchProject,
    today: NaiveDate,
    per_day: f64,
    extension_days: i64,
) -> Option<NaiveDate> {
    let days = (project.target_completion_date - today).num_days() as f64;
    let assets = &project.committed_assets;
    let weighted = weighted_resources(assets);

    if weighted * days < days * per_day {
        let extended = today + Duration::days(extension_days);
        project.target_completion_date = extended;
        project.realistic_goals =
            Some("Timeline extended to be more realistic given available resources.".to_string());
        return Some(extended);
    }
    None
}

fn weighted_resources(assets: &AssetBalance) -> f64 {
    assets.human + assets.technical_capability * 0.5 + assets.capital * 0.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamemaster::testing::{character, consumed, scripted};
    use peace_model::fixtures::{self, ALPHA, BETA};
    use peace_model::ProjectStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn budget(state: &GameState, name: &str) -> f64 {
        character(state, name)
            .private_info
            .get_current_budget(state.current_date)
    }

    fn last_outcome(state: &GameState, name: &str) -> String {
        character(state, name)
            .recent_actions
            .back()
            .cloned()
            .unwrap_or_default()
    }

    fn fundraise(amount: Option<f64>) -> Action {
        Action::new(
            ALPHA,
            ActionKind::Fundraise {
                amount,
                description: None,
            },
        )
    }

    fn proposal(name: &str, required: AssetBalance, annual_budget: f64) -> Action {
        Action::new(
            ALPHA,
            ActionKind::CreateResearchProject {
                project: Some(ResearchProposal {
                    name: name.into(),
                    description: "Test project".into(),
                    target_completion_date: Some(date(2026, 1, 1)),
                    annual_budget,
                    required_assets: required,
                }),
            },
        )
    }

    #[test]
    fn test_fundraise_success_credits_yield() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[0.5]);

        gm.process_round(&mut state, &mut [fundraise(Some(1_000.0))]);

        assert_eq!(budget(&state, ALPHA), 5_000_800.0);
        assert_eq!(last_outcome(&state, ALPHA), "Round 1: Successfully raised $800");
    }

    #[test]
    fn test_fundraise_failure_leaves_budget() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[0.75]);

        gm.process_round(&mut state, &mut [fundraise(Some(1_000.0))]);

        assert_eq!(budget(&state, ALPHA), 5_000_000.0);
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Fundraising attempt for $1,000 was unsuccessful"
        );
    }

    #[test]
    fn test_missing_fields_consume_no_randomness() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);

        gm.process_round(
            &mut state,
            &mut [
                fundraise(None),
                fundraise(Some(-5.0)),
                Action::new(
                    BETA,
                    ActionKind::Espionage {
                        target: Some(ALPHA.into()),
                        budget: Some(1_000.0),
                        focus: None,
                    },
                ),
            ],
        );

        // Only the leak and world-event rolls
        assert_eq!(consumed(&gm), 2);
        assert_eq!(budget(&state, ALPHA), 5_000_000.0);
        assert_eq!(budget(&state, BETA), 2_000_000.0);
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Fundraising action with no amount specified"
        );
        assert_eq!(
            last_outcome(&state, BETA),
            "Round 1: Espionage action with no details"
        );
    }

    #[test]
    fn test_create_rejects_insufficient_resources() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);
        let before = character(&state, ALPHA).private_info.true_asset_balance;

        gm.process_round(
            &mut state,
            &mut [proposal("Moonshot", AssetBalance::new(10.0, 0.0, 500.0), 0.0)],
        );

        let alpha = character(&state, ALPHA);
        assert!(alpha.private_info.projects.is_empty());
        assert_eq!(alpha.private_info.true_asset_balance, before);
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Insufficient resources to start research project 'Moonshot'"
        );
    }

    #[test]
    fn test_create_rejects_insufficient_budget() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);

        gm.process_round(
            &mut state,
            &mut [proposal("Moonshot", AssetBalance::new(1.0, 1.0, 1.0), 9_000_000.0)],
        );

        assert!(character(&state, ALPHA).private_info.projects.is_empty());
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Insufficient budget for research project 'Moonshot'"
        );
    }

    #[test]
    fn test_create_then_cancel_refunds_half_of_assets_only() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);
        let required = AssetBalance::new(10.0, 100_000.0, 20.0);

        gm.process_round(&mut state, &mut [proposal("Evals", required, 1_000_000.0)]);

        let alpha = character(&state, ALPHA);
        assert_eq!(
            alpha.private_info.true_asset_balance,
            AssetBalance::new(70.0, 900_000.0, 80.0)
        );
        // Deducted at creation, then charged once by the research phase
        assert_eq!(budget(&state, ALPHA), 3_000_000.0);
        assert_eq!(alpha.private_info.projects[0].progress, 0.3);
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Created research project 'Evals'"
        );

        gm.process_round(
            &mut state,
            &mut [Action::new(
                ALPHA,
                ActionKind::CancelResearchProject {
                    project_name: Some("Evals".into()),
                },
            )],
        );

        let alpha = character(&state, ALPHA);
        assert_eq!(
            alpha.private_info.true_asset_balance,
            AssetBalance::new(75.0, 950_000.0, 90.0)
        );
        assert_eq!(budget(&state, ALPHA), 3_000_000.0);
        assert_eq!(alpha.private_info.projects[0].status, ProjectStatus::Cancelled);
        assert_eq!(alpha.private_info.projects[0].progress, 0.3);
    }

    #[test]
    fn test_cancel_unknown_project() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);

        gm.process_round(
            &mut state,
            &mut [Action::new(
                ALPHA,
                ActionKind::CancelResearchProject {
                    project_name: Some("Ghost".into()),
                },
            )],
        );

        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Could not find active research project 'Ghost'"
        );
    }

    #[test]
    fn test_duplicate_active_project_rejected() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);
        let required = AssetBalance::new(1.0, 1_000.0, 20.0);

        gm.process_round(
            &mut state,
            &mut [
                proposal("Evals", required, 0.0),
                proposal("Evals", required, 0.0),
            ],
        );

        assert_eq!(character(&state, ALPHA).private_info.projects.len(), 1);
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Research project 'Evals' is already active"
        );
    }

    #[test]
    fn test_invest_and_sell_conversion_rates() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);

        gm.process_round(
            &mut state,
            &mut [Action::new(
                ALPHA,
                ActionKind::InvestCapital {
                    amount: Some(100_000.0),
                },
            )],
        );
        assert_eq!(
            character(&state, ALPHA).private_info.true_asset_balance.capital,
            1_090_000.0
        );
        assert_eq!(budget(&state, ALPHA), 4_900_000.0);

        gm.process_round(
            &mut state,
            &mut [Action::new(
                ALPHA,
                ActionKind::SellCapital {
                    amount: Some(90_000.0),
                },
            )],
        );
        assert_eq!(
            character(&state, ALPHA).private_info.true_asset_balance.capital,
            1_000_000.0
        );
        assert_eq!(budget(&state, ALPHA), 4_963_000.0);
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 2: Sold $90,000 in capital assets"
        );
    }

    #[test]
    fn test_actions_resolve_against_mutated_state() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);
        let invest = || {
            Action::new(
                ALPHA,
                ActionKind::InvestCapital {
                    amount: Some(3_000_000.0),
                },
            )
        };

        gm.process_round(&mut state, &mut [invest(), invest()]);

        assert_eq!(budget(&state, ALPHA), 2_000_000.0);
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Insufficient budget for capital investment of $3,000,000"
        );
    }

    #[test]
    fn test_sell_more_capital_than_held() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);

        gm.process_round(
            &mut state,
            &mut [Action::new(
                BETA,
                ActionKind::SellCapital {
                    amount: Some(600_000.0),
                },
            )],
        );

        assert_eq!(
            character(&state, BETA).private_info.true_asset_balance.capital,
            500_000.0
        );
        assert_eq!(
            last_outcome(&state, BETA),
            "Round 1: Insufficient capital to sell $600,000"
        );
    }

    #[test]
    fn test_poach_success_conserves_human_resources() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[0.1]);

        gm.process_round(
            &mut state,
            &mut [Action::new(
                ALPHA,
                ActionKind::PoachTalent {
                    target: Some(BETA.into()),
                    budget: Some(100_000.0),
                },
            )],
        );

        let alpha = character(&state, ALPHA).private_info.true_asset_balance.human;
        let beta = character(&state, BETA).private_info.true_asset_balance.human;
        assert_eq!(alpha, 104.0);
        assert_eq!(beta, 36.0);
        assert_eq!(alpha + beta, 140.0);
        assert_eq!(budget(&state, ALPHA), 4_900_000.0);
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Successfully poached talent from Beta Lab (gained 4.0 human resources)"
        );
    }

    #[test]
    fn test_poach_failure_still_costs_budget() {
        let mut state = fixtures::two_lab_state();
        // Probability is 0.2 + 100k/500k = 0.4
        let mut gm = scripted(&[0.45]);

        gm.process_round(
            &mut state,
            &mut [Action::new(
                ALPHA,
                ActionKind::PoachTalent {
                    target: Some(BETA.into()),
                    budget: Some(100_000.0),
                },
            )],
        );

        assert_eq!(character(&state, BETA).private_info.true_asset_balance.human, 40.0);
        assert_eq!(budget(&state, ALPHA), 4_900_000.0);
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Poaching attempt on Beta Lab failed"
        );
    }

    #[test]
    fn test_poach_unknown_or_self_target() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[]);
        let poach = |target: &str| {
            Action::new(
                ALPHA,
                ActionKind::PoachTalent {
                    target: Some(target.into()),
                    budget: Some(1_000.0),
                },
            )
        };

        gm.process_round(&mut state, &mut [poach("Nobody"), poach(ALPHA)]);

        assert_eq!(consumed(&gm), 2);
        assert_eq!(budget(&state, ALPHA), 5_000_000.0);
        let recent: Vec<_> = character(&state, ALPHA).recent_actions.iter().cloned().collect();
        assert_eq!(
            recent,
            vec![
                "Round 1: Target character 'Nobody' not found".to_string(),
                "Round 1: Poaching cannot target yourself".to_string(),
            ]
        );
    }

    #[test]
    fn test_espionage_success_discloses_privately() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[0.5]);

        let summaries = gm.process_round(
            &mut state,
            &mut [Action::new(
                ALPHA,
                ActionKind::Espionage {
                    target: Some(BETA.into()),
                    budget: Some(500_000.0),
                    focus: Some("research".into()),
                },
            )],
        );

        assert_eq!(
            summaries[ALPHA],
            "Espionage on Beta Lab (research): Discovered budget ≈$2,000,000, \
             assets: tech=60.0, capital=500000.0, human=40.0"
        );
        assert_eq!(summaries[BETA], "No significant private updates.");
        assert_eq!(budget(&state, ALPHA), 4_500_000.0);
        assert!(!state.game_history[0].contains("Discovered"));
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Conducted espionage on Beta Lab (success)"
        );
    }

    #[test]
    fn test_espionage_failure_reveals_nothing() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[0.9]);

        let summaries = gm.process_round(
            &mut state,
            &mut [Action::new(
                ALPHA,
                ActionKind::Espionage {
                    target: Some(BETA.into()),
                    budget: Some(500_000.0),
                    focus: Some("research".into()),
                },
            )],
        );

        assert_eq!(summaries[ALPHA], "No significant private updates.");
        assert_eq!(budget(&state, ALPHA), 4_500_000.0);
        assert!(character(&state, ALPHA).pending_espionage.is_empty());
        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Conducted espionage on Beta Lab (failed)"
        );
    }

    #[test]
    fn test_lobby_backfire_and_marketing() {
        let mut state = fixtures::two_lab_state();
        let mut gm = scripted(&[0.05]);
        let long_message = "x".repeat(80);

        gm.process_round(
            &mut state,
            &mut [
                Action::new(
                    ALPHA,
                    ActionKind::Lobby {
                        message: Some("Regulate compute".into()),
                        budget: Some(10_000.0),
                    },
                ),
                Action::new(
                    BETA,
                    ActionKind::Marketing {
                        message: Some(long_message),
                        budget: Some(20_000.0),
                    },
                ),
            ],
        );

        assert_eq!(
            last_outcome(&state, ALPHA),
            "Round 1: Lobbying campaign backfired: Regulate compute..."
        );
        assert_eq!(
            last_outcome(&state, BETA),
            format!("Round 1: Launched marketing campaign: {}...", "x".repeat(50))
        );
        assert_eq!(budget(&state, ALPHA), 4_990_000.0);
        assert_eq!(budget(&state, BETA), 1_980_000.0);
        // One lobby roll plus leak and world event; marketing is deterministic
        assert_eq!(consumed(&gm), 3);
    }

    #[test]
    fn test_unknown_actor_is_skipped() {
        let mut state = fixtures::two_lab_state();
        let before = state.clone();
        let mut gm = scripted(&[]);

        gm.process_round(
            &mut state,
            &mut [Action::new(
                "Stranger",
                ActionKind::InvestCapital {
                    amount: Some(1.0),
                },
            )],
        );

        assert_eq!(state.characters(), before.characters());
    }

    #[test]
    fn test_realism_check_extends_thin_timelines() {
        // Heuristic, not a correctness contract
        let today = date(2024, 4, 1);
        let mut thin = ResearchProject::new(
            "Thin",
            "",
            date(2024, 6, 1),
            0.0,
            AssetBalance::new(2.0, 0.0, 1.0),
            1,
        );
        let extended = assess_realism(&mut thin, today, 10.0, 365);
        assert_eq!(extended, Some(date(2025, 4, 1)));
        assert_eq!(thin.target_completion_date, date(2025, 4, 1));
        assert!(thin.realistic_goals.is_some());

        let mut staffed = ResearchProject::new(
            "Staffed",
            "",
            date(2024, 6, 1),
            0.0,
            AssetBalance::new(0.0, 0.0, 20.0),
            1,
        );
        assert_eq!(assess_realism(&mut staffed, today, 10.0, 365), None);
        assert_eq!(staffed.target_completion_date, date(2024, 6, 1));
        assert!(staffed.realistic_goals.is_none());
    }
}
