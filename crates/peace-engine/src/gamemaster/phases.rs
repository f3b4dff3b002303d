//! Round phases that run around primary action resolution.

use rand::Rng;
use tracing::{debug, info, warn};

use peace_model::{format_money, Action, GameState, Message};

use super::GameMaster;

impl<R: Rng> GameMaster<R> {
    /// Delivers every attached outgoing message, stamped with the current
    /// date and round. Messages to unknown recipients are dropped.
    pub(super) fn deliver_messages(&mut self, state: &mut GameState, actions: &[Action]) {
        let date = state.current_date;
        let round = state.round_number;

        for action in actions {
            let Some(outgoing) = &action.message else {
                continue;
            };
            let Some(recipient) = state.get_character_mut(&outgoing.to_character) else {
                warn!(
                    from = %action.character_name,
                    to = %outgoing.to_character,
                    "Dropping message to unknown recipient"
                );
                continue;
            };
            recipient.add_message(Message {
                from_character: action.character_name.clone(),
                to_character: outgoing.to_character.clone(),
                content: outgoing.content.clone(),
                timestamp: date,
                round_number: round,
            });
        }
    }

    /// Advances each active project and charges its annual budget when the
    /// current year's budget can cover it. Unpaid projects keep running.
    pub(super) fn advance_research(&mut self, state: &mut GameState) {
        let date = state.current_date;
        let round = state.round_number;
        let base = self.config.research_base_rate;
        let divisor = self.config.research_human_divisor;
        let cap = self.config.research_max_rate;

        for character in state.characters_mut() {
            let private = &mut character.private_info;

            for i in 0..private.projects.len() {
                let project = &mut private.projects[i];
                if !project.is_active() {
                    continue;
                }
                let rate = (base + project.committed_assets.human / divisor).min(cap);
                if project.advance(rate, round) {
                    info!(
                        character = %character.name,
                        project = %project.name,
                        round,
                        "Research project completed"
                    );
                }

                let cost = project.committed_budget;
                if cost > 0.0 && private.get_current_budget(date) >= cost {
                    private.debit_budget(date, cost);
                }
            }
        }
    }

    /// Turns this round's espionage attempts into private updates for the
    /// spying character. Failed attempts only cost their budget.
    pub(super) fn disclose_espionage(&mut self, state: &mut GameState) {
        let date = state.current_date;

        // Drain first: each report reads another character's private state
        let mut attempts = Vec::new();
        for spy in state.characters_mut() {
            for attempt in spy.drain_espionage() {
                attempts.push((spy.name.clone(), attempt));
            }
        }

        let mut updates = Vec::new();
        for (spy, attempt) in attempts {
            if !attempt.success {
                continue;
            }
            let Some(target) = state.get_character(&attempt.target) else {
                continue;
            };
            let private = &target.private_info;
            let assets = private.true_asset_balance;
            updates.push((
                spy,
                format!(
                    "Espionage on {} ({}): Discovered budget ≈${}, assets: tech={:.1}, capital={:.1}, human={:.1}",
                    attempt.target,
                    attempt.focus,
                    format_money(private.get_current_budget(date)),
                    assets.technical_capability,
                    assets.capital,
                    assets.human,
                ),
            ));
        }

        for (spy, update) in updates {
            debug!(spy = %spy, "Espionage disclosed");
            if let Some(character) = state.get_character_mut(&spy) {
                character.queue_private_update(update);
            }
        }
    }

    /// With the configured probability, publishes one random character's
    /// true budget and human resources. The PublicView is left untouched.
    pub(super) fn simulate_information_leak(&mut self, state: &mut GameState) {
        if !self.chance(self.config.leak_probability) {
            return;
        }
        let Some(index) = self.pick_index(state.characters().len()) else {
            return;
        };

        let character = &state.characters()[index];
        let leak = format!(
            "Leaked intelligence reports suggest {} has approximately ${} in budget and {:.1} human resources.",
            character.name,
            format_money(character.private_info.get_current_budget(state.current_date)),
            character.private_info.true_asset_balance.human,
        );
        info!(character = %character.name, "Information leaked");
        state.public_events.push(leak);
    }

    /// With the configured probability, appends one event from the catalog.
    pub(super) fn introduce_world_event(&mut self, state: &mut GameState) {
        if !self.chance(self.config.world_event_probability) {
            return;
        }
        let Some(index) = self.pick_index(self.random_events.len()) else {
            return;
        };

        let event = format!("Round {}: {}", state.round_number, self.random_events[index]);
        info!(event = %event, "World event");
        state.public_events.push(event);
    }
}
