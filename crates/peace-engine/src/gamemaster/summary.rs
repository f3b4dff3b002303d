//! Round summaries.
//!
//! The global summary is public: it lists what each character attempted
//! (never the outcome) and the most recent public events. Private summaries
//! carry espionage findings and research progress to their owner only.

use rand::Rng;

use peace_model::{format_money, Action, ActionKind, GameState, ProjectStatus};

use super::{GameMaster, PrivateSummaries};

const NO_PRIVATE_UPDATES: &str = "No significant private updates.";

impl<R: Rng> GameMaster<R> {
    /// Builds the public summary for the round just resolved.
    pub(super) fn global_summary(&self, state: &GameState, actions: &[Action]) -> String {
        let mut parts = vec![format!(
            "Round {} Summary ({}):",
            state.round_number,
            state.current_date.format("%Y-%m-%d")
        )];

        // Group by character, preserving first-appearance order
        let mut order: Vec<&str> = Vec::new();
        for action in actions {
            if !order.contains(&action.character_name.as_str()) {
                order.push(&action.character_name);
            }
        }
        for name in order {
            parts.push(format!("\n{}:", name));
            for action in actions.iter().filter(|a| a.character_name == name) {
                parts.push(format!("  - {}", describe_action(action)));
            }
        }

        if !state.public_events.is_empty() {
            parts.push("\nPublic Events:".to_string());
            let skip = state
                .public_events
                .len()
                .saturating_sub(self.config.summary_public_events);
            for event in &state.public_events[skip..] {
                parts.push(format!("  - {}", event));
            }
        }

        parts.join("\n")
    }

    /// Builds and drains each character's private updates.
    pub(super) fn private_summaries(&self, state: &mut GameState) -> PrivateSummaries {
        let round = state.round_number;
        let mut summaries = PrivateSummaries::new();

        for character in state.characters_mut() {
            let mut lines = character.drain_private_updates();

            for project in &character.private_info.projects {
                match project.status {
                    ProjectStatus::Completed if project.completed_round == Some(round) => {
                        lines.push(format!(
                            "Research project '{}' has been completed!",
                            project.name
                        ));
                    }
                    ProjectStatus::Active => lines.push(format!(
                        "Research project '{}' is {:.0}% complete.",
                        project.name,
                        project.progress * 100.0
                    )),
                    _ => {}
                }
            }

            let summary = if lines.is_empty() {
                NO_PRIVATE_UPDATES.to_string()
            } else {
                lines.join("\n")
            };
            summaries.insert(character.name.clone(), summary);
        }

        summaries
    }
}

/// Human-readable description of what an action attempted.
pub fn describe_action(action: &Action) -> String {
    match &action.kind {
        ActionKind::Fundraise { amount, .. } => format!(
            "Attempted fundraising of ${}",
            format_money(amount.unwrap_or(0.0))
        ),
        ActionKind::CreateResearchProject { project } => format!(
            "Created research project: {}",
            project.as_ref().map_or("unknown", |p| p.name.as_str())
        ),
        ActionKind::CancelResearchProject { project_name } => format!(
            "Cancelled research project: {}",
            project_name.as_deref().unwrap_or("unknown")
        ),
        ActionKind::InvestCapital { amount } => format!(
            "Invested ${} in capital",
            format_money(amount.unwrap_or(0.0))
        ),
        ActionKind::SellCapital { amount } => format!(
            "Sold ${} in capital",
            format_money(amount.unwrap_or(0.0))
        ),
        ActionKind::Espionage { target, .. } => format!(
            "Conducted espionage on {}",
            target.as_deref().unwrap_or("unknown")
        ),
        ActionKind::PoachTalent { target, .. } => format!(
            "Attempted to poach talent from {}",
            target.as_deref().unwrap_or("unknown")
        ),
        ActionKind::Lobby { .. } => "Launched lobbying campaign".to_string(),
        ActionKind::Marketing { .. } => "Launched marketing campaign".to_string(),
        ActionKind::Message => match &action.message {
            Some(message) => format!("Sent message to {}", message.to_character),
            None => "Took no action".to_string(),
        },
    }
}
