//! Agent response boundary.
//!
//! Agents answer in free text that should contain one JSON object:
//!
//! ```json
//! {"actions": [{"type": "fundraise", "amount": 1000000}],
//!  "messages": [{"to": "Crimson Labs", "content": "..."}]}
//! ```
//!
//! The object is decoded through a strict schema with a fixed set of accepted
//! key spellings, then mapped once into typed [`Action`]s. Unknown action
//! types and unknown keys are rejected rather than guessed at.

use serde::Deserialize;
use thiserror::Error;

use peace_model::{
    parse_iso_date, Action, ActionKind, AssetBalance, OutgoingMessage, ResearchProposal,
};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in agent response")]
    NoJsonObject,

    #[error("invalid JSON in agent response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unknown action type '{0}'")]
    UnknownActionType(String),

    #[error("invalid field in {action} action: {reason}")]
    InvalidField {
        action: &'static str,
        reason: String,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResponse {
    #[serde(default)]
    actions: Vec<RawAction>,
    #[serde(default)]
    messages: Vec<RawMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMessage {
    #[serde(alias = "to_character")]
    to: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAction {
    #[serde(rename = "type", alias = "action_type")]
    action_type: String,
    #[serde(
        default,
        alias = "fundraising_amount",
        alias = "capital_investment",
        alias = "capital_to_sell"
    )]
    amount: Option<f64>,
    #[serde(default, alias = "fundraising_description")]
    description: Option<String>,
    #[serde(default, alias = "research_project")]
    project: Option<RawProject>,
    #[serde(default, alias = "project_name_to_cancel")]
    project_name: Option<String>,
    #[serde(default, alias = "target_character", alias = "poaching_target")]
    target: Option<String>,
    #[serde(
        default,
        alias = "poaching_budget",
        alias = "lobbying_budget",
        alias = "marketing_budget"
    )]
    budget: Option<f64>,
    #[serde(default)]
    focus: Option<String>,
    #[serde(default, alias = "lobbying_message", alias = "marketing_message")]
    message: Option<String>,
    #[serde(default)]
    espionage: Option<RawEspionage>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEspionage {
    #[serde(default, alias = "target_character")]
    target: Option<String>,
    #[serde(default)]
    budget: Option<f64>,
    #[serde(default)]
    focus: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProject {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    target_completion_date: Option<String>,
    #[serde(default)]
    annual_budget: f64,
    #[serde(default)]
    required_assets: AssetBalance,
}

impl RawAction {
    fn into_kind(self) -> Result<ActionKind, ParseError> {
        let kind = match self.action_type.trim().to_ascii_lowercase().as_str() {
            "fundraise" => ActionKind::Fundraise {
                amount: self.amount,
                description: self.description,
            },
            "create_research_project" => ActionKind::CreateResearchProject {
                project: self.project.map(RawProject::into_proposal),
            },
            "cancel_research_project" => ActionKind::CancelResearchProject {
                project_name: self.project_name,
            },
            "invest_capital" => ActionKind::InvestCapital {
                amount: self.amount,
            },
            "sell_capital" => ActionKind::SellCapital {
                amount: self.amount,
            },
            "espionage" => {
                // Nested object wins over flat keys
                let (target, budget, focus) = match self.espionage {
                    Some(nested) => (nested.target, nested.budget, nested.focus),
                    None => (self.target, self.budget, self.focus),
                };
                ActionKind::Espionage {
                    target,
                    budget,
                    focus,
                }
            }
            "poach_talent" => ActionKind::PoachTalent {
                target: self.target,
                budget: self.budget,
            },
            "lobby" => ActionKind::Lobby {
                message: self.message,
                budget: self.budget,
            },
            "marketing" => ActionKind::Marketing {
                message: self.message,
                budget: self.budget,
            },
            "message" => ActionKind::Message,
            other => return Err(ParseError::UnknownActionType(other.to_string())),
        };
        Ok(kind)
    }
}

impl RawProject {
    /// Unparseable dates become `None`; the GameMaster picks a default.
    fn into_proposal(self) -> ResearchProposal {
        ResearchProposal {
            name: self.name,
            description: self.description,
            target_completion_date: self
                .target_completion_date
                .as_deref()
                .and_then(parse_iso_date),
            annual_budget: self.annual_budget,
            required_assets: self.required_assets,
        }
    }
}

/// Slices from the first `{` to the last `}`.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parses an agent's free-text response into actions for `character`.
///
/// Messages are attached to actions one each, in order. Messages beyond the
/// number of actions become standalone MESSAGE actions, so every message is
/// delivered exactly once. A response with neither actions nor messages
/// yields a single no-op.
pub fn parse_agent_response(character: &str, text: &str) -> Result<Vec<Action>, ParseError> {
    let json = extract_json_object(text).ok_or(ParseError::NoJsonObject)?;
    let raw: RawResponse = serde_json::from_str(json)?;
    parse_raw(character, raw)
}

/// Parses an already-decoded response object.
pub fn parse_agent_value(
    character: &str,
    value: serde_json::Value,
) -> Result<Vec<Action>, ParseError> {
    let raw: RawResponse = serde_json::from_value(value)?;
    parse_raw(character, raw)
}

fn parse_raw(character: &str, raw: RawResponse) -> Result<Vec<Action>, ParseError> {
    let mut actions = raw
        .actions
        .into_iter()
        .map(|a| a.into_kind().map(|kind| Action::new(character, kind)))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(m) = raw.messages.iter().find(|m| m.to.trim().is_empty()) {
        return Err(ParseError::InvalidField {
            action: "message",
            reason: format!("no recipient for message '{}'", m.content),
        });
    }

    let mut messages = raw.messages.into_iter();
    for action in actions.iter_mut() {
        match messages.next() {
            Some(m) => action.message = Some(OutgoingMessage::new(m.to, m.content)),
            None => break,
        }
    }
    for m in messages {
        actions.push(Action::no_op(character).with_message(OutgoingMessage::new(m.to, m.content)));
    }

    if actions.is_empty() {
        actions.push(Action::no_op(character));
    }
    Ok(actions)
}
