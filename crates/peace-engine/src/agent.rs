//! Agent collaborators.
//!
//! An agent decides what one character does each round. The simulation only
//! needs the narrow [`Agent`] contract; how the decision is made (a language
//! model, a script, a human) is up to the implementation.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use peace_model::{format_money, Action, CharacterState, GameState};

use crate::parse::{parse_agent_value, ParseError};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent timed out after {0}s")]
    Timeout(u64),

    #[error("agent response could not be parsed: {0}")]
    Parse(#[from] ParseError),

    #[error("agent failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("script is not a JSON object of character rounds: {0}")]
    Json(#[from] serde_json::Error),

    #[error("round {round} for '{character}': {source}")]
    Round {
        character: String,
        round: usize,
        #[source]
        source: ParseError,
    },
}

/// Everything an agent is shown before deciding.
#[derive(Debug, Clone, Copy)]
pub struct DecisionRequest<'a> {
    pub character: &'a str,
    pub state: &'a GameState,
    pub game_context: &'a str,
    /// Recent global summaries, or a first-round placeholder
    pub action_summary: &'a str,
    /// This character's private summary from the previous round
    pub private_updates: &'a str,
}

impl<'a> DecisionRequest<'a> {
    /// The deciding character's own state.
    pub fn character_state(&self) -> Option<&'a CharacterState> {
        self.state.get_character(self.character)
    }

    /// Renders the round briefing an agent reads before acting.
    pub fn briefing(&self) -> String {
        let state = self.state;
        let mut out = String::new();
        let _ = writeln!(out, "## Game Context\n\n{}\n", self.game_context);
        let _ = writeln!(out, "## Current Game Date\n{}\n", state.current_date.format("%Y-%m-%d"));
        let _ = writeln!(out, "## Round {}\n", state.round_number);
        let _ = writeln!(out, "### Global Game State Summary\n{}\n", self.action_summary);

        let Some(me) = self.character_state() else {
            return out;
        };

        let recent = me.recent_actions.iter().cloned().collect::<Vec<_>>().join("\n");
        let _ = writeln!(
            out,
            "### Your Recent Actions\n{}\n",
            if recent.is_empty() { "None yet" } else { recent.as_str() }
        );

        let inbox: Vec<_> = me.messages_for_round(state.round_number).collect();
        if !inbox.is_empty() {
            let _ = writeln!(out, "## Private Messages Received:");
            for message in inbox {
                let _ = writeln!(out, "From {}: {}", message.from_character, message.content);
            }
            out.push('\n');
        }

        let _ = writeln!(out, "### Your Private Updates\n{}\n", self.private_updates);

        let private = &me.private_info;
        let assets = private.true_asset_balance;
        let _ = writeln!(
            out,
            "### Your Current Resources\n- Budget: ${}\n- Assets:\n  * Technical Capability: {:.2}\n  * Capital: {:.2}\n  * Human Resources: {:.2}\n",
            format_money(private.get_current_budget(state.current_date)),
            assets.technical_capability,
            assets.capital,
            assets.human,
        );

        let projects: Vec<String> = private
            .projects
            .iter()
            .filter(|p| p.is_active())
            .map(|p| {
                format!(
                    "- {}: {:.0}% complete, target: {}",
                    p.name,
                    p.progress * 100.0,
                    p.target_completion_date.format("%Y-%m-%d")
                )
            })
            .collect();
        let _ = write!(
            out,
            "### Active Research Projects\n{}",
            if projects.is_empty() {
                "None".to_string()
            } else {
                projects.join("\n")
            }
        );
        out
    }
}

#[async_trait]
pub trait Agent: Send + Sync {
    /// Decides this round's actions. Zero actions is a valid answer.
    async fn decide(&self, request: &DecisionRequest<'_>) -> Result<Vec<Action>, AgentError>;
}

/// Never acts.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleAgent;

#[async_trait]
impl Agent for IdleAgent {
    async fn decide(&self, request: &DecisionRequest<'_>) -> Result<Vec<Action>, AgentError> {
        Ok(vec![Action::no_op(request.character)])
    }
}

/// Replays a fixed list of actions per round, then idles.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    rounds: Vec<Vec<Action>>,
}

impl ScriptedAgent {
    /// `rounds[0]` is played in round 1.
    pub fn new(rounds: Vec<Vec<Action>>) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Loads one agent per character from a JSON script.
    ///
    /// The script maps character names to arrays of rounds; each round is an
    /// agent response object (`{"actions": [...], "messages": [...]}`).
    pub fn load_script(path: &Path) -> Result<BTreeMap<String, ScriptedAgent>, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_script(&content)
    }

    pub fn parse_script(content: &str) -> Result<BTreeMap<String, ScriptedAgent>, ScriptError> {
        let raw: BTreeMap<String, Vec<serde_json::Value>> = serde_json::from_str(content)?;

        let mut agents = BTreeMap::new();
        for (character, rounds) in raw {
            let mut parsed = Vec::with_capacity(rounds.len());
            for (i, round) in rounds.into_iter().enumerate() {
                let actions = parse_agent_value(&character, round).map_err(|source| {
                    ScriptError::Round {
                        character: character.clone(),
                        round: i + 1,
                        source,
                    }
                })?;
                parsed.push(actions);
            }
            agents.insert(character, ScriptedAgent::new(parsed));
        }
        Ok(agents)
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    async fn decide(&self, request: &DecisionRequest<'_>) -> Result<Vec<Action>, AgentError> {
        // The round about to be resolved is state.round_number + 1
        let index = request.state.round_number as usize;
        let actions = match self.rounds.get(index) {
            Some(actions) => actions
                .iter()
                .cloned()
                .map(|mut action| {
                    action.character_name = request.character.to_string();
                    action
                })
                .collect(),
            None => vec![Action::no_op(request.character)],
        };
        Ok(actions)
    }
}
