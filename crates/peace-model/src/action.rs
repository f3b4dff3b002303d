//! Actions submitted by characters each round.
//!
//! `ActionKind` is a closed set; each variant carries only its own fields.
//! Every field is optional. A missing field resolves to a no-op outcome, not
//! an error.
//!
//! Actions serialize as a flat JSON object with a `type` tag:
//!
//! ```
//! use peace_model::{Action, ActionKind};
//!
//! let action = Action::new("Amber Systems", ActionKind::Fundraise {
//!     amount: Some(1000.0),
//!     description: None,
//! });
//! let json = serde_json::to_value(&action).unwrap();
//! assert_eq!(json["type"], "fundraise");
//! assert_eq!(json["amount"], 1000.0);
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AssetBalance, OutgoingMessage};

/// Tag of an action variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Fundraise,
    CreateResearchProject,
    CancelResearchProject,
    InvestCapital,
    SellCapital,
    Espionage,
    PoachTalent,
    Lobby,
    Marketing,
    Message,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Fundraise => "fundraise",
            ActionType::CreateResearchProject => "create_research_project",
            ActionType::CancelResearchProject => "cancel_research_project",
            ActionType::InvestCapital => "invest_capital",
            ActionType::SellCapital => "sell_capital",
            ActionType::Espionage => "espionage",
            ActionType::PoachTalent => "poach_talent",
            ActionType::Lobby => "lobby",
            ActionType::Marketing => "marketing",
            ActionType::Message => "message",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to open a research project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchProposal {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `None` when the submitter gave no usable date
    #[serde(default)]
    pub target_completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub annual_budget: f64,
    #[serde(default)]
    pub required_assets: AssetBalance,
}

/// Type-specific payload of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    Fundraise {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    CreateResearchProject {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        project: Option<ResearchProposal>,
    },
    CancelResearchProject {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        project_name: Option<String>,
    },
    InvestCapital {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<f64>,
    },
    SellCapital {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<f64>,
    },
    Espionage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        budget: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        focus: Option<String>,
    },
    PoachTalent {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        budget: Option<f64>,
    },
    Lobby {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        budget: Option<f64>,
    },
    Marketing {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        budget: Option<f64>,
    },
    /// No primary action; used when only a message is sent, or as the
    /// synthetic placeholder for a character whose agent failed.
    Message,
}

impl ActionKind {
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionKind::Fundraise { .. } => ActionType::Fundraise,
            ActionKind::CreateResearchProject { .. } => ActionType::CreateResearchProject,
            ActionKind::CancelResearchProject { .. } => ActionType::CancelResearchProject,
            ActionKind::InvestCapital { .. } => ActionType::InvestCapital,
            ActionKind::SellCapital { .. } => ActionType::SellCapital,
            ActionKind::Espionage { .. } => ActionType::Espionage,
            ActionKind::PoachTalent { .. } => ActionType::PoachTalent,
            ActionKind::Lobby { .. } => ActionType::Lobby,
            ActionKind::Marketing { .. } => ActionType::Marketing,
            ActionKind::Message => ActionType::Message,
        }
    }
}

/// A single submitted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub character_name: String,
    /// Overwritten with the resolving round; never trusted from submitters
    #[serde(default)]
    pub round_number: u32,
    /// Private message delivered before any primary action resolves
    #[serde(
        default,
        rename = "outgoing_message",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<OutgoingMessage>,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl Action {
    pub fn new(character_name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            character_name: character_name.into(),
            round_number: 0,
            message: None,
            kind,
        }
    }

    /// A placeholder that changes nothing.
    pub fn no_op(character_name: impl Into<String>) -> Self {
        Self::new(character_name, ActionKind::Message)
    }

    pub fn with_message(mut self, message: OutgoingMessage) -> Self {
        self.message = Some(message);
        self
    }

    pub fn action_type(&self) -> ActionType {
        self.kind.action_type()
    }
}
