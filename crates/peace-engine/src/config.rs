//! Configuration loading for the simulation.
//!
//! All settings can be loaded from a TOML file; every section and field is
//! optional and falls back to the reference values.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use peace_model::DEFAULT_ROUND_STEP_DAYS;

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Outer loop settings
    #[serde(default)]
    pub simulation: LoopConfig,
    /// Resolution rules
    #[serde(default)]
    pub gamemaster: GameMasterConfig,
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.gamemaster.validate()
    }
}

/// Settings for the round loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Registry id of the scenario to load
    pub scenario: String,
    /// Rounds to run; there is no early termination
    pub max_rounds: u32,
    /// Seed for the gamemaster's random stream; random if absent
    pub seed: Option<u64>,
    pub start_date: NaiveDate,
    /// Simulated days per round
    pub round_step_days: i64,
    /// Per-agent decision deadline
    pub agent_timeout_secs: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            scenario: "basic_ai_race".to_string(),
            max_rounds: 10,
            seed: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            round_step_days: DEFAULT_ROUND_STEP_DAYS,
            agent_timeout_secs: 120,
        }
    }
}

impl LoopConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.round_step_days <= 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.round_step_days",
                reason: "must be positive".into(),
            });
        }
        if self.agent_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.agent_timeout_secs",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

/// Probabilities and conversion rates used when resolving a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameMasterConfig {
    pub fundraise_success_probability: f64,
    /// Share of the requested amount actually credited
    pub fundraise_yield: f64,
    /// Capital gained per unit of budget invested
    pub invest_conversion_rate: f64,
    /// Budget gained per unit of capital sold
    pub sell_conversion_rate: f64,
    pub espionage_base_probability: f64,
    /// Budget that adds 1.0 to espionage success probability
    pub espionage_budget_scale: f64,
    pub espionage_max_probability: f64,
    pub poach_base_probability: f64,
    pub poach_budget_scale: f64,
    pub poach_max_probability: f64,
    /// Share of the target's human resource transferred on success
    pub poach_transfer_fraction: f64,
    pub poach_transfer_cap: f64,
    pub lobby_backfire_probability: f64,
    /// Share of committed assets returned on cancellation
    pub cancel_refund_fraction: f64,
    pub research_base_rate: f64,
    pub research_human_divisor: f64,
    pub research_max_rate: f64,
    pub leak_probability: f64,
    pub world_event_probability: f64,
    /// Public events quoted at the end of the global summary
    pub summary_public_events: usize,
    /// Minimum weighted resources per day of timeline (heuristic)
    pub realism_resources_per_day: f64,
    /// Days granted when the realism check extends a timeline
    pub realism_extension_days: i64,
    /// Characters of lobby/marketing text quoted in summaries
    pub campaign_excerpt_chars: usize,
}

impl Default for GameMasterConfig {
    fn default() -> Self {
        Self {
            fundraise_success_probability: 0.7,
            fundraise_yield: 0.8,
            invest_conversion_rate: 0.9,
            sell_conversion_rate: 0.7,
            espionage_base_probability: 0.3,
            espionage_budget_scale: 1_000_000.0,
            espionage_max_probability: 0.8,
            poach_base_probability: 0.2,
            poach_budget_scale: 500_000.0,
            poach_max_probability: 0.6,
            poach_transfer_fraction: 0.1,
            poach_transfer_cap: 5.0,
            lobby_backfire_probability: 0.1,
            cancel_refund_fraction: 0.5,
            research_base_rate: 0.1,
            research_human_divisor: 100.0,
            research_max_rate: 0.3,
            leak_probability: 0.05,
            world_event_probability: 0.10,
            summary_public_events: 5,
            realism_resources_per_day: 10.0,
            realism_extension_days: 365,
            campaign_excerpt_chars: 50,
        }
    }
}

impl GameMasterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("gamemaster.fundraise_success_probability", self.fundraise_success_probability),
            ("gamemaster.espionage_base_probability", self.espionage_base_probability),
            ("gamemaster.espionage_max_probability", self.espionage_max_probability),
            ("gamemaster.poach_base_probability", self.poach_base_probability),
            ("gamemaster.poach_max_probability", self.poach_max_probability),
            ("gamemaster.lobby_backfire_probability", self.lobby_backfire_probability),
            ("gamemaster.leak_probability", self.leak_probability),
            ("gamemaster.world_event_probability", self.world_event_probability),
            ("gamemaster.cancel_refund_fraction", self.cancel_refund_fraction),
            ("gamemaster.poach_transfer_fraction", self.poach_transfer_fraction),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{} is outside [0, 1]", value),
                });
            }
        }

        let divisors = [
            ("gamemaster.espionage_budget_scale", self.espionage_budget_scale),
            ("gamemaster.poach_budget_scale", self.poach_budget_scale),
            ("gamemaster.research_human_divisor", self.research_human_divisor),
        ];
        for (field, value) in divisors {
            if value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be positive".into(),
                });
            }
        }
        Ok(())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Returns the default configuration as a TOML string.
pub fn default_config_toml() -> Result<String, ConfigError> {
    SimConfig::default().to_toml()
}
