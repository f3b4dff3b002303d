//! Configuration and script files loaded from disk.

use std::io::Write;

use peace_engine::{
    AgentRoster, ConfigError, IdleAgent, ScenarioRegistry, ScriptedAgent, SimConfig, Simulation,
};

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_file_overrides_defaults() {
    let file = write_temp(
        r#"
[simulation]
max_rounds = 2
seed = 1234
round_step_days = 30

[gamemaster]
world_event_probability = 1.0
"#,
    );

    let config = SimConfig::from_file(file.path()).unwrap();

    assert_eq!(config.simulation.max_rounds, 2);
    assert_eq!(config.simulation.seed, Some(1234));
    assert_eq!(config.simulation.round_step_days, 30);
    assert_eq!(config.gamemaster.world_event_probability, 1.0);
    assert_eq!(config.gamemaster.fundraise_yield, 0.8);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SimConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_config_file() {
    let file = write_temp("[simulation\nmax_rounds = 2");
    let err = SimConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

/// Config and script together drive a whole scenario run
#[tokio::test]
async fn test_configured_scripted_run() {
    let config_file = write_temp(
        r#"
[simulation]
max_rounds = 2
seed = 5
round_step_days = 30

[gamemaster]
world_event_probability = 1.0
"#,
    );
    let script_file = write_temp(
        r#"{
  "Crimson Labs": [
    {"actions": [{"type": "invest_capital", "amount": 1000000000}],
     "messages": [{"to": "Blue Azure AI", "content": "Adopt our evals?"}]}
  ]
}"#,
    );

    let config = SimConfig::from_file(config_file.path()).unwrap();
    let scenario = ScenarioRegistry::builtin()
        .create(&config.simulation.scenario)
        .unwrap();
    let mut scripted = ScriptedAgent::load_script(script_file.path()).unwrap();

    let mut agents = AgentRoster::new();
    for name in scenario
        .create_game_state(config.simulation.start_date)
        .unwrap()
        .character_names()
    {
        match scripted.remove(&name) {
            Some(agent) => agents.insert(name, Box::new(agent)),
            None => agents.insert(name, Box::new(IdleAgent)),
        };
    }

    let report = Simulation::from_config(&config, scenario.as_ref(), agents)
        .unwrap()
        .run()
        .await
        .unwrap();

    let state = &report.final_state;
    assert_eq!(report.rounds_completed, 2);
    assert_eq!(
        state.current_date,
        chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    );

    // One world event per round with probability 1.0
    let world_events = state
        .public_events
        .iter()
        .filter(|e| e.starts_with("Round "))
        .count();
    assert_eq!(world_events, 2);

    let crimson = state.get_character("Crimson Labs").unwrap();
    assert_eq!(crimson.private_info.true_asset_balance.capital, 12_500_000_000.0 + 900_000_000.0);

    let azure = state.get_character("Blue Azure AI").unwrap();
    assert_eq!(azure.inbox.len(), 1);
    assert_eq!(azure.inbox[0].from_character, "Crimson Labs");
}
