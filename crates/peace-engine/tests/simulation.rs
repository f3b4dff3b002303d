//! Full simulation runs with scripted and misbehaving agents.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use peace_engine::{
    Agent, AgentError, AgentRoster, DecisionRequest, GameMaster, GameMasterConfig, HistoryLog,
    IdleAgent, ScriptedAgent, SimError, Simulation, SimulationStatus, FIRST_ROUND_SUMMARY,
    NO_PRIVATE_UPDATES_YET,
};
use peace_model::fixtures::{self, ALPHA, BETA};
use peace_model::{Action, ActionKind, GameState, OutgoingMessage, RoundRecord};

/// Always fails.
struct BrokenAgent;

#[async_trait]
impl Agent for BrokenAgent {
    async fn decide(&self, _request: &DecisionRequest<'_>) -> Result<Vec<Action>, AgentError> {
        Err(AgentError::Failed("model endpoint unreachable".into()))
    }
}

/// Never answers in time.
struct StalledAgent;

#[async_trait]
impl Agent for StalledAgent {
    async fn decide(&self, request: &DecisionRequest<'_>) -> Result<Vec<Action>, AgentError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec![Action::new(
            request.character,
            ActionKind::InvestCapital {
                amount: Some(1.0),
            },
        )])
    }
}

/// Records what it was shown each round.
#[derive(Default)]
struct RecordingAgent {
    seen: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Agent for RecordingAgent {
    async fn decide(&self, request: &DecisionRequest<'_>) -> Result<Vec<Action>, AgentError> {
        self.seen.lock().unwrap().push((
            request.action_summary.to_string(),
            request.private_updates.to_string(),
        ));
        Ok(Vec::new())
    }
}

/// Shares a RecordingAgent with the test body.
struct Shared(std::sync::Arc<RecordingAgent>);

#[async_trait]
impl Agent for Shared {
    async fn decide(&self, request: &DecisionRequest<'_>) -> Result<Vec<Action>, AgentError> {
        self.0.decide(request).await
    }
}

fn gamemaster() -> GameMaster {
    GameMaster::new(GameMasterConfig::default(), Some(11))
}

fn roster(alpha: Box<dyn Agent>, beta: Box<dyn Agent>) -> AgentRoster {
    let mut roster = AgentRoster::new();
    roster.insert(ALPHA.to_string(), alpha);
    roster.insert(BETA.to_string(), beta);
    roster
}

fn invest(character: &str, amount: f64) -> Action {
    Action::new(
        character,
        ActionKind::InvestCapital {
            amount: Some(amount),
        },
    )
}

#[tokio::test]
async fn test_status_progression_and_completion() {
    let alpha = ScriptedAgent::new(vec![
        vec![invest(ALPHA, 100_000.0)],
        vec![invest(ALPHA, 200_000.0)],
    ]);
    let mut sim = Simulation::new(
        fixtures::two_lab_state(),
        gamemaster(),
        roster(Box::new(alpha), Box::new(IdleAgent)),
        3,
    )
    .unwrap();

    assert_eq!(sim.status(), SimulationStatus::NotStarted);

    let record = sim.run_round().await.unwrap();
    assert_eq!(record.round, 1);
    assert_eq!(record.actions.len(), 2);
    assert!(record.global_summary.contains("Invested $100,000 in capital"));
    assert!(record.global_summary.contains("Beta Lab:\n  - Took no action"));
    assert_eq!(sim.status(), SimulationStatus::Running { round: 1 });

    sim.run_round().await.unwrap();
    sim.run_round().await.unwrap();
    assert_eq!(sim.status(), SimulationStatus::Complete);
    assert_eq!(sim.history().len(), 3);

    let capital = sim
        .state()
        .get_character(ALPHA)
        .unwrap()
        .private_info
        .true_asset_balance
        .capital;
    assert_eq!(capital, 1_000_000.0 + 300_000.0 * 0.9);

    assert!(matches!(
        sim.run_round().await,
        Err(SimError::AlreadyComplete(3))
    ));
}

#[tokio::test]
async fn test_failing_agent_becomes_no_op() {
    let sim = Simulation::new(
        fixtures::two_lab_state(),
        gamemaster(),
        roster(Box::new(BrokenAgent), Box::new(IdleAgent)),
        2,
    )
    .unwrap();

    let report = sim.run().await.unwrap();

    assert_eq!(report.rounds_completed, 2);
    for record in &report.history {
        let alpha_actions: Vec<&Action> = record
            .actions
            .iter()
            .filter(|a| a.character_name == ALPHA)
            .collect();
        assert_eq!(alpha_actions, vec![&Action {
            round_number: record.round,
            ..Action::no_op(ALPHA)
        }]);
        assert!(record.global_summary.contains("Alpha Lab:\n  - Took no action"));
    }
}

#[tokio::test]
async fn test_stalled_agent_times_out() {
    let sim = Simulation::new(
        fixtures::two_lab_state(),
        gamemaster(),
        roster(Box::new(StalledAgent), Box::new(IdleAgent)),
        1,
    )
    .unwrap()
    .with_agent_timeout(Duration::from_millis(50));

    let report = sim.run().await.unwrap();

    let alpha = report.final_state.get_character(ALPHA).unwrap();
    assert_eq!(alpha.private_info.true_asset_balance.capital, 1_000_000.0);
    assert_eq!(
        alpha.recent_actions.back().map(String::as_str),
        Some("Round 1: No primary action")
    );
}

#[test]
fn test_every_character_needs_an_agent() {
    let mut agents = AgentRoster::new();
    agents.insert(ALPHA.to_string(), Box::new(IdleAgent));

    let err = Simulation::new(fixtures::two_lab_state(), gamemaster(), agents, 1).unwrap_err();
    assert!(matches!(err, SimError::MissingAgent(ref name) if name == BETA));
}

#[tokio::test]
async fn test_agents_see_previous_round() {
    let recorder = std::sync::Arc::new(RecordingAgent::default());
    let beta = ScriptedAgent::new(vec![vec![Action::new(
        BETA,
        ActionKind::Espionage {
            target: Some(ALPHA.into()),
            budget: Some(100_000.0),
            focus: Some("budget".into()),
        },
    )]]);
    let mut sim = Simulation::new(
        fixtures::two_lab_state(),
        gamemaster(),
        roster(Box::new(Shared(recorder.clone())), Box::new(beta)),
        2,
    )
    .unwrap();

    sim.run_round().await.unwrap();
    let first_private = sim.history()[0].private_summaries[ALPHA].clone();
    sim.run_round().await.unwrap();

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, FIRST_ROUND_SUMMARY);
    assert_eq!(seen[0].1, NO_PRIVATE_UPDATES_YET);
    assert!(seen[1].0.starts_with("Round 1 Summary"));
    assert_eq!(seen[1].1, first_private);
    // Beta's intelligence never reaches Alpha
    assert!(!seen[1].1.contains("Espionage"));
}

#[tokio::test]
async fn test_agent_cannot_act_for_another_character() {
    let spoof = ScriptedAgent::new(vec![vec![invest(BETA, 100_000.0)]]);
    let mut sim = Simulation::new(
        fixtures::two_lab_state(),
        gamemaster(),
        roster(Box::new(spoof), Box::new(IdleAgent)),
        1,
    )
    .unwrap();

    sim.run_round().await.unwrap();

    let state: &GameState = sim.state();
    assert_eq!(
        state.get_character(ALPHA).unwrap().private_info.true_asset_balance.capital,
        1_090_000.0
    );
    assert_eq!(
        state.get_character(BETA).unwrap().private_info.true_asset_balance.capital,
        500_000.0
    );
}

#[tokio::test]
async fn test_messages_reach_recipient() {
    let alpha = ScriptedAgent::new(vec![vec![
        Action::no_op(ALPHA).with_message(OutgoingMessage::new(BETA, "Shall we both pause?")),
    ]]);
    let mut sim = Simulation::new(
        fixtures::two_lab_state(),
        gamemaster(),
        roster(Box::new(alpha), Box::new(IdleAgent)),
        1,
    )
    .unwrap();

    let record = sim.run_round().await.unwrap();
    assert!(record.global_summary.contains("Alpha Lab:\n  - Sent message to Beta Lab"));

    let beta = sim.state().get_character(BETA).unwrap();
    let delivered: Vec<_> = beta.messages_for_round(1).collect();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].content, "Shall we both pause?");
}

#[tokio::test]
async fn test_history_log_written_per_round() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.jsonl");

    let sim = Simulation::new(
        fixtures::two_lab_state(),
        gamemaster(),
        roster(Box::new(IdleAgent), Box::new(IdleAgent)),
        3,
    )
    .unwrap()
    .with_history_log(HistoryLog::new(&path).unwrap());
    let report = sim.run().await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let logged: Vec<RoundRecord> = content
        .lines()
        .map(|line| RoundRecord::from_jsonl(line).unwrap())
        .collect();
    assert_eq!(logged, report.history);
}
