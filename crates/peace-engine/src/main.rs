//! Negotiation simulation runner.
//!
//! Loads a scenario, pairs every character with an agent (scripted from a
//! JSON file, otherwise idle), runs the configured number of rounds and
//! prints the final round summary.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use peace_engine::{
    default_config_toml, AgentRoster, HistoryLog, IdleAgent, ScenarioRegistry, ScriptedAgent,
    SimConfig, SimError, Simulation,
};
use peace_model::format_money;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "peace_sim")]
#[command(about = "A turn-based negotiation simulation between frontier AI labs")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scenario id (overrides config)
    #[arg(long)]
    scenario: Option<String>,

    /// Number of rounds (overrides config)
    #[arg(long)]
    rounds: Option<u32>,

    /// Random seed for reproducibility (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated start date, YYYY-MM-DD (overrides config)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// JSON script of per-round actions for each character
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write each resolved round as one JSON line
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// List available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), SimError> {
    if args.print_default_config {
        println!("{}", default_config_toml()?);
        return Ok(());
    }

    let registry = ScenarioRegistry::builtin();
    if args.list_scenarios {
        for id in registry.ids() {
            println!("{}", id);
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    apply_overrides(&mut config, &args);

    let scenario = registry.create(&config.simulation.scenario)?;
    info!(
        scenario = scenario.id(),
        rounds = config.simulation.max_rounds,
        seed = ?config.simulation.seed,
        "Loaded scenario"
    );

    let mut scripted = match &args.script {
        Some(path) => ScriptedAgent::load_script(path)?,
        None => Default::default(),
    };
    let initial = scenario.create_game_state(config.simulation.start_date)?;
    let mut agents = AgentRoster::new();
    for name in initial.character_names() {
        match scripted.remove(&name) {
            Some(agent) => {
                agents.insert(name, Box::new(agent));
            }
            None => {
                info!(character = %name, "No script; character will idle");
                agents.insert(name, Box::new(IdleAgent));
            }
        }
    }
    for name in scripted.keys() {
        warn!(character = %name, "Script entry for unknown character ignored");
    }

    let mut simulation = Simulation::from_config(&config, scenario.as_ref(), agents)?;
    if let Some(path) = &args.history_out {
        simulation = simulation.with_history_log(HistoryLog::new(path)?);
    }

    let report = simulation.run().await?;

    println!("Run {}", report.run_id);
    println!("Rounds completed: {}", report.rounds_completed);
    if let Some(last) = report.history.last() {
        println!();
        println!("{}", last.global_summary);
    }
    println!();
    println!("Final positions ({}):", report.final_state.current_date);
    for character in report.final_state.characters() {
        let private = &character.private_info;
        let assets = private.true_asset_balance;
        println!(
            "  {}: budget ${}, tech {:.1}, capital ${}, human {:.1}",
            character.name,
            format_money(private.get_current_budget(report.final_state.current_date)),
            assets.technical_capability,
            format_money(assets.capital),
            assets.human,
        );
    }
    Ok(())
}

fn apply_overrides(config: &mut SimConfig, args: &Args) {
    if let Some(scenario) = &args.scenario {
        config.simulation.scenario = scenario.clone();
    }
    if let Some(rounds) = args.rounds {
        config.simulation.max_rounds = rounds;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if let Some(date) = args.start_date {
        config.simulation.start_date = date;
    }
}
